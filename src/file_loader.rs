//! Discovery of maze description files in the working directory.

use std::fs;

use color_eyre::eyre::{OptionExt as _, Result};

use crate::map::Map;

/// Scans the current directory for `.maze` files and loads them.
///
/// This function searches for files with the `.maze` extension in the current working
/// directory and appends every description that parses cleanly to the maps collection.
/// Descriptions that fail validation are skipped so one malformed file cannot keep the rest
/// from loading.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or a directory entry cannot be inspected.
pub(crate) fn fetch_files(maps: &mut Vec<Map>) -> Result<()> {
    for file in fs::read_dir(".")? {
        match file {
            Ok(file)
                if !file.file_type()?.is_dir()
                    && file
                        .file_name()
                        .to_str()
                        .ok_or_eyre("failed to convert osstring to string slice")?
                        .ends_with(".maze") =>
            {
                let contents = fs::read_to_string(file.path())?;

                if let Ok(map) = Map::new(file.file_name(), contents.trim_end()) {
                    maps.push(map);
                }
            }
            Err(err) => return Err(err.into()),
            _ => {}
        }
    }

    Ok(())
}
