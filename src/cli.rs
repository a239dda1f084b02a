//! Command line surface and the non-interactive print mode.

use std::{fs, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::{OptionExt as _, Result};

use crate::map::Map;

/// Command line arguments accepted by the binary.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Maze description file to load instead of the built-in default map.
    pub file: Option<PathBuf>,
    /// Solve the maze and print the annotated grid instead of starting the interface.
    #[arg(short, long)]
    pub print: bool,
}

impl Cli {
    /// Loads the maze description selected on the command line.
    ///
    /// With a file argument the description is read and validated from disk; without one the
    /// built-in default map is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold a valid `.maze`
    /// description.
    pub(crate) fn load_map(&self) -> Result<Map> {
        match &self.file {
            Some(path) => {
                let file_name = path
                    .file_name()
                    .ok_or_eyre("description path has no file name")?
                    .to_owned();
                let contents = fs::read_to_string(path)?;

                Map::new(file_name, contents.trim_end())
            }
            None => Ok(Map::default()),
        }
    }
}

/// Solves the selected maze and prints the outcome and annotated grid to stdout.
///
/// This function is the non-interactive mode behind the `--print` flag: the search runs to
/// completion, a result line reports whether a path was found and the textual rendering of the
/// annotated grid follows.
///
/// # Errors
///
/// Returns an error if the description cannot be loaded or the built maze is missing its
/// start or exit position.
pub fn print_solution(cli: &Cli) -> Result<()> {
    let map = cli.load_map()?;
    let mut maze = map.build()?;

    if maze.find_path()? {
        println!("path found");
    } else {
        println!("no path found");
    }
    println!("{maze}");

    Ok(())
}
