//! Maze description data and the builder turning descriptions into mazes.
//!
//! This module contains the `Map` struct holding a fully validated maze description: the grid
//! dimensions, the start and exit positions and the raw grid rows from a `.maze` file. Every
//! coordinate is checked against the declared dimensions at parse time, so a `Map` value always
//! builds into a well-formed maze.

use std::{ffi::OsString, sync::LazyLock};

use color_eyre::eyre::{bail, OptionExt as _, Result};

use crate::maze::Maze;

/// Named, validated maze description.
///
/// The key is the source filename without the `.maze` extension; the remaining fields are the
/// parsed header values plus the raw grid rows. Stored in a vector, the type doubles as an
/// ordered map from name to description for the browser screen.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd)]
pub(crate) struct Map {
    /// Display name of the map.
    pub key: String,
    /// Number of grid rows declared by the description header.
    pub num_rows: usize,
    /// Number of grid columns declared by the description header.
    pub num_cols: usize,
    /// Start position as a `(row, col)` pair.
    pub start: (usize, usize),
    /// Exit position as a `(row, col)` pair.
    pub exit: (usize, usize),
    /// Raw grid rows; a `*` marks a wall, any other character an open cell.
    pub grid: Vec<String>,
}

impl Default for Map {
    fn default() -> Self {
        Self::new("Default.maze".into(), *DEFAULT_MAP).expect("failed to parse default map")
    }
}

impl Map {
    /// Parses and validates a maze description from a filename and its contents.
    ///
    /// The expected format is a line with `rows cols`, a line with the start `row col`, a line
    /// with the exit `row col`, followed by exactly `rows` lines of raw grid text where `*`
    /// denotes a wall.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    /// - the filename cannot be converted to a string slice or lacks the `.maze` extension
    /// - a header line is missing or does not hold exactly two integers
    /// - a dimension is zero, or the start or exit lies outside the declared grid
    /// - the description does not hold exactly `rows` grid lines
    /// - a wall marker sits at a column index outside the declared width
    pub(crate) fn new(key: OsString, data: &str) -> Result<Self> {
        let mut file_name = key
            .to_str()
            .ok_or_eyre("failed to convert osstring to string slice")?
            .to_owned();
        file_name.truncate({
            file_name
                .rfind(".maze")
                .ok_or_eyre("failed to find extension in file name")?
        });

        let mut lines = data.lines();
        let (num_rows, num_cols) =
            read_value_pair(lines.next().ok_or_eyre("missing dimensions line")?)?;
        if num_rows == 0 || num_cols == 0 {
            bail!("maze dimensions must be positive");
        }

        let start = read_value_pair(lines.next().ok_or_eyre("missing start position line")?)?;
        if start.0 >= num_rows || start.1 >= num_cols {
            bail!("start position lies outside the grid");
        }
        let exit = read_value_pair(lines.next().ok_or_eyre("missing exit position line")?)?;
        if exit.0 >= num_rows || exit.1 >= num_cols {
            bail!("exit position lies outside the grid");
        }

        let grid: Vec<String> = lines.by_ref().take(num_rows).map(ToOwned::to_owned).collect();
        if grid.len() != num_rows {
            bail!("expected {num_rows} grid rows, found {}", grid.len());
        }
        if lines.next().is_some() {
            bail!("trailing content after the grid rows");
        }
        for (row, line) in grid.iter().enumerate() {
            for (col, char) in line.chars().enumerate() {
                if char == '*' && col >= num_cols {
                    bail!("wall marker in row {row} lies outside the declared width");
                }
            }
        }

        Ok(Self {
            key: file_name,
            num_rows,
            num_cols,
            start,
            exit,
            grid,
        })
    }

    /// Builds a fully configured maze from this description.
    ///
    /// The maze is allocated with the declared dimensions, the start and exit positions are
    /// stored and every wall marker in the grid rows is applied. All coordinates were validated
    /// at parse time, so the configuration calls cannot fail on a value of this type.
    ///
    /// # Errors
    ///
    /// Propagates range errors from the maze configuration calls.
    pub(crate) fn build(&self) -> Result<Maze> {
        let mut maze = Maze::new(self.num_rows, self.num_cols);
        maze.set_start(self.start.0, self.start.1)?;
        maze.set_exit(self.exit.0, self.exit.1)?;
        for (row, line) in self.grid.iter().enumerate() {
            for (col, char) in line.chars().enumerate() {
                if char == '*' {
                    maze.set_wall(row, col)?;
                }
            }
        }

        Ok(maze)
    }
}

/// Extracts an integer value pair from a description header line.
fn read_value_pair(line: &str) -> Result<(usize, usize)> {
    let mut values = line.split_whitespace();
    let first = values
        .next()
        .ok_or_eyre("missing first value in pair")?
        .parse()?;
    let second = values
        .next()
        .ok_or_eyre("missing second value in pair")?
        .parse()?;
    if values.next().is_some() {
        bail!("unexpected extra values in pair");
    }

    Ok((first, second))
}

/// Default maze description embedded in the binary.
///
/// This static holds the map loaded when no description file is given, used both by the viewer
/// and as the first entry of the browser list.
static DEFAULT_MAP: LazyLock<&str> = LazyLock::new(|| {
    "\
9 13
1 1
7 11
*************
*...*.......*
*.*.*.*****.*
*.*...*...*.*
*.*****.*.*.*
*.....*.*.*.*
*****.*.*.*.*
*.....*.*...*
*************"
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_default() {
        let map = Map::default();

        assert_eq!(map.key, "Default");
        assert_eq!(map.num_rows, 9);
        assert_eq!(map.num_cols, 13);
        assert_eq!(map.start, (1, 1));
        assert_eq!(map.exit, (7, 11));
        assert_eq!(map.grid.len(), 9);
    }

    #[test]
    fn test_map_default_is_solvable() {
        let mut maze = Map::default().build().expect("default map should build");

        assert!(maze.find_path().expect("start and exit are configured"));
    }

    #[test]
    fn test_map_new_valid_input() {
        let data = "2 3\n0 0\n1 2\n.*.\n...";

        let map = Map::new("corridor.maze".into(), data).expect("description should parse");

        assert_eq!(map.key, "corridor");
        assert_eq!((map.num_rows, map.num_cols), (2, 3));
        assert_eq!(map.start, (0, 0));
        assert_eq!(map.exit, (1, 2));
        assert_eq!(map.grid, vec![".*.", "..."]);
    }

    #[test]
    fn test_map_new_missing_extension() {
        assert!(Map::new("noextension".into(), "1 1\n0 0\n0 0\n.").is_err());
        assert!(Map::new("wrong.txt".into(), "1 1\n0 0\n0 0\n.").is_err());
    }

    #[test]
    fn test_map_new_rejects_malformed_header() {
        assert!(Map::new("bad.maze".into(), "2\n0 0\n1 1\n..\n..").is_err());
        assert!(Map::new("bad.maze".into(), "2 2 2\n0 0\n1 1\n..\n..").is_err());
        assert!(Map::new("bad.maze".into(), "two 2\n0 0\n1 1\n..\n..").is_err());
        assert!(Map::new("bad.maze".into(), "").is_err());
    }

    #[test]
    fn test_map_new_rejects_zero_dimensions() {
        assert!(Map::new("bad.maze".into(), "0 2\n0 0\n0 1\n").is_err());
        assert!(Map::new("bad.maze".into(), "2 0\n0 0\n1 0\n").is_err());
    }

    #[test]
    fn test_map_new_rejects_out_of_range_positions() {
        assert!(Map::new("bad.maze".into(), "2 2\n2 0\n1 1\n..\n..").is_err());
        assert!(Map::new("bad.maze".into(), "2 2\n0 0\n1 2\n..\n..").is_err());
    }

    #[test]
    fn test_map_new_rejects_wrong_grid_row_count() {
        assert!(Map::new("bad.maze".into(), "3 2\n0 0\n2 1\n..\n..").is_err());
        assert!(Map::new("bad.maze".into(), "1 2\n0 0\n0 1\n..\n..").is_err());
    }

    #[test]
    fn test_map_new_rejects_wall_outside_declared_width() {
        assert!(Map::new("bad.maze".into(), "2 2\n0 0\n1 1\n..*\n..").is_err());
    }

    #[test]
    fn test_map_new_accepts_short_and_padded_rows() {
        // Rows may be shorter than the declared width, and longer rows are fine as long as the
        // overflow carries no wall markers.
        let map = Map::new("ragged.maze".into(), "2 3\n0 0\n1 2\n*\n...  ")
            .expect("description should parse");

        assert_eq!(map.grid, vec!["*", "...  "]);
    }

    #[test]
    fn test_build_applies_walls_start_and_exit() {
        let map = Map::new("fixture.maze".into(), "2 2\n0 0\n1 1\n.*\n..")
            .expect("description should parse");
        let mut maze = map.build().expect("validated description should build");

        assert!(maze.find_path().expect("start and exit are configured"));
        assert_eq!(maze.to_string(), "x *\nx x");
    }
}
