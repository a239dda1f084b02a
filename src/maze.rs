//! Maze grid storage and the iterative backtracking path search.
//!
//! This module contains the central data structure of the crate: a rectangular grid of cell
//! states together with the depth-first search that mutates the grid in place to record its
//! progress. The grid doubles as the visited set, so there is no separate bookkeeping structure
//! to fall out of sync with the traversal.

use std::fmt::{self, Write as _};

use color_eyre::eyre::{OptionExt as _, Result};

/// State held by a single grid cell.
///
/// Every cell is exactly one of these four states at all times. During a search the only forward
/// transitions are open to [`Cell::Path`] and [`Cell::Path`] to [`Cell::Tried`]; walls are set
/// before a search begins and are never touched afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cell {
    /// Unexplored, walkable cell.
    Open,
    /// Impassable cell, configured before any search runs.
    Wall,
    /// Cell on the in-progress candidate path to the exit.
    Path,
    /// Cell fully explored without leading to the exit.
    Tried,
}

impl Cell {
    /// Returns the character used to render this cell state.
    ///
    /// The mapping is part of the textual output contract: walls render as `*`, path cells as
    /// `x`, tried cells as `o` and open cells as the `_` placeholder.
    pub(crate) const fn marker(self) -> char {
        match self {
            Self::Open => '_',
            Self::Wall => '*',
            Self::Path => 'x',
            Self::Tried => 'o',
        }
    }
}

/// Zero-based grid coordinates identifying a single cell.
///
/// This type is used both for the start and exit metadata and as the element pushed onto the
/// search stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CellPosition {
    /// Row index of the cell.
    pub row: usize,
    /// Column index of the cell.
    pub col: usize,
}

impl CellPosition {
    /// Creates a new position from a row and column index.
    pub(crate) const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One marker mutation performed by the search, in traversal order.
///
/// A recorded search produces one step per cell-state transition, which bounds the trace length
/// by twice the cell count. The steps carry enough information to replay the traversal without
/// re-running it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SearchStep {
    /// The cell at the given row and column was marked as part of the candidate path.
    Advance(usize, usize),
    /// The cell at the given row and column was downgraded to a dead end.
    Backtrack(usize, usize),
}

/// Rectangular maze owning its grid, the start/exit metadata and the search algorithm.
///
/// The grid is stored row-major in a single allocation. Dimensions are fixed at construction;
/// the start and exit positions stay unset until explicitly configured and are required before
/// a search can run.
#[derive(Clone, Debug)]
pub(crate) struct Maze {
    /// Row-major cell states of the grid.
    cells: Vec<Cell>,
    /// Number of rows in the grid.
    num_rows: usize,
    /// Number of columns in the grid.
    num_cols: usize,
    /// Starting cell of the search, unset until configured.
    start: Option<CellPosition>,
    /// Exit cell the search looks for, unset until configured.
    exit: Option<CellPosition>,
}

impl Maze {
    /// Creates a maze of the given dimensions with every cell open.
    ///
    /// The dimensions are trusted inputs from the description builder and are not validated
    /// here; start and exit stay unset.
    pub(crate) fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            cells: vec![Cell::Open; num_rows * num_cols],
            num_rows,
            num_cols,
            start: None,
            exit: None,
        }
    }

    /// Returns the number of rows in the grid.
    pub(crate) const fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns in the grid.
    pub(crate) const fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the state of the cell at the given coordinates.
    ///
    /// # Errors
    ///
    /// Returns a range error if the coordinates lie outside the grid.
    pub(crate) fn cell(&self, row: usize, col: usize) -> Result<Cell> {
        self.cell_at(CellPosition::new(row, col))
            .ok_or_eyre("cell index out of range")
    }

    /// Fills the indicated cell with a wall marker.
    ///
    /// # Errors
    ///
    /// Returns a range error if the coordinates lie outside the grid; the grid is left
    /// unchanged in that case.
    pub(crate) fn set_wall(&mut self, row: usize, col: usize) -> Result<()> {
        *self.cell_mut(row, col)? = Cell::Wall;

        Ok(())
    }

    /// Stores the starting cell position.
    ///
    /// The position is metadata only; the cell itself keeps its current state.
    ///
    /// # Errors
    ///
    /// Returns a range error if the coordinates lie outside the grid; the previous start, if
    /// any, is kept in that case.
    pub(crate) fn set_start(&mut self, row: usize, col: usize) -> Result<()> {
        let _ = self.index_of(row, col)?;
        self.start = Some(CellPosition::new(row, col));

        Ok(())
    }

    /// Stores the exit cell position.
    ///
    /// Like the start, the exit is metadata and does not alter the cell state.
    ///
    /// # Errors
    ///
    /// Returns a range error if the coordinates lie outside the grid; the previous exit, if
    /// any, is kept in that case.
    pub(crate) fn set_exit(&mut self, row: usize, col: usize) -> Result<()> {
        let _ = self.index_of(row, col)?;
        self.exit = Some(CellPosition::new(row, col));

        Ok(())
    }

    /// Attempts to find a path from the start cell to the exit.
    ///
    /// Returns `Ok(true)` if a path was found and `Ok(false)` once every reachable cell has
    /// been explored without reaching the exit. The grid is left annotated either way: cells on
    /// the discovered path keep their path marker, exhausted cells carry the tried marker.
    ///
    /// # Errors
    ///
    /// Returns an error if the start or exit position has not been configured; the grid is not
    /// mutated in that case.
    pub(crate) fn find_path(&mut self) -> Result<bool> {
        self.search(None)
    }

    /// Runs the same search as [`find_path`](Maze::find_path) while recording every marker
    /// mutation into `steps`.
    ///
    /// # Errors
    ///
    /// Returns an error if the start or exit position has not been configured; neither the grid
    /// nor `steps` is mutated in that case.
    pub(crate) fn find_path_recorded(&mut self, steps: &mut Vec<SearchStep>) -> Result<bool> {
        self.search(Some(steps))
    }

    /// Reverts every path and tried marker back to an open cell.
    ///
    /// Walls and the start/exit metadata are untouched, so a maze can be searched again from a
    /// clean slate without rebuilding it. Applying this twice is equivalent to applying it once.
    pub(crate) fn reset(&mut self) {
        for cell in &mut self.cells {
            if matches!(*cell, Cell::Path | Cell::Tried) {
                *cell = Cell::Open;
            }
        }
    }

    /// Iterative backtracking search over the grid.
    ///
    /// The explicit stack of positions is the only traversal state besides the grid markers
    /// themselves. The stack top is marked on first becoming top, the exit comparison happens
    /// against the marked top, and moves are attempted in the fixed priority order up, right,
    /// down, left. The first in-bounds open neighbor is pushed; with no valid move the top is
    /// popped and downgraded. Each cell is pushed and popped at most once, so the loop finishes
    /// in at most two marker mutations per cell.
    fn search(&mut self, mut steps: Option<&mut Vec<SearchStep>>) -> Result<bool> {
        let start = self.start.ok_or_eyre("no start position configured")?;
        let exit = self.exit.ok_or_eyre("no exit position configured")?;

        let mut stack = vec![start];
        while let Some(&current) = stack.last() {
            if self.cell_at(current) == Some(Cell::Open) {
                *self.cell_mut(current.row, current.col)? = Cell::Path;
                if let Some(trace) = steps.as_mut() {
                    trace.push(SearchStep::Advance(current.row, current.col));
                }
            }

            if current == exit {
                return Ok(true);
            }

            if let Some(next) = self.next_move(current) {
                stack.push(next);
            } else {
                let _ = stack.pop();
                *self.cell_mut(current.row, current.col)? = Cell::Tried;
                if let Some(trace) = steps.as_mut() {
                    trace.push(SearchStep::Backtrack(current.row, current.col));
                }
            }
        }

        Ok(false)
    }

    /// Returns the first valid move out of the given cell, if any.
    ///
    /// Candidates are probed in the locked priority order up, right, down, left; the order
    /// decides which of several possible paths the search discovers and is relied upon by the
    /// output tests.
    fn next_move(&self, from: CellPosition) -> Option<CellPosition> {
        let candidates = [
            from.row
                .checked_sub(1)
                .map(|row| CellPosition::new(row, from.col)),
            Some(CellPosition::new(from.row, from.col + 1)),
            Some(CellPosition::new(from.row + 1, from.col)),
            from.col
                .checked_sub(1)
                .map(|col| CellPosition::new(from.row, col)),
        ];

        candidates
            .into_iter()
            .flatten()
            .find(|&target| self.cell_at(target) == Some(Cell::Open))
    }

    /// Returns the state of the cell at the given position, or `None` when out of bounds.
    fn cell_at(&self, position: CellPosition) -> Option<Cell> {
        (position.row < self.num_rows && position.col < self.num_cols)
            .then(|| self.cells.get(position.row * self.num_cols + position.col).copied())
            .flatten()
    }

    /// Converts bounds-checked coordinates into the row-major storage index.
    fn index_of(&self, row: usize, col: usize) -> Result<usize> {
        (row < self.num_rows && col < self.num_cols)
            .then(|| row * self.num_cols + col)
            .ok_or_eyre("cell index out of range")
    }

    /// Returns a mutable reference to the cell at the given coordinates.
    fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell> {
        let index = self.index_of(row, col)?;

        self.cells
            .get_mut(index)
            .ok_or_eyre("cell index out of range")
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_idx, row) in self.cells.chunks(self.num_cols).enumerate() {
            if row_idx > 0 {
                formatter.write_char('\n')?;
            }
            for (col_idx, cell) in row.iter().enumerate() {
                if col_idx > 0 {
                    formatter.write_char(' ')?;
                }
                formatter.write_char(cell.marker())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds the 4x4 fixture maze with a dead-end branch forcing backtracking.
    ///
    /// Walls at (0,2), (1,1), (1,2), (3,1) and (3,2); start (0,0), exit (3,3). The only route
    /// runs down the left edge and along row 2, with dead ends at (0,1) and above (2,3).
    fn branching_maze() -> Maze {
        let mut maze = Maze::new(4, 4);
        for (row, col) in [(0, 2), (1, 1), (1, 2), (3, 1), (3, 2)] {
            maze.set_wall(row, col).expect("wall should be in range");
        }
        maze.set_start(0, 0).expect("start should be in range");
        maze.set_exit(3, 3).expect("exit should be in range");

        maze
    }

    /// Builds a 3x4 fixture maze whose exit cell is sealed off by walls.
    fn sealed_exit_maze() -> Maze {
        let mut maze = Maze::new(3, 4);
        for (row, col) in [(0, 2), (1, 1), (1, 3), (2, 2)] {
            maze.set_wall(row, col).expect("wall should be in range");
        }
        maze.set_start(0, 0).expect("start should be in range");
        maze.set_exit(1, 2).expect("exit should be in range");

        maze
    }

    #[test]
    fn test_new_maze_renders_all_open() {
        let maze = Maze::new(2, 2);

        assert_eq!(maze.num_rows(), 2);
        assert_eq!(maze.num_cols(), 2);
        assert_eq!(maze.to_string(), "_ _\n_ _");
    }

    #[test]
    fn test_set_wall_out_of_range_leaves_grid_unchanged() {
        let mut maze = Maze::new(3, 3);

        assert!(maze.set_wall(3, 0).is_err());
        assert!(maze.set_wall(0, 3).is_err());
        assert!(maze.set_wall(usize::MAX, usize::MAX).is_err());
        assert_eq!(maze.to_string(), "_ _ _\n_ _ _\n_ _ _");
    }

    #[test]
    fn test_set_start_and_exit_reject_out_of_range() {
        let mut maze = Maze::new(2, 2);

        assert!(maze.set_start(2, 0).is_err());
        assert!(maze.set_exit(0, 2).is_err());
        assert!(maze.find_path().is_err(), "positions must stay unset after rejected calls");
    }

    #[test]
    fn test_find_path_without_start_errors_without_mutation() {
        let mut maze = Maze::new(2, 2);
        maze.set_exit(1, 1).expect("exit should be in range");

        assert!(maze.find_path().is_err());
        assert_eq!(maze.to_string(), "_ _\n_ _");
    }

    #[test]
    fn test_find_path_without_exit_errors_without_mutation() {
        let mut maze = Maze::new(2, 2);
        maze.set_start(0, 0).expect("start should be in range");

        assert!(maze.find_path().is_err());
        assert_eq!(maze.to_string(), "_ _\n_ _");
    }

    #[test]
    fn test_find_path_marks_path_and_dead_ends() {
        let mut maze = branching_maze();

        let found = maze.find_path().expect("search preconditions are satisfied");

        assert!(found);
        assert_eq!(maze.to_string(), "x o * o\nx * * o\nx x x x\n_ * * x");
    }

    #[test]
    fn test_find_path_follows_direction_priority() {
        // An all-open grid exercises the tie-break alone: up is impossible from (0,0), so the
        // search hugs the top edge to the right and walks straight down the last column.
        let mut maze = Maze::new(3, 3);
        maze.set_start(0, 0).expect("start should be in range");
        maze.set_exit(2, 2).expect("exit should be in range");

        let found = maze.find_path().expect("search preconditions are satisfied");

        assert!(found);
        assert_eq!(maze.to_string(), "x x x\n_ _ x\n_ _ x");
    }

    #[test]
    fn test_find_path_exhausts_sealed_exit() {
        let mut maze = sealed_exit_maze();

        let found = maze.find_path().expect("search preconditions are satisfied");

        assert!(!found);
        assert_eq!(maze.to_string(), "o o * _\no * _ *\no o * _");
    }

    #[test]
    fn test_failed_search_leaves_no_path_markers() {
        let mut maze = sealed_exit_maze();

        let _ = maze.find_path().expect("search preconditions are satisfied");

        assert!(!maze.to_string().contains('x'));
    }

    #[test]
    fn test_find_path_start_equals_exit() {
        let mut maze = Maze::new(2, 2);
        maze.set_start(1, 0).expect("start should be in range");
        maze.set_exit(1, 0).expect("exit should be in range");

        let found = maze.find_path().expect("search preconditions are satisfied");

        assert!(found);
        assert_eq!(maze.to_string(), "_ _\nx _");
    }

    #[test]
    fn test_find_path_is_deterministic_across_reset() {
        let mut maze = branching_maze();

        let first = maze.find_path().expect("search preconditions are satisfied");
        let first_render = maze.to_string();
        maze.reset();
        let second = maze.find_path().expect("search preconditions are satisfied");

        assert_eq!(first, second);
        assert_eq!(first_render, maze.to_string());
    }

    #[test]
    fn test_reset_round_trip_and_idempotence() {
        let mut maze = branching_maze();
        let pristine = maze.to_string();

        let _ = maze.find_path().expect("search preconditions are satisfied");
        maze.reset();

        assert_eq!(maze.to_string(), pristine);
        assert!(!maze.to_string().contains('x'));
        assert!(!maze.to_string().contains('o'));

        maze.reset();
        assert_eq!(maze.to_string(), pristine);
    }

    #[test]
    fn test_walls_survive_search_and_reset() {
        let mut maze = branching_maze();

        let _ = maze.find_path().expect("search preconditions are satisfied");
        for (row, col) in [(0, 2), (1, 1), (1, 2), (3, 1), (3, 2)] {
            assert_eq!(
                maze.cell(row, col).expect("wall coordinates are in range"),
                Cell::Wall
            );
        }

        maze.reset();
        for (row, col) in [(0, 2), (1, 1), (1, 2), (3, 1), (3, 2)] {
            assert_eq!(
                maze.cell(row, col).expect("wall coordinates are in range"),
                Cell::Wall
            );
        }
    }

    #[test]
    fn test_recorded_trace_respects_termination_bound() {
        let mut maze = branching_maze();
        let mut steps = Vec::new();

        let found = maze
            .find_path_recorded(&mut steps)
            .expect("search preconditions are satisfied");

        assert!(found);
        assert!(steps.len() <= 2 * maze.num_rows() * maze.num_cols());

        let mut sealed = sealed_exit_maze();
        let mut sealed_steps = Vec::new();
        let _ = sealed
            .find_path_recorded(&mut sealed_steps)
            .expect("search preconditions are satisfied");

        assert!(sealed_steps.len() <= 2 * sealed.num_rows() * sealed.num_cols());
    }

    #[test]
    fn test_recorded_trace_starts_at_start_cell() {
        let mut maze = branching_maze();
        let mut steps = Vec::new();

        let _ = maze
            .find_path_recorded(&mut steps)
            .expect("search preconditions are satisfied");

        assert_eq!(steps.first(), Some(&SearchStep::Advance(0, 0)));
        assert_eq!(steps.last(), Some(&SearchStep::Advance(3, 3)));
    }

    #[test]
    fn test_exhausted_search_trace_balances_advances_and_backtracks() {
        let mut maze = sealed_exit_maze();
        let mut steps = Vec::new();

        let _ = maze
            .find_path_recorded(&mut steps)
            .expect("search preconditions are satisfied");

        let advances = steps
            .iter()
            .filter(|step| matches!(step, SearchStep::Advance(_, _)))
            .count();
        let backtracks = steps
            .iter()
            .filter(|step| matches!(step, SearchStep::Backtrack(_, _)))
            .count();

        assert_eq!(advances, backtracks, "every explored cell ends as a dead end");
    }

    #[test]
    fn test_cell_accessor_rejects_out_of_range() {
        let maze = Maze::new(2, 3);

        assert!(maze.cell(0, 0).is_ok());
        assert!(maze.cell(1, 2).is_ok());
        assert!(maze.cell(2, 0).is_err());
        assert!(maze.cell(0, 3).is_err());
    }

    #[test]
    fn test_cell_markers() {
        assert_eq!(Cell::Open.marker(), '_');
        assert_eq!(Cell::Wall.marker(), '*');
        assert_eq!(Cell::Path.marker(), 'x');
        assert_eq!(Cell::Tried.marker(), 'o');
    }
}
