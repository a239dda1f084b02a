//! Replay of a recorded search trace for the terminal visualization.
//!
//! This module turns the marker mutations recorded by a search into a timed animation: advances
//! grow the displayed path, backtracks move cells over to the dead-end set, and the replay loops
//! once the trace is exhausted. It also hosts the coordinate transform that maps grid positions
//! onto the centered canvas used by the viewer screen.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;

use crate::maze::SearchStep;

/// Animation frame delay in milliseconds.
///
/// This constant controls the timing between animation frames. A lower value plays the recorded
/// search back faster; a higher one makes the backtracking easier to follow.
pub(crate) const ANIMATION_FRAME_DELAY_MS: u64 = 200;

/// Replay state for a recorded search trace.
///
/// This structure holds the recorded steps, the index of the next step to apply and the cell
/// sets currently on display. The path and dead-end sets mirror the grid markers the search
/// would have left behind at the same point of its traversal.
pub(crate) struct Animation {
    /// Search steps recorded during pathfinding.
    pub steps: Vec<SearchStep>,
    /// Index of the next step in the replay sequence.
    pub current_index: usize,
    /// Timestamp of the last animation frame update.
    pub last_update_time: Instant,
    /// Cells currently displayed as the candidate path.
    pub path: Vec<(usize, usize)>,
    /// Cells currently displayed as exhausted dead ends.
    pub tried: Vec<(usize, usize)>,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation {
    /// Creates an empty animation with no recorded trace.
    pub(crate) fn new() -> Self {
        Self {
            steps: Vec::new(),
            current_index: 0,
            last_update_time: Instant::now(),
            path: Vec::new(),
            tried: Vec::new(),
        }
    }

    /// Restarts the replay from the beginning of the recorded trace.
    pub(crate) fn reset(&mut self) {
        self.current_index = 0;
        self.path.clear();
        self.tried.clear();
        self.last_update_time = Instant::now();
    }

    /// Drops the recorded trace and resets the replay state.
    pub(crate) fn clear(&mut self) {
        self.steps.clear();
        self.reset();
    }

    /// Advances the replay by one step once the frame delay has elapsed.
    ///
    /// An advance step appends the cell to the displayed path; a backtrack step moves it from
    /// the path to the dead-end set, mirroring the marker downgrade the search performed. When
    /// the trace is exhausted the replay restarts from the beginning.
    pub(crate) fn update(&mut self) {
        if self.last_update_time.elapsed() >= Duration::from_millis(ANIMATION_FRAME_DELAY_MS) {
            self.last_update_time = Instant::now();

            if self.current_index < self.steps.len() {
                if let Some(step) = self.steps.get(self.current_index) {
                    match *step {
                        SearchStep::Advance(row, col) => {
                            self.path.push((row, col));
                        }
                        SearchStep::Backtrack(row, col) => {
                            if let Some(index) =
                                self.path.iter().position(|&cell| cell == (row, col))
                            {
                                let _ = self.path.remove(index);
                            }
                            self.tried.push((row, col));
                        }
                    }
                }

                self.current_index += 1;
            } else {
                self.reset();
            }
        }
    }
}

/// Transforms grid coordinates to screen coordinates for canvas rendering.
///
/// This function converts `(row, col)` grid positions into the centered `(x, y)` coordinate
/// system of the canvas: rows map top-down onto descending y values, columns left-right onto
/// ascending x values, both offset by half the grid extent.
///
/// # Errors
///
/// Returns an error if a coordinate does not fit the intermediate conversion width.
pub(crate) fn grid_to_screen_coords(
    cells: &[(usize, usize)],
    num_rows: usize,
    num_cols: usize,
) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(u16::try_from(num_rows)?);
    let cols_n = f64::from(u16::try_from(num_cols)?);

    cells
        .iter()
        .map(|&(row, col)| {
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(row)?);
            let screen_x = f64::from(u16::try_from(col)?) - (cols_n - 1.) / 2.;

            Ok((screen_x, screen_y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns an animation whose frame timer has already expired.
    fn due_animation(steps: Vec<SearchStep>) -> Animation {
        let mut animation = Animation::new();
        animation.steps = steps;
        animation.last_update_time = Instant::now()
            .checked_sub(Duration::from_millis(ANIMATION_FRAME_DELAY_MS))
            .expect("uptime should exceed one frame delay");

        animation
    }

    #[test]
    fn test_update_applies_advance_step() {
        let mut animation = due_animation(vec![SearchStep::Advance(1, 2)]);

        animation.update();

        assert_eq!(animation.path, vec![(1, 2)]);
        assert!(animation.tried.is_empty());
        assert_eq!(animation.current_index, 1);
    }

    #[test]
    fn test_update_moves_backtracked_cell_to_tried() {
        let mut animation = due_animation(vec![
            SearchStep::Advance(0, 0),
            SearchStep::Advance(0, 1),
            SearchStep::Backtrack(0, 1),
        ]);

        for _ in 0..3 {
            animation.last_update_time = Instant::now()
                .checked_sub(Duration::from_millis(ANIMATION_FRAME_DELAY_MS))
                .expect("uptime should exceed one frame delay");
            animation.update();
        }

        assert_eq!(animation.path, vec![(0, 0)]);
        assert_eq!(animation.tried, vec![(0, 1)]);
    }

    #[test]
    fn test_update_restarts_after_trace_end() {
        let mut animation = due_animation(vec![SearchStep::Advance(0, 0)]);

        animation.update();
        animation.last_update_time = Instant::now()
            .checked_sub(Duration::from_millis(ANIMATION_FRAME_DELAY_MS))
            .expect("uptime should exceed one frame delay");
        animation.update();

        assert_eq!(animation.current_index, 0);
        assert!(animation.path.is_empty());
        assert!(animation.tried.is_empty());
    }

    #[test]
    fn test_update_waits_for_frame_delay() {
        let mut animation = Animation::new();
        animation.steps = vec![SearchStep::Advance(0, 0)];

        animation.update();

        assert!(animation.path.is_empty(), "a fresh timer should gate the first step");
        assert_eq!(animation.current_index, 0);
    }

    #[test]
    fn test_clear_drops_recorded_steps() {
        let mut animation = due_animation(vec![SearchStep::Advance(0, 0)]);
        animation.update();

        animation.clear();

        assert!(animation.steps.is_empty());
        assert!(animation.path.is_empty());
        assert!(animation.tried.is_empty());
        assert_eq!(animation.current_index, 0);
    }
}
