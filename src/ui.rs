//! User interface rendering functions for the viewer and browser screens.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    symbols::{Marker, DOT},
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{animation, map::Map, types::Screen, App};

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::Viewer => viewer(app, frame)?,
        Screen::Browser => browser(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the viewer screen with the maze and the animated search replay.
///
/// On the first draw after a description change this function builds the maze, runs the
/// recorded search to completion and stores the outcome; every subsequent draw only replays the
/// recorded trace. Walls, dead ends and the candidate path are painted as separate overlaid
/// [`Canvas`] widgets, with a tooltip reporting the outcome and key hints at the bottom.
///
/// # Errors
///
/// This function may return errors from the search preconditions or from coordinate conversion
/// operations.
pub(crate) fn viewer(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    if app.animation.steps.is_empty() {
        let mut maze = app.map.build()?;
        let found = maze.find_path_recorded(&mut app.animation.steps)?;
        app.outcome = Some(found);
        app.animation.reset();
    }

    let maze_rows = app.map.num_rows;
    let maze_columns = app.map.num_cols;

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze and padding area
        Constraint::Length(3), // Tooltip block
    ])
    .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let main_layout = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(maze_rows)?),
        Constraint::Min(1),
    ])
    .split(maze_content_area);

    let maze_area = main_layout
        .get(1)
        .ok_or_eyre("failed to get maze area from layout")?;

    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(maze_columns)?),
        Constraint::Min(1),
    ])
    .split(*maze_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    // Pre-compute screen coordinates to handle errors before the paint closures
    let mut wall_coords = Vec::new();
    for (row_idx, line) in app.map.grid.iter().enumerate() {
        for (col_idx, char) in line.chars().enumerate() {
            if char == '*' {
                wall_coords.push((row_idx, col_idx));
            }
        }
    }
    let wall_screen_coords =
        animation::grid_to_screen_coords(&wall_coords, maze_rows, maze_columns)?;
    let tried_screen_coords =
        animation::grid_to_screen_coords(&app.animation.tried, maze_rows, maze_columns)?;
    let path_screen_coords =
        animation::grid_to_screen_coords(&app.animation.path, maze_rows, maze_columns)?;

    render_cells(frame, space, &wall_screen_coords, Color::Green);
    render_cells(frame, space, &tried_screen_coords, Color::Yellow);
    render_cells(frame, space, &path_screen_coords, Color::Red);

    let outcome = match app.outcome {
        Some(true) => "path found",
        Some(false) => "no path found",
        None => "",
    };

    let tooltip_block = Block::bordered()
        .title("(m) maps / (r) replay / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let tooltip_inner = tooltip_block.inner(tooltip_area);

    frame.render_widget(tooltip_block, tooltip_area);
    frame.render_widget(Line::raw(outcome).centered(), tooltip_inner);

    Ok(())
}

/// Paints one set of cell coordinates onto a centered canvas over the maze space.
fn render_cells(frame: &mut Frame, space: Rect, coords: &[(f64, f64)], color: Color) {
    let canvas = Canvas::default()
        .x_bounds([
            (-rounded_div::i32(space.width.into(), 2)).into(),
            (rounded_div::i32(space.width.into(), 2)).into(),
        ])
        .y_bounds([
            (-rounded_div::i32(space.height.into(), 2)).into(),
            (rounded_div::i32(space.height.into(), 2)).into(),
        ])
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points { coords, color });
        });

    frame.render_widget(canvas, space);
}

/// Renders the browser screen with a scrollable list of available descriptions.
///
/// This function displays a viewport containing all loadable maze descriptions from the current
/// directory. It provides scrolling functionality and visual indicators for the description
/// under the cursor and the one that is actively being displayed.
///
/// # Errors
///
/// This function may return errors if the cursor-selected description cannot be retrieved.
pub(crate) fn browser(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Fill(1),
        Constraint::Percentage(30),
    ])
    .split(frame.area())
    .get(1)
    .copied()
    .ok_or_eyre("failed to get browser space from horizontal layout")?;
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Fill(1),
        Constraint::Percentage(40),
    ])
    .split(space)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get browser space from vertical layout")?;

    let block = Block::bordered()
        .title_top("Maze list")
        .title_bottom("(j) down / (k) up / (l) select / (h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(space);

    frame.render_widget(block, space);

    app.viewport_height = inner_space.height.into();

    let inner_layout = Layout::horizontal([Constraint::Percentage(5), Constraint::Percentage(100)])
        .split(inner_space);
    let inner_selector = Layout::vertical(vec![Constraint::Max(1); inner_space.height.into()])
        .split(
            *inner_layout
                .first()
                .ok_or_eyre("failed to get selector column from layout")?,
        );
    let inner_list = Layout::vertical(vec![Constraint::Max(1); inner_space.height.into()]).split(
        *inner_layout
            .last()
            .ok_or_eyre("failed to get list column from layout")?,
    );

    let cursor_map = app
        .viewport_map
        .clone()
        .ok_or_eyre("failed to retrieve cursor-selected map")?;

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let viewport_maps: Vec<&Map> = app
        .maps
        .iter()
        .skip(app.viewport_offset)
        .take(inner_space.height.into())
        .collect();

    for ((map, selector_area), entry_area) in viewport_maps
        .into_iter()
        .zip(inner_selector.iter())
        .zip(inner_list.iter())
    {
        let style = if *map == cursor_map {
            active_content_style
        } else {
            content_style
        };
        let selector = if *map == app.map {
            Line::styled(DOT, style).centered()
        } else {
            Line::styled(" ", style).centered()
        };

        frame.render_widget(selector, *selector_area);
        frame.render_widget(Line::styled(map.key.clone(), style), *entry_area);
    }

    Ok(())
}
