//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::crossterm::event::{self, Event, KeyCode};

use crate::{file_loader, map::Map, types::Screen, App};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the appropriate handler
/// functions based on the key pressed. It uses a timeout to avoid blocking the interface, and
/// keeps the search replay ticking while the viewer is on screen.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => app.exit = true,
                KeyCode::Char('j') => handle_j_events(app)?,
                KeyCode::Char('k') => handle_k_events(app)?,
                KeyCode::Char('l') => handle_l_events(app)?,
                KeyCode::Char('h') => handle_h_events(app),
                KeyCode::Char('m') => handle_m_events(app)?,
                KeyCode::Char('r') => handle_r_events(app),
                _ => {}
            }
        }
    }

    if app.screen == Screen::Viewer {
        app.animation.update();
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
///
/// This function moves the browser cursor to the next description and slides the viewport
/// window along once the cursor would leave its visible range. Outside the browser the key does
/// nothing.
pub(crate) fn handle_j_events(app: &mut App) -> Result<()> {
    if app.screen != Screen::Browser {
        return Ok(());
    }

    let viewport_map = app
        .viewport_map
        .clone()
        .ok_or_eyre("failed to retrieve cursor-selected map")?;
    let index = app
        .maps
        .iter()
        .position(|map| *map == viewport_map)
        .ok_or_eyre("cursor-selected map missing from the map list")?;

    if let Some(next) = app.maps.get(index + 1) {
        if app.viewport_height > 0 && index + 1 >= app.viewport_offset + app.viewport_height {
            app.viewport_offset += 1;
        }
        app.viewport_map = Some(next.clone());
    }

    Ok(())
}

/// Handles 'k' key press events for upward navigation.
///
/// Like the 'j' handler with the direction reversed: the cursor moves to the previous
/// description and the viewport slides up when the cursor crosses its first visible row.
pub(crate) fn handle_k_events(app: &mut App) -> Result<()> {
    if app.screen != Screen::Browser {
        return Ok(());
    }

    let viewport_map = app
        .viewport_map
        .clone()
        .ok_or_eyre("failed to retrieve cursor-selected map")?;
    let index = app
        .maps
        .iter()
        .position(|map| *map == viewport_map)
        .ok_or_eyre("cursor-selected map missing from the map list")?;

    if let Some(previous) = index.checked_sub(1).and_then(|target| app.maps.get(target)) {
        if index.saturating_sub(1) < app.viewport_offset {
            app.viewport_offset = app.viewport_offset.saturating_sub(1);
        }
        app.viewport_map = Some(previous.clone());
    }

    Ok(())
}

/// Handles 'l' key press events for selection.
///
/// In the browser this makes the cursor-selected description the active one, drops the stale
/// search trace so the viewer re-solves the new maze, and returns to the viewer screen.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    if app.screen == Screen::Browser {
        app.map = app
            .viewport_map
            .clone()
            .ok_or_eyre("failed to retrieve cursor-selected map")?;
        app.animation.clear();
        app.outcome = None;
        app.screen = Screen::Viewer;
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
///
/// Returns from the browser to the viewer without changing the active description.
pub(crate) fn handle_h_events(app: &mut App) {
    if app.screen == Screen::Browser {
        app.screen = Screen::Viewer;
    }
}

/// Handles 'm' key press events for opening the map browser.
///
/// This function rebuilds the description list from the built-in default plus the `.maze` files
/// discovered in the working directory, places the cursor on the first entry and switches to
/// the browser screen.
pub(crate) fn handle_m_events(app: &mut App) -> Result<()> {
    if app.screen == Screen::Viewer {
        app.screen = Screen::Browser;

        let first = Map::default();
        app.maps.clear();
        app.maps.push(first.clone());
        file_loader::fetch_files(&mut app.maps)?;
        app.viewport_map = Some(first);
        app.viewport_offset = 0;
    }

    Ok(())
}

/// Handles 'r' key press events for restarting the search replay.
pub(crate) fn handle_r_events(app: &mut App) {
    if app.screen == Screen::Viewer {
        app.animation.reset();
    }
}
