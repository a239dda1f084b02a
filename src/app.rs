//! Core application state and main loop of the terminal interface.

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;

use crate::{animation::Animation, cli::Cli, events, map::Map, types::Screen, ui};

/// Application state container for the maze solver interface.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the screens and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the
    /// user wants to quit but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Currently active maze description.
    ///
    /// This field holds the description whose maze is displayed and solved in the viewer. It
    /// always holds a value, either the built-in default or a description picked by the user.
    pub(crate) map: Map,
    /// Collection of all selectable maze descriptions.
    ///
    /// This field holds the descriptions discovered in the current working directory, keyed by
    /// filename and stored as an ordered collection for the browser screen.
    pub(crate) maps: Vec<Map>,
    /// Description currently under the browser cursor.
    pub(crate) viewport_map: Option<Map>,
    /// Scrolling offset of the sliding window into the description list.
    pub(crate) viewport_offset: usize,
    /// Height of the list rendering area during the last redraw, in terminal cells.
    pub(crate) viewport_height: usize,
    /// Replay state of the recorded search trace.
    ///
    /// This field holds the animation that plays the solve back in the viewer; an empty trace
    /// means the active maze has not been searched yet.
    pub(crate) animation: Animation,
    /// Outcome of the last search on the active maze.
    ///
    /// `None` until the viewer has run the search, then the value returned by it: `true` when a
    /// path to the exit was found, `false` when the maze was exhausted.
    pub(crate) outcome: Option<bool>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new instance of the App structure with safe defaults.
    ///
    /// A [`Default`] trait implementation is not used here because the struct may perform a
    /// fallible operation in the future. The [`Default`] trait implementation does use this
    /// function, though.
    pub fn new() -> Self {
        Self {
            exit: false,
            screen: Screen::Viewer,
            map: Map::default(),
            maps: Vec::new(),
            viewport_map: None,
            viewport_offset: 0,
            viewport_height: 0,
            animation: Animation::new(),
            outcome: None,
        }
    }

    /// Creates an application preloaded with the description selected on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the command line names a file that cannot be read or does not hold
    /// a valid maze description.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut app = Self::new();
        app.map = cli.load_map()?;

        Ok(app)
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues
    /// until the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}
