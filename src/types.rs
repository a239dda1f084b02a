//! Type definitions for the application state and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the application. It is used
/// to determine which screen to render and what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Maze visualization screen with the animated search replay.
    ///
    /// This variant represents the screen where the active maze is displayed and its recorded
    /// solve is played back.
    Viewer,
    /// Map selection screen.
    ///
    /// This variant represents the browser screen listing the maze descriptions available in
    /// the working directory.
    Browser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        let viewer = Screen::Viewer;
        let browser = Screen::Browser;

        assert_eq!(viewer, Screen::Viewer);
        assert_eq!(browser, Screen::Browser);
        assert_ne!(viewer, browser);
    }

    #[test]
    fn test_debug_implementations() {
        assert_eq!(format!("{:?}", Screen::Viewer), "Viewer");
        assert_eq!(format!("{:?}", Screen::Browser), "Browser");
    }
}
