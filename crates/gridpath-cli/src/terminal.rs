//! Terminal styling and color utilities.
//!
//! Cell states map to ANSI background colours through a plain lookup in
//! [`ColorPalette::for_cell`]; everything else here is capability detection.

use gridpath_lib::CellState;

/// ANSI escape codes for cell backgrounds and text styling.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    /// Black on white for unvisited cells.
    pub const UNVISITED: &str = "\x1b[30;47m";
    /// Black on yellow for visited cells.
    pub const VISITED: &str = "\x1b[30;43m";
    /// White on black for walls.
    pub const WALL: &str = "\x1b[97;40m";
    /// Bold black on green for the start cell.
    pub const START: &str = "\x1b[1;30;42m";
    /// Bold white on red for the finish cell.
    pub const FINISH: &str = "\x1b[1;97;41m";
    /// Bold white on magenta for the current cell.
    pub const CURRENT: &str = "\x1b[1;97;45m";
    /// Black on orange (256-color) for cells waiting in the frontier.
    pub const QUEUED: &str = "\x1b[30;48;5;208m";

    /// Gray for axis labels.
    pub const GRAY: &str = "\x1b[90m";
    /// Bold green for success messages.
    pub const GREEN_BOLD: &str = "\x1b[1;32m";
    /// Bold red for failure messages.
    pub const RED_BOLD: &str = "\x1b[1;31m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub unvisited: &'static str,
    pub visited: &'static str,
    pub wall: &'static str,
    pub start: &'static str,
    pub finish: &'static str,
    pub current: &'static str,
    pub queued: &'static str,
    pub gray: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            unvisited: colors::UNVISITED,
            visited: colors::VISITED,
            wall: colors::WALL,
            start: colors::START,
            finish: colors::FINISH,
            current: colors::CURRENT,
            queued: colors::QUEUED,
            gray: colors::GRAY,
            success: colors::GREEN_BOLD,
            failure: colors::RED_BOLD,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            unvisited: "",
            visited: "",
            wall: "",
            start: "",
            finish: "",
            current: "",
            queued: "",
            gray: "",
            success: "",
            failure: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    ///
    /// Returns `colored()` if the terminal supports ANSI colors,
    /// otherwise returns `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Background for a cell. Queued unvisited cells get their own colour.
    #[must_use]
    pub fn for_cell(&self, state: CellState, queued: bool) -> &'static str {
        match state {
            CellState::Unvisited if queued => self.queued,
            CellState::Unvisited => self.unvisited,
            CellState::Visited => self.visited,
            CellState::Wall => self.wall,
            CellState::Start => self.start,
            CellState::Finish => self.finish,
            CellState::Current => self.current,
        }
    }

    /// Whether this palette emits escape codes at all.
    #[must_use]
    pub fn is_colored(&self) -> bool {
        !self.reset.is_empty()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
