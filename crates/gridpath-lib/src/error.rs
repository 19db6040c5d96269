use std::path::PathBuf;

use thiserror::Error;

use crate::cell::{CellState, Position};

/// Convenient result alias for the gridpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a state change targets a `Start` or `Finish` cell.
    #[error("cell {position} is {state} and cannot change state")]
    InvalidTransition { position: Position, state: CellState },

    /// Raised when the frontier has no entries left to pop.
    #[error("frontier exhausted; no path to the finish cell")]
    ExhaustedFrontier,

    /// Raised when an operation is attempted in the wrong session phase.
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    /// Raised when a position lies outside the grid.
    #[error("position {position} is outside a {side_length}x{side_length} grid")]
    OutOfBounds {
        position: Position,
        side_length: usize,
    },

    /// Raised when a grid is configured with a zero side length.
    #[error("grid side length must be at least 1, got {side_length}")]
    InvalidSideLength { side_length: usize },

    /// Raised when a layout line contains an unknown character.
    #[error("layout line {line}, column {column}: {message}")]
    LayoutParse {
        line: usize,
        column: usize,
        message: String,
    },

    /// Raised when a layout does not describe an N×N grid.
    #[error("layout must be square; found {rows} rows and a row of {columns} columns")]
    LayoutNotSquare { rows: usize, columns: usize },

    /// Raised when a layout contains more than one start or finish marker.
    #[error("layout contains more than one {state} cell (second at {position})")]
    DuplicateMarker { state: CellState, position: Position },

    /// Raised when a layout file could not be read.
    #[error("failed to read layout from {path}: {source}")]
    LayoutRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
