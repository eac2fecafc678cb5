use std::path::PathBuf;

use thiserror::Error;

use crate::grid::Coordinate;

/// Convenient result alias for the Mazebot library.
pub type Result<T> = std::result::Result<T, Error>;

/// Which end of a search an input coordinate refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::Goal => f.write_str("goal"),
        }
    }
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when grid rows do not all share the same length.
    #[error("grid row {row} has {found} cells, expected {expected}")]
    InvalidShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Raised when the start or goal lies outside the grid.
    #[error("{endpoint} {coordinate} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        coordinate: Coordinate,
        rows: usize,
        cols: usize,
    },

    /// Raised when the start or goal cell is a wall.
    #[error("{endpoint} {coordinate} is a wall")]
    WallStartOrGoal {
        endpoint: Endpoint,
        coordinate: Coordinate,
    },

    /// Raised when no path connects two valid cells.
    #[error("no path found between {start} and {goal}")]
    Unreachable { start: Coordinate, goal: Coordinate },

    /// Raised when consecutive path coordinates are not a single grid step apart.
    #[error("path step {index} from {from} to {to} is not a unit move")]
    InvalidPath {
        index: usize,
        from: Coordinate,
        to: Coordinate,
    },

    /// Raised when a direction string contains something other than N, S, E or W.
    #[error("invalid direction {found:?} at position {index}")]
    InvalidDirection { index: usize, found: char },

    /// Raised when replaying directions would leave the coordinate space.
    #[error("direction {index} leaves the grid from {from}")]
    StepOutOfRange { index: usize, from: Coordinate },

    /// Raised when a maze name does not carry a `#<number>` suffix.
    #[error("maze name {name:?} does not contain a maze number")]
    InvalidMazeName { name: String },

    /// Raised when a maze number is requested from the store but not cached.
    #[error("maze {number} is not cached at {path}")]
    MazeNotCached { number: u64, path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the maze store")]
    ProjectDirsUnavailable,

    /// Raised when the Mazebot API answers with an unexpected status code.
    #[error("API response failure: {status} from {url}")]
    ApiStatus { status: u16, url: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
