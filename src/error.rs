//! Error types for grid loading, path search and command handling.

use grid_util::point::Point;
use thiserror::Error;

/// Raised when the textual grid description is malformed.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("grid is empty")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },

    #[error("grid has no boat")]
    MissingBoat,

    #[error("grid has more than one boat")]
    MultipleBoats,

    #[error("grid has no treasure")]
    MissingTreasure,

    #[error("grid has more than one treasure")]
    MultipleTreasures,

    #[error("could not read grid: {0}")]
    Io(#[from] std::io::Error),
}

/// Extraction from a [PriorityQueue](crate::queue::PriorityQueue) without any items.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("remove_min called on an empty queue")]
pub struct EmptyQueueError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("no path from {start} to {target}")]
    NoPathFound { start: Point, target: Point },

    #[error("gave up on {start} to {target} after {limit} expansions")]
    ExpansionLimit {
        start: Point,
        target: Point,
        limit: usize,
    },

    #[error("{0} is not a navigable cell of the grid")]
    InvalidEndpoint(Point),

    #[error(transparent)]
    EmptyQueue(#[from] EmptyQueueError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("GO needs a direction")]
    MissingDirection,

    #[error("unknown direction {0:?}")]
    UnknownDirection(String),
}
