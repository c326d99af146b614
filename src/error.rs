use std::io;
use thiserror::Error;

use crate::board::MAX_CELLS;

/// Grid geometry that the bit-packed board cannot represent, or a board /
/// cell that does not fit the grid it is used with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid size must be at least 1")]
    Empty,
    #[error("a {size}x{size} grid needs {cells} bits, but boards hold at most {max}", max = MAX_CELLS)]
    TooLarge { size: usize, cells: usize },
    #[error("cell ({y}, {x}) is outside the {size}x{size} grid")]
    OutOfBounds { y: usize, x: usize, size: u8 },
    #[error("cell ({y}, {x}) is listed more than once")]
    DuplicateCell { y: u8, x: u8 },
    #[error("board {bits:#x} has lit bits outside the {size}x{size} grid")]
    StrayBits { bits: u64, size: u8 },
}

/// Error type for puzzle parsing operations.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// IO error when reading from file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Geometry of a parsed puzzle is not supported
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
    /// Invalid puzzle content
    #[error("invalid puzzle: {0}")]
    Invalid(String),
}
