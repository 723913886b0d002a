//! Error types for the conversions at the engine boundary.
//!
//! The engine operations themselves never fail; these errors only come from
//! turning untrusted input (text, raw codes, external grids) into engine types.

/// Unrecognized direction input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDirectionError {
    #[error("unknown direction: {0:?}")]
    Unknown(String),
    #[error("invalid direction code: {0} (expected 0-3)")]
    InvalidCode(u8),
}

/// A grid that does not satisfy the board invariants.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid tile {value} at ({row}, {col}): must be 0 or a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: u32 },
    #[error("tile {value} at ({row}, {col}) exceeds the largest tile {max}")]
    TileTooLarge { row: usize, col: usize, value: u32, max: u32 },
}
