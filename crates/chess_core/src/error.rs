//! Error types for the rules core.
//!
//! Only [`ChessError::InvalidMoveRequest`] is expected during play; the rest
//! come from parsing coordinates and FEN fixtures.

use thiserror::Error;

use crate::types::Square;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The requested origin/destination pair is not in the current legal set.
    #[error("Illegal move request: {from}{to}")]
    InvalidMoveRequest { from: Square, to: Square },

    #[error("Invalid square: {0:?}")]
    InvalidSquare(String),

    /// Two-square notation such as `e2e4` could not be parsed.
    #[error("Invalid move notation: {0:?}")]
    InvalidNotation(String),

    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// Result type alias for rules-core operations
pub type ChessResult<T> = Result<T, ChessError>;
