//! Error types for board operations.

use crate::types::Square;
use thiserror::Error;

/// Errors reported by the rules engine for malformed input.
///
/// [`Board::make_move`](crate::Board::make_move) does not validate legality;
/// only coordinate parsing reports an illegal move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Text that does not name a square (`a1`..`h8`).
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    /// A move whose origin holds no piece, or lies off the board.
    #[error("no piece at source square {0}")]
    EmptySquare(Square),

    /// A move whose destination lies off the board.
    #[error("square {0:?} is off the board")]
    OffBoard(Square),

    /// Text that is not coordinate notation (`e2e4`, `e7e8q`).
    #[error("invalid move notation: {0:?}")]
    InvalidMove(String),

    /// Well-formed coordinates that match no legal move.
    #[error("illegal move: {0}")]
    IllegalMove(String),
}

/// Result type alias for rules engine operations.
pub type ChessResult<T> = Result<T, ChessError>;
