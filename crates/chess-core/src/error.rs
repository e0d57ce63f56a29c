//! Position and notation error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessCoreError {
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("Invalid PGN format - could not parse game")]
    InvalidPgn,

    #[error("Illegal move in PGN: {0}")]
    IllegalPgnMove(String),

    #[error("Pattern error: {0}")]
    Pattern(String),

    #[error("Unparsable move: {0}")]
    UnparsableMove(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Unmake mismatch: last move was {expected}, asked to unmake {got}")]
    UnmakeMismatch { expected: String, got: String },

    #[error("Unmake called with no move to undo")]
    EmptyHistory,

    #[error("Unknown input format: {0}")]
    UnknownInputFormat(String),
}
