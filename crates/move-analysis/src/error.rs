//! Analysis error types

use chess_core::ChessCoreError;
use serde::Serialize;
use thiserror::Error;

/// Why a position has no legal moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalState {
    Checkmate,
    Stalemate,
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No legal moves: {0:?}")]
    NoLegalMoves(TerminalState),

    #[error("Unparsable move: {0}")]
    UnparsableMove(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Evaluation fault: {0}")]
    EvaluationFault(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chess error: {0}")]
    Chess(#[from] ChessCoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
