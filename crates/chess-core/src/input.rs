//! Position input formats accepted by the loaders

use std::fmt;
use std::str::FromStr;

use crate::error::ChessCoreError;
use crate::pgn;
use crate::position::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Fen,
    Pgn,
}

impl FromStr for InputFormat {
    type Err = ChessCoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fen" => Ok(InputFormat::Fen),
            "pgn" => Ok(InputFormat::Pgn),
            other => Err(ChessCoreError::UnknownInputFormat(other.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Fen => write!(f, "fen"),
            InputFormat::Pgn => write!(f, "pgn"),
        }
    }
}

impl Position {
    /// Final position of a PGN game
    pub fn from_pgn(pgn: &str) -> Result<Self, ChessCoreError> {
        pgn::position_from_pgn(pgn)
    }

    pub fn from_input(input: &str, format: InputFormat) -> Result<Self, ChessCoreError> {
        match format {
            InputFormat::Fen => Self::from_fen(input),
            InputFormat::Pgn => Self::from_pgn(input),
        }
    }
}
