pub use chess;

pub mod board_utils;
pub mod error;
pub mod input;
pub mod notation;
pub mod pgn;
pub mod position;

pub use error::ChessCoreError;
pub use input::InputFormat;
pub use position::{Position, Snapshot};
