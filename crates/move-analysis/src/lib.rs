pub use chess;
pub use chess_core;

pub mod cli;
pub mod config;
pub mod consensus;
pub mod error;
pub mod evaluator;
pub mod markers;
pub mod ranker;
pub mod rationale;

pub use config::{AnalysisConfig, OutputFormat};
pub use consensus::{compare, Candidate, Comparator, ConsensusReport};
pub use error::{AnalysisError, TerminalState};
pub use evaluator::evaluate;
pub use ranker::{best, rank_moves, ScoredMove};
pub use rationale::{explain, explain_reference, recommend, Recommendation};
