//! Command-line arguments for the `move-analysis` binary

use chess_core::InputFormat;

use crate::config::OutputFormat;
use crate::consensus::Candidate;
use crate::error::AnalysisError;

pub const USAGE: &str = "usage: move-analysis (--fen <FEN> | --pgn <FILE>) \
[--reference <MOVE>] [--candidate NAME=MOVE]... [--format json|text]";

/// Where the position comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSource {
    Fen(String),
    PgnFile(String),
}

impl PositionSource {
    pub fn format(&self) -> InputFormat {
        match self {
            PositionSource::Fen(_) => InputFormat::Fen,
            PositionSource::PgnFile(_) => InputFormat::Pgn,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub source: PositionSource,
    /// Reference engine move; absent means the reference is unavailable
    pub reference: Option<String>,
    pub candidates: Vec<Candidate>,
    pub format: Option<OutputFormat>,
}

/// Parse arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<CliArgs, AnalysisError> {
    let mut source = None;
    let mut reference = None;
    let mut candidates = Vec::new();
    let mut format = None;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| AnalysisError::Config(format!("{flag} needs a value")))
        };
        match flag.as_str() {
            "--fen" => source = Some(PositionSource::Fen(value()?)),
            "--pgn" => source = Some(PositionSource::PgnFile(value()?)),
            "--reference" => reference = Some(value()?),
            "--candidate" => {
                let pair = value()?;
                let (name, raw_move) = pair.split_once('=').ok_or_else(|| {
                    AnalysisError::Config(format!("--candidate expects NAME=MOVE, got {pair:?}"))
                })?;
                candidates.push(Candidate::new(name.trim(), raw_move.trim()));
            }
            "--format" => format = Some(value()?.parse::<OutputFormat>()?),
            other => {
                return Err(AnalysisError::Config(format!(
                    "unknown argument {other:?}\n{USAGE}"
                )))
            }
        }
    }

    let source = source.ok_or_else(|| AnalysisError::Config(USAGE.to_string()))?;
    Ok(CliArgs {
        source,
        reference,
        candidates,
        format,
    })
}
