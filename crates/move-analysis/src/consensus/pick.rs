//! Consensus pick across the reference and the usable candidates.
//!
//! Precedence: unanimous, then strict-plurality majority, then the
//! reference as tie-breaker, then the first usable candidate in input order.

use chess::ChessMove;
use chess_core::notation::serialize_opt_move;
use serde::Serialize;

use super::{CandidateJudgment, CandidateStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusKind {
    Unanimous,
    Majority,
    SplitDecision,
    FirstAvailable,
    NoConsensus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusPick {
    pub kind: ConsensusKind,
    #[serde(rename = "move", serialize_with = "serialize_opt_move")]
    pub chess_move: Option<ChessMove>,
    /// Sources that proposed the picked move, in input order
    pub supporters: Vec<String>,
    pub votes: usize,
    /// Number of sources with a usable move
    pub voters: usize,
}

/// Votes grouped by move, in order of first appearance
fn tally<'a>(votes: &[(&'a str, ChessMove)]) -> Vec<(ChessMove, Vec<&'a str>)> {
    let mut groups: Vec<(ChessMove, Vec<&'a str>)> = Vec::new();
    for &(name, m) in votes {
        match groups.iter_mut().find(|(g, _)| *g == m) {
            Some((_, names)) => names.push(name),
            None => groups.push((m, vec![name])),
        }
    }
    groups
}

pub fn select_consensus(
    reference_name: &str,
    reference: Option<ChessMove>,
    judgments: &[CandidateJudgment],
) -> ConsensusPick {
    let mut votes: Vec<(&str, ChessMove)> = Vec::new();
    if let Some(r) = reference {
        votes.push((reference_name, r));
    }
    votes.extend(judgments.iter().filter_map(|j| match (j.status, j.parsed_move) {
        (CandidateStatus::ExactMatch | CandidateStatus::LegalAlternative, Some(m)) => {
            Some((j.source_name.as_str(), m))
        }
        _ => None,
    }));

    let voters = votes.len();
    let pick = |kind, chess_move: Option<ChessMove>, supporters: Vec<&str>| ConsensusPick {
        kind,
        chess_move,
        votes: supporters.len(),
        supporters: supporters.into_iter().map(String::from).collect(),
        voters,
    };

    let groups = tally(&votes);
    if groups.is_empty() {
        return pick(ConsensusKind::NoConsensus, None, Vec::new());
    }
    if let [(m, names)] = groups.as_slice() {
        return pick(ConsensusKind::Unanimous, Some(*m), names.clone());
    }

    let top = groups.iter().map(|(_, names)| names.len()).max().unwrap_or(0);
    let leaders: Vec<&(ChessMove, Vec<&str>)> =
        groups.iter().filter(|(_, names)| names.len() == top).collect();
    if let [(m, names)] = leaders.as_slice() {
        if top > 1 {
            return pick(ConsensusKind::Majority, Some(*m), names.clone());
        }
    }

    let fallback = |m: ChessMove| {
        groups
            .iter()
            .find(|(g, _)| *g == m)
            .map(|(_, names)| names.clone())
            .unwrap_or_default()
    };
    match reference {
        Some(r) => pick(ConsensusKind::SplitDecision, Some(r), fallback(r)),
        None => {
            let (_, first) = votes[0];
            pick(ConsensusKind::FirstAvailable, Some(first), fallback(first))
        }
    }
}
