//! Multi-source move comparison.
//!
//! One reference move (the authoritative engine) and any number of named
//! candidate moves are judged against the same position. Each candidate is
//! classified, scored for similarity to the reference and checked for
//! tactical issues; the report then picks a single consensus move.

pub mod judge;
pub mod pick;
pub mod summary;

use std::fmt;

use chess::ChessMove;
use chess_core::notation::serialize_opt_move;
use chess_core::Position;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::rationale::explain_reference;

pub use judge::{judge_candidate, parse_reference, similarity};
pub use pick::{select_consensus, ConsensusKind, ConsensusPick};
pub use summary::{standings, summarize, AgreementSummary, Disagreement, Standing, Verdict};

/// A named move source and what it answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub raw_move: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, raw_move: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_move: raw_move.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    ExactMatch,
    LegalAlternative,
    Illegal,
    Unavailable,
}

/// Problems found with a candidate move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    IllegalMove,
    /// Leaves the mover's own king attacked. Cannot happen for a legal move.
    SelfCheck,
    Hangs { piece: &'static str, points: i32 },
    MissesCheckmate,
    MissesCheck,
    MissesCapture { piece: &'static str },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::IllegalMove => write!(
                f,
                "AI suggested an illegal move — indicates a serious logic error."
            ),
            Issue::SelfCheck => write!(f, "puts own king in check (illegal)"),
            Issue::Hangs { piece, points } => {
                write!(f, "hangs the {piece} (loses {points} points)")
            }
            Issue::MissesCheckmate => write!(f, "misses immediate checkmate"),
            Issue::MissesCheck => write!(f, "misses a check"),
            Issue::MissesCapture { piece } => write!(f, "misses capture of {piece}"),
        }
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateJudgment {
    pub source_name: String,
    pub raw_move: String,
    #[serde(serialize_with = "serialize_opt_move")]
    pub parsed_move: Option<ChessMove>,
    pub status: CandidateStatus,
    pub issues: Vec<Issue>,
    /// 0..=100, 100 only for an exact match
    pub similarity_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceMove {
    pub name: String,
    pub raw_move: String,
    /// Set only when the reference answered with a legal move
    #[serde(serialize_with = "serialize_opt_move")]
    pub parsed_move: Option<ChessMove>,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusReport {
    pub reference: ReferenceMove,
    pub judgments: Vec<CandidateJudgment>,
    pub pick: ConsensusPick,
    pub standings: Vec<Standing>,
    pub summary: AgreementSummary,
}

impl ConsensusReport {
    /// One-line description of how the pick was reached
    pub fn explanation(&self) -> String {
        let p = &self.pick;
        let shown = p.chess_move.map(|m| m.to_string()).unwrap_or_default();
        match p.kind {
            ConsensusKind::Unanimous => {
                format!("UNANIMOUS CONSENSUS - All {} sources recommend: {shown}", p.voters)
            }
            ConsensusKind::Majority => format!(
                "MAJORITY CONSENSUS - {}/{} sources recommend: {shown} (supporting: {})",
                p.votes,
                p.voters,
                p.supporters.join(", ")
            ),
            ConsensusKind::SplitDecision => format!(
                "SPLIT DECISION - Using {} recommendation: {shown}",
                self.reference.name
            ),
            ConsensusKind::FirstAvailable => {
                format!("NO CONSENSUS - Sources split, showing first valid: {shown}")
            }
            ConsensusKind::NoConsensus => "No consensus possible".to_string(),
        }
    }
}

/// Judges candidates against a named reference source
#[derive(Debug, Clone)]
pub struct Comparator {
    reference_name: String,
    extra_markers: Vec<String>,
}

impl Default for Comparator {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl Comparator {
    pub fn new(reference_name: impl Into<String>) -> Self {
        Self {
            reference_name: reference_name.into(),
            extra_markers: Vec::new(),
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            reference_name: config.reference_name.clone(),
            extra_markers: config.unavailable_markers.clone(),
        }
    }

    pub fn reference_name(&self) -> &str {
        &self.reference_name
    }

    /// Additional strings to treat as "no move"
    pub fn with_markers(mut self, markers: Vec<String>) -> Self {
        self.extra_markers = markers;
        self
    }

    /// Judge every candidate and pick a consensus move. Each candidate is
    /// judged on its own copy of `position`; one bad candidate never affects
    /// another.
    pub fn compare(
        &self,
        position: &Position,
        reference_move: &str,
        candidates: &[Candidate],
    ) -> ConsensusReport {
        let reference_parsed = parse_reference(position, reference_move, &self.extra_markers);
        let reference = ReferenceMove {
            name: self.reference_name.clone(),
            raw_move: reference_move.to_string(),
            parsed_move: reference_parsed,
            explanation: explain_reference(position, reference_move, &self.reference_name),
        };

        let judgments: Vec<CandidateJudgment> = candidates
            .iter()
            .map(|c| judge_candidate(position, reference_parsed, c, &self.extra_markers))
            .collect();

        let pick = select_consensus(&self.reference_name, reference_parsed, &judgments);
        let standings = standings(&reference, &judgments);
        let summary = summarize(&judgments);

        debug!(
            reference = %reference_move,
            candidates = judgments.len(),
            kind = ?pick.kind,
            "Consensus computed"
        );

        ConsensusReport {
            reference,
            judgments,
            pick,
            standings,
            summary,
        }
    }
}

/// Compare with the default reference name and markers
pub fn compare(position: &Position, reference_move: &str, candidates: &[Candidate]) -> ConsensusReport {
    Comparator::default().compare(position, reference_move, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(pairs: &[(&str, &str)]) -> Vec<Candidate> {
        pairs.iter().map(|(n, m)| Candidate::new(*n, *m)).collect()
    }

    #[test]
    fn test_issue_display() {
        assert_eq!(
            Issue::Hangs { piece: "knight", points: 3 }.to_string(),
            "hangs the knight (loses 3 points)"
        );
        assert_eq!(
            Issue::MissesCapture { piece: "queen" }.to_string(),
            "misses capture of queen"
        );
        assert_eq!(
            Issue::IllegalMove.to_string(),
            "AI suggested an illegal move — indicates a serious logic error."
        );
    }

    #[test]
    fn test_compare_with_illegal_candidate() {
        let pos = Position::default();
        let report = compare(
            &pos,
            "e2e4",
            &candidates(&[("A", "e2e4"), ("B", "e7e5"), ("C", "d2d4")]),
        );

        let a = &report.judgments[0];
        assert_eq!(a.status, CandidateStatus::ExactMatch);
        assert_eq!(a.similarity_score, 100);
        assert!(a.issues.is_empty());

        let b = &report.judgments[1];
        assert_eq!(b.status, CandidateStatus::Illegal);
        assert_eq!(b.similarity_score, 0);
        assert_eq!(b.issues, vec![Issue::IllegalMove]);

        let c = &report.judgments[2];
        assert_eq!(c.status, CandidateStatus::LegalAlternative);
        assert_eq!(c.similarity_score, 80);

        assert_eq!(report.pick.kind, ConsensusKind::Majority);
        assert_eq!(report.pick.chess_move.map(|m| m.to_string()).as_deref(), Some("e2e4"));
        assert_eq!(report.pick.supporters, vec!["Stockfish", "A"]);
        assert_eq!(
            report.explanation(),
            "MAJORITY CONSENSUS - 2/3 sources recommend: e2e4 (supporting: Stockfish, A)"
        );
    }

    #[test]
    fn test_report_explanations() {
        let pos = Position::default();
        let unanimous = compare(&pos, "e2e4", &candidates(&[("A", "e4"), ("B", "N/A")]));
        assert_eq!(
            unanimous.explanation(),
            "UNANIMOUS CONSENSUS - All 2 sources recommend: e2e4"
        );

        let split = Comparator::new("Leela").compare(
            &pos,
            "e2e4",
            &candidates(&[("A", "d2d4"), ("B", "g1f3")]),
        );
        assert_eq!(split.explanation(), "SPLIT DECISION - Using Leela recommendation: e2e4");

        let first = compare(
            &pos,
            "Engine not available",
            &candidates(&[("A", "d2d4"), ("B", "g1f3")]),
        );
        assert_eq!(
            first.explanation(),
            "NO CONSENSUS - Sources split, showing first valid: d2d4"
        );

        let none = compare(&pos, "", &candidates(&[("A", "error")]));
        assert_eq!(none.explanation(), "No consensus possible");
        assert_eq!(none.pick.chess_move, None);
    }

    #[test]
    fn test_configured_markers() {
        let pos = Position::default();
        let comparator = Comparator::new("Stockfish").with_markers(vec!["timeout".to_string()]);
        let report = comparator.compare(&pos, "e2e4", &candidates(&[("A", "Timeout")]));
        assert_eq!(report.judgments[0].status, CandidateStatus::Unavailable);
        assert_eq!(report.summary.unavailable, vec!["A"]);
    }

    #[test]
    fn test_report_serializes() {
        let pos = Position::default();
        let report = compare(&pos, "e2e4", &candidates(&[("A", "d2d4")]));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["reference"]["parsed_move"], "e2e4");
        assert_eq!(json["judgments"][0]["status"], "legal_alternative");
        assert_eq!(json["standings"][0]["rank"], 1);
        assert_eq!(json["pick"]["kind"], "split_decision");
    }
}
