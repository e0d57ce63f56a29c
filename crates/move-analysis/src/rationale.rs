//! Human-readable explanations for recommended moves

use chess::{BoardStatus, ChessMove};
use chess_core::board_utils::piece_name;
use chess_core::notation::{parse_move, serialize_opt_move};
use chess_core::Position;
use serde::Serialize;

use crate::error::{AnalysisError, TerminalState};
use crate::markers::is_unavailable;
use crate::ranker::{best, ScoredMove};

const MAX_REASONS: usize = 3;
const FALLBACK_EXPLANATION: &str =
    "This move optimizes the position based on advanced chess principles.";

pub const NO_LEGAL_MOVES: &str = "No legal moves available";

/// Compose the explanation sentence from the first three reason tags
pub fn explain(scored: &ScoredMove) -> String {
    if scored.reasons.is_empty() {
        return FALLBACK_EXPLANATION.to_string();
    }
    let shown: Vec<&str> = scored
        .reasons
        .iter()
        .take(MAX_REASONS)
        .map(String::as_str)
        .collect();
    let mut explanation = format!("This move {}.", shown.join(", "));
    if scored.reasons.len() > MAX_REASONS {
        let points = scored.score.div_euclid(10);
        explanation.push_str(&format!(" (Evaluation: {points:+} points)"));
    }
    explanation
}

/// Explain the reference source's move from what it does on the board
pub fn explain_reference(position: &Position, raw_move: &str, reference_name: &str) -> String {
    if is_unavailable(raw_move, &[]) {
        return "Analysis could not be completed.".to_string();
    }
    let m = match parse_move(position.board(), raw_move) {
        Ok(m) if position.is_legal(m) => m,
        _ => return "Professional engine recommendation.".to_string(),
    };

    let mut facts = Vec::new();
    if let Some(piece) = position.board().piece_on(m.get_dest()) {
        facts.push(format!("captures {}", piece_name(piece)));
    }

    let after = position.board().make_move_new(m);
    match after.status() {
        BoardStatus::Checkmate => facts.push("delivers checkmate".to_string()),
        _ if after.checkers().popcnt() > 0 => facts.push("gives check".to_string()),
        _ => {}
    }

    if position.is_castling(m) {
        facts.push("castles for king safety".to_string());
    } else if position.is_en_passant(m) {
        facts.push("captures en passant".to_string());
    }

    if is_center(m) {
        facts.push("controls center".to_string());
    }

    if facts.is_empty() {
        format!("{reference_name} evaluates this as the strongest move in the position.")
    } else {
        format!(
            "{reference_name} recommends this move because it {}.",
            facts.join(", ")
        )
    }
}

fn is_center(m: ChessMove) -> bool {
    let dest = m.get_dest();
    (3..=4).contains(&dest.get_file().to_index()) && (3..=4).contains(&dest.get_rank().to_index())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "state", rename_all = "snake_case")]
pub enum Outcome {
    Move,
    Terminal(TerminalState),
    Failed,
}

/// One source's answer for a position, always displayable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub engine_name: String,
    /// UCI move, or a message the comparator treats as unavailable
    #[serde(rename = "move")]
    pub move_text: String,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_opt_move")]
    pub parsed_move: Option<ChessMove>,
    pub explanation: String,
    pub score: Option<i32>,
    pub reasons: Vec<String>,
    pub outcome: Outcome,
}

/// Run the ranker and package its answer. Never fails: terminal positions and
/// ranking errors become recommendations with no move.
pub fn recommend(position: &mut Position, engine_name: &str) -> Recommendation {
    match best(position) {
        Ok(top) => Recommendation {
            engine_name: engine_name.to_string(),
            move_text: top.chess_move.to_string(),
            parsed_move: Some(top.chess_move),
            explanation: explain(&top),
            score: Some(top.score),
            reasons: top.reasons,
            outcome: Outcome::Move,
        },
        Err(AnalysisError::NoLegalMoves(state)) => Recommendation {
            engine_name: engine_name.to_string(),
            move_text: NO_LEGAL_MOVES.to_string(),
            parsed_move: None,
            explanation: match state {
                TerminalState::Checkmate => "No legal moves in this position: checkmate.",
                TerminalState::Stalemate => "No legal moves in this position: stalemate.",
            }
            .to_string(),
            score: None,
            reasons: Vec::new(),
            outcome: Outcome::Terminal(state),
        },
        Err(e) => {
            tracing::warn!(engine = engine_name, error = %e, "Ranking failed");
            Recommendation {
                engine_name: engine_name.to_string(),
                move_text: format!("Analysis failed: {e}"),
                parsed_move: None,
                explanation: "Analysis error occurred.".to_string(),
                score: None,
                reasons: Vec::new(),
                outcome: Outcome::Failed,
            }
        }
    }
}
