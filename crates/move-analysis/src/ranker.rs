//! Single-ply move ranking.
//!
//! Every legal move is made, evaluated and unmade on the caller's position,
//! then scored with tactical and positional bonuses. The sort is stable, so
//! equal scores keep `Position::legal_moves` order. That tie-break is a
//! simplification and does not guarantee the strongest chess move.

use chess::{BitBoard, Board, ChessMove, Color, Piece, Square, EMPTY};
use chess_core::board_utils::{
    attacks, is_attacked_by, minor_piece_home, piece_name, piece_points, piece_value,
};
use chess_core::notation::serialize_move;
use chess_core::{ChessCoreError, Position};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AnalysisError, TerminalState};
use crate::evaluator::evaluate;

const CHECKMATE_BONUS: i32 = 100_000;
const CHECK_BONUS: i32 = 50;
const STALEMATE_PENALTY: i32 = 50_000;
const DEVELOPMENT_BONUS: i32 = 20;
const CENTER_BONUS: i32 = 15;
const EXTENDED_CENTER_BONUS: i32 = 8;
const CASTLING_BONUS: i32 = 40;
const PAWN_ADVANCE_STEP: i32 = 10;

/// d4, d5, e4, e5
const CENTER: BitBoard = BitBoard(0x0000_0018_1800_0000);
/// c3-f6 ring around the center
const EXTENDED_CENTER: BitBoard = BitBoard(0x0000_3C24_243C_0000);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredMove {
    #[serde(rename = "move", serialize_with = "serialize_move")]
    pub chess_move: ChessMove,
    /// Positive favours the side that made the move
    pub score: i32,
    /// Reason tags in the order they fired
    pub reasons: Vec<String>,
}

/// Why a position cannot be ranked
pub fn terminal_state(position: &Position) -> TerminalState {
    if position.is_check() {
        TerminalState::Checkmate
    } else {
        TerminalState::Stalemate
    }
}

/// Score every legal move, best first.
///
/// The position is returned unchanged. If an unmake ever disagrees with the
/// make it undoes, the position is restored from a snapshot and the call
/// fails with `EvaluationFault`.
pub fn rank_moves(position: &mut Position) -> Result<Vec<ScoredMove>, AnalysisError> {
    rank_with(position, score_move)
}

fn rank_with<F>(position: &mut Position, mut score: F) -> Result<Vec<ScoredMove>, AnalysisError>
where
    F: FnMut(&mut Position, ChessMove, i32) -> Result<ScoredMove, MoveFailure>,
{
    let moves = position.legal_moves();
    if moves.is_empty() {
        return Err(AnalysisError::NoLegalMoves(terminal_state(position)));
    }

    let snapshot = position.snapshot();
    let baseline = evaluate(position);
    debug!(fen = %position.fen(), moves = moves.len(), "Ranking moves");

    let mut scored = Vec::with_capacity(moves.len());
    for m in moves {
        match score(position, m, baseline) {
            Ok(entry) => scored.push(entry),
            Err(MoveFailure::Skipped(e)) => {
                warn!(chess_move = %m, error = %e, "Skipping move");
            }
            Err(MoveFailure::Fault(e)) => {
                position.restore(snapshot);
                return Err(AnalysisError::EvaluationFault(e.to_string()));
            }
        }
    }

    if position.snapshot() != snapshot {
        position.restore(snapshot);
        return Err(AnalysisError::EvaluationFault(
            "position changed during ranking".to_string(),
        ));
    }

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    if let Some(top) = scored.first() {
        debug!(best = %top.chess_move, score = top.score, "Ranking complete");
    }
    Ok(scored)
}

/// Top-ranked move
pub fn best(position: &mut Position) -> Result<ScoredMove, AnalysisError> {
    rank_moves(position)?
        .into_iter()
        .next()
        .ok_or_else(|| AnalysisError::EvaluationFault("every legal move was skipped".to_string()))
}

enum MoveFailure {
    /// The move was never made; the position is untouched
    Skipped(ChessCoreError),
    /// Make/unmake went out of step
    Fault(ChessCoreError),
}

fn score_move(
    position: &mut Position,
    m: ChessMove,
    baseline: i32,
) -> Result<ScoredMove, MoveFailure> {
    let before = *position.board();
    let mover = before.side_to_move();
    let captured = position.captured_by(m);
    let castling = position.is_castling(m);

    position.make(m).map_err(MoveFailure::Skipped)?;

    let mut delta = evaluate(position) - baseline;
    if mover == Color::Black {
        delta = -delta;
    }

    let mut score = delta;
    let mut reasons = Vec::new();

    if position.is_checkmate() {
        score += CHECKMATE_BONUS;
        reasons.push("delivers checkmate!".to_string());
    } else if position.is_check() {
        score += CHECK_BONUS;
        reasons.push("gives check".to_string());
    }

    if position.is_stalemate() {
        score -= STALEMATE_PENALTY;
        reasons.push("avoid stalemate".to_string());
    }

    if let Some(piece) = captured {
        score += piece_value(piece);
        reasons.push(format!(
            "captures {} (+{} points)",
            piece_name(piece),
            piece_points(piece)
        ));
    }

    let after = *position.board();
    let dest = m.get_dest();
    let moved = after.piece_on(dest);

    if let Some(piece @ (Piece::Knight | Piece::Bishop)) = moved {
        if on(minor_piece_home(piece, mover), m.get_source()) {
            score += DEVELOPMENT_BONUS;
            reasons.push("develops piece".to_string());
        }
    }

    if on(CENTER, dest) {
        score += CENTER_BONUS;
        reasons.push("controls center".to_string());
    } else if on(EXTENDED_CENTER, dest) {
        score += EXTENDED_CENTER_BONUS;
        reasons.push("supports center".to_string());
    }

    if castling {
        score += CASTLING_BONUS;
        reasons.push("castles for king safety".to_string());
    }

    if moved == Some(Piece::Pawn) {
        if let Some(bonus) = pawn_advance_bonus(mover, dest) {
            score += bonus;
            reasons.push("advances passed pawn".to_string());
        }
    }

    if let Some(piece) = moved {
        let bonus = valuable_target_bonus(&after, dest, piece, mover);
        if bonus > 0 {
            score += bonus;
            reasons.push("attacks valuable piece".to_string());
        }

        if is_attacked_by(&after, !mover, dest) {
            let value = piece_value(piece);
            let compensated = captured.is_some_and(|c| piece_value(c) >= value);
            if !compensated {
                score -= value / 2;
                reasons.push("piece may be endangered".to_string());
            }
        }
    }

    position.unmake(m).map_err(MoveFailure::Fault)?;
    if *position.board() != before {
        return Err(MoveFailure::Fault(ChessCoreError::UnmakeMismatch {
            expected: before.to_string(),
            got: position.fen(),
        }));
    }

    Ok(ScoredMove {
        chess_move: m,
        score,
        reasons,
    })
}

fn on(set: BitBoard, square: Square) -> bool {
    set & BitBoard::from_square(square) != EMPTY
}

/// Bonus for a pawn crossing the midline: ranks 5-8 for White, 4-1 for Black
fn pawn_advance_bonus(mover: Color, dest: Square) -> Option<i32> {
    let rank = dest.get_rank().to_index() as i32;
    match mover {
        Color::White if rank >= 4 => Some((rank - 3) * PAWN_ADVANCE_STEP),
        Color::Black if rank <= 3 => Some((4 - rank) * PAWN_ADVANCE_STEP),
        _ => None,
    }
}

/// Sum of `value / 10` over undefended enemy pieces worth more than the
/// mover that it now attacks, counting only terms above 10
fn valuable_target_bonus(board: &Board, from: Square, piece: Piece, mover: Color) -> i32 {
    let enemy = !mover;
    let mover_value = piece_value(piece);
    (attacks(board, from) & *board.color_combined(enemy))
        .filter_map(|sq| board.piece_on(sq).map(|target| (sq, target)))
        .filter(|&(_, target)| target != Piece::King)
        .filter(|&(_, target)| piece_value(target) > mover_value)
        .filter(|&(sq, _)| !is_attacked_by(board, enemy, sq))
        .map(|(_, target)| piece_value(target) / 10)
        .filter(|&bonus| bonus > 10)
        .sum()
}
