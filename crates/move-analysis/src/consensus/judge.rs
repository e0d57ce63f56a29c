//! Per-candidate classification, similarity and issue detection

use chess::{Board, BoardStatus, ChessMove, Piece};
use chess_core::board_utils::{
    captured_piece, cheapest_attacker_value, is_attacked_by, piece_name, piece_points,
    piece_value, square_distance,
};
use chess_core::notation::parse_move;
use chess_core::Position;
use tracing::warn;

use super::{Candidate, CandidateJudgment, CandidateStatus, Issue};
use crate::markers::is_unavailable;

const BASE_SIMILARITY: u8 = 30;
const SAME_PIECE_SIMILARITY: u8 = 20;
const MAX_ALTERNATIVE_SIMILARITY: u8 = 99;

/// The reference move, if it is available, parseable and legal
pub fn parse_reference(position: &Position, raw: &str, markers: &[String]) -> Option<ChessMove> {
    if is_unavailable(raw, markers) {
        return None;
    }
    parse_move(position.board(), raw)
        .ok()
        .filter(|m| position.is_legal(*m))
}

pub fn judge_candidate(
    position: &Position,
    reference: Option<ChessMove>,
    candidate: &Candidate,
    markers: &[String],
) -> CandidateJudgment {
    // Judge against a private copy
    let position = position.clone();
    let judgment = |parsed_move, status, issues, similarity_score| CandidateJudgment {
        source_name: candidate.name.clone(),
        raw_move: candidate.raw_move.clone(),
        parsed_move,
        status,
        issues,
        similarity_score,
    };

    if is_unavailable(&candidate.raw_move, markers) {
        return judgment(None, CandidateStatus::Unavailable, Vec::new(), 0);
    }

    let m = match parse_move(position.board(), &candidate.raw_move) {
        Ok(m) => m,
        Err(_) => return judgment(None, CandidateStatus::Unavailable, Vec::new(), 0),
    };

    if !position.is_legal(m) {
        warn!(
            source = %candidate.name,
            chess_move = %m,
            fen = %position.fen(),
            "Candidate suggested an illegal move"
        );
        return judgment(Some(m), CandidateStatus::Illegal, vec![Issue::IllegalMove], 0);
    }

    if reference == Some(m) {
        return judgment(Some(m), CandidateStatus::ExactMatch, Vec::new(), 100);
    }

    let board = position.board();
    let score = similarity(board, reference, m);
    let issues = detect_issues(board, reference, m);
    if issues.contains(&Issue::SelfCheck) {
        warn!(source = %candidate.name, chess_move = %m, "Legal move left own king in check");
    }
    judgment(Some(m), CandidateStatus::LegalAlternative, issues, score)
}

/// Similarity of a legal, non-identical move to the reference
pub fn similarity(board: &Board, reference: Option<ChessMove>, candidate: ChessMove) -> u8 {
    let reference = match reference {
        Some(r) => r,
        None => return BASE_SIMILARITY,
    };

    let mut score = BASE_SIMILARITY;
    let ref_piece = board.piece_on(reference.get_source());
    let cand_piece = board.piece_on(candidate.get_source());
    if ref_piece.is_some() && ref_piece == cand_piece {
        score += SAME_PIECE_SIMILARITY;
    }

    score += match square_distance(reference.get_dest(), candidate.get_dest()) {
        0 => 50,
        1 => 30,
        2 => 15,
        _ => 0,
    };

    score.min(MAX_ALTERNATIVE_SIMILARITY)
}

/// Tactical problems of `candidate` relative to the reference move
pub fn detect_issues(board: &Board, reference: Option<ChessMove>, candidate: ChessMove) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mover = board.side_to_move();
    let after = board.make_move_new(candidate);

    if is_attacked_by(&after, !mover, after.king_square(mover)) {
        issues.push(Issue::SelfCheck);
    }

    if let Some(issue) = hang_issue(board, &after, candidate) {
        issues.push(issue);
    }

    let reference = match reference {
        Some(r) => r,
        None => return issues,
    };
    let reference_after = board.make_move_new(reference);
    let candidate_checks = after.checkers().popcnt() > 0;

    if reference_after.status() == BoardStatus::Checkmate {
        if after.status() != BoardStatus::Checkmate {
            issues.push(Issue::MissesCheckmate);
        }
    } else if reference_after.checkers().popcnt() > 0 && !candidate_checks {
        issues.push(Issue::MissesCheck);
    }

    if let Some(piece) = captured_piece(board, reference) {
        if captured_piece(board, candidate).is_none() {
            issues.push(Issue::MissesCapture {
                piece: piece_name(piece),
            });
        }
    }

    issues
}

/// A quiet move onto a square the opponent attacks, without a recapture
/// that makes the exchange even
fn hang_issue(before: &Board, after: &Board, candidate: ChessMove) -> Option<Issue> {
    if captured_piece(before, candidate).is_some() {
        return None;
    }
    let piece = before.piece_on(candidate.get_source())?;
    if piece == Piece::King {
        return None;
    }

    let mover = before.side_to_move();
    let dest = candidate.get_dest();
    let cheapest = cheapest_attacker_value(after, !mover, dest)?;

    let defended = is_attacked_by(after, mover, dest);
    if defended && cheapest >= piece_value(piece) {
        return None;
    }

    Some(Issue::Hangs {
        piece: piece_name(piece),
        points: piece_points(piece),
    })
}
