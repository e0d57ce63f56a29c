//! Move notation: UCI coordinates and SAN, parsed against a board

use chess::{Board, ChessMove, MoveGen, Piece, Square};
use serde::Serializer;

use crate::board_utils::square_at;
use crate::error::ChessCoreError;

/// Parse a UCI-like coordinate move (`e2e4`, `e7e8q`).
/// Purely structural: the result may still be illegal.
pub fn parse_uci_move(uci: &str) -> Option<ChessMove> {
    let bytes = uci.trim().as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return None;
    }

    let from = coordinate(bytes[0], bytes[1])?;
    let to = coordinate(bytes[2], bytes[3])?;

    let promotion = match bytes.get(4) {
        None => None,
        Some(b'q' | b'Q') => Some(Piece::Queen),
        Some(b'r' | b'R') => Some(Piece::Rook),
        Some(b'b' | b'B') => Some(Piece::Bishop),
        Some(b'n' | b'N') => Some(Piece::Knight),
        Some(_) => return None,
    };

    Some(ChessMove::new(from, to, promotion))
}

fn coordinate(file: u8, rank: u8) -> Option<Square> {
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some(square_at((file - b'a') as usize, (rank - b'1') as usize))
}

/// Find the legal move matching a SAN string
pub fn parse_san_move(board: &Board, san: &str) -> Result<ChessMove, ChessCoreError> {
    let unparsable = || ChessCoreError::UnparsableMove(san.to_string());
    let clean = san
        .trim()
        .trim_end_matches(|c: char| c == '+' || c == '#' || c == '!' || c == '?');

    let legal_moves: Vec<ChessMove> = MoveGen::new_legal(board).collect();

    // Castling: king moving two files
    let castle_direction = match clean {
        "O-O" | "0-0" => Some(true),
        "O-O-O" | "0-0-0" => Some(false),
        _ => None,
    };
    if let Some(kingside) = castle_direction {
        return legal_moves
            .into_iter()
            .find(|m| {
                let src = m.get_source().get_file().to_index() as i32;
                let dst = m.get_dest().get_file().to_index() as i32;
                board.piece_on(m.get_source()) == Some(Piece::King)
                    && if kingside { dst - src == 2 } else { src - dst == 2 }
            })
            .ok_or_else(unparsable);
    }

    let bytes = clean.as_bytes();
    if bytes.is_empty() {
        return Err(unparsable());
    }

    let (piece, rest) = match bytes[0] {
        b'K' => (Piece::King, &clean[1..]),
        b'Q' => (Piece::Queen, &clean[1..]),
        b'R' => (Piece::Rook, &clean[1..]),
        b'B' => (Piece::Bishop, &clean[1..]),
        b'N' => (Piece::Knight, &clean[1..]),
        b'a'..=b'h' => (Piece::Pawn, clean),
        _ => return Err(unparsable()),
    };

    let (rest, promotion) = match rest.find('=') {
        Some(eq_pos) => {
            let promo = match rest.as_bytes().get(eq_pos + 1) {
                Some(b'Q') => Piece::Queen,
                Some(b'R') => Piece::Rook,
                Some(b'B') => Piece::Bishop,
                Some(b'N') => Piece::Knight,
                _ => return Err(unparsable()),
            };
            (&rest[..eq_pos], Some(promo))
        }
        None => (rest, None),
    };

    let rest = rest.replace('x', "");
    let rest_bytes = rest.as_bytes();
    if rest_bytes.len() < 2 {
        return Err(unparsable());
    }

    let dest = coordinate(
        rest_bytes[rest_bytes.len() - 2],
        rest_bytes[rest_bytes.len() - 1],
    )
    .ok_or_else(unparsable)?;
    let disambig = &rest_bytes[..rest_bytes.len() - 2];

    let candidates: Vec<ChessMove> = legal_moves
        .into_iter()
        .filter(|m| {
            m.get_dest() == dest
                && board.piece_on(m.get_source()) == Some(piece)
                && m.get_promotion() == promotion
        })
        .filter(|m| {
            let src = m.get_source();
            disambig.iter().all(|&b| match b {
                b'a'..=b'h' => src.get_file().to_index() == (b - b'a') as usize,
                b'1'..=b'8' => src.get_rank().to_index() == (b - b'1') as usize,
                _ => false,
            })
        })
        .collect();

    match candidates.as_slice() {
        [only] => Ok(*only),
        _ => Err(unparsable()),
    }
}

/// Parse a move in either UCI or SAN against `board`.
/// UCI results are structural; SAN results are always legal.
pub fn parse_move(board: &Board, raw: &str) -> Result<ChessMove, ChessCoreError> {
    let trimmed = raw.trim();
    if let Some(m) = parse_uci_move(trimmed) {
        return Ok(m);
    }
    parse_san_move(board, trimmed)
}

pub fn move_to_uci(m: ChessMove) -> String {
    m.to_string()
}

/// Serde helper: write a move as its UCI string
pub fn serialize_move<S: Serializer>(m: &ChessMove, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(m)
}

/// Serde helper for optional moves
pub fn serialize_opt_move<S: Serializer>(
    m: &Option<ChessMove>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match m {
        Some(m) => serializer.collect_str(m),
        None => serializer.serialize_none(),
    }
}
