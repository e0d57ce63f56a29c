//! Static evaluation, always from White's point of view.
//!
//! Material plus pawn/knight square tables, a king-exposure term and a
//! mobility term. Bishops, rooks, queens and kings contribute material only.

use chess::{Board, Color, MoveGen, Piece, ALL_SQUARES};
use chess_core::board_utils::{attackers, move_count_for, piece_value};
use chess_core::Position;

/// Indexed a1 = 0 .. h8 = 63. Black looks up `square ^ 56`.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

const KING_ATTACKER_PENALTY: i32 = 10;
const MOBILITY_WEIGHT: i32 = 2;

pub fn evaluate(position: &Position) -> i32 {
    evaluate_board(position.board())
}

pub fn evaluate_board(board: &Board) -> i32 {
    material_and_tables(board) + king_safety(board) + mobility(board)
}

fn square_bonus(piece: Piece, color: Color, index: usize) -> i32 {
    let index = match color {
        Color::White => index,
        Color::Black => index ^ 56,
    };
    match piece {
        Piece::Pawn => PAWN_TABLE[index],
        Piece::Knight => KNIGHT_TABLE[index],
        _ => 0,
    }
}

fn material_and_tables(board: &Board) -> i32 {
    let mut score = 0;
    for sq in ALL_SQUARES.iter().copied() {
        let (piece, color) = match (board.piece_on(sq), board.color_on(sq)) {
            (Some(p), Some(c)) => (p, c),
            _ => continue,
        };
        let value = piece_value(piece) + square_bonus(piece, color, sq.to_index());
        match color {
            Color::White => score += value,
            Color::Black => score -= value,
        }
    }
    score
}

fn king_safety(board: &Board) -> i32 {
    let white_king = board.king_square(Color::White);
    let black_king = board.king_square(Color::Black);

    let white_exposure = attackers(board, Color::Black, white_king).popcnt() as i32;
    let black_exposure = attackers(board, Color::White, black_king).popcnt() as i32;

    (black_exposure - white_exposure) * KING_ATTACKER_PENALTY
}

/// Own legal-move count against the opponent's, probed on a turn-toggled
/// copy. While in check the null move is refused, so the checking side's
/// moves are counted straight off the board instead.
fn mobility(board: &Board) -> i32 {
    let own = MoveGen::new_legal(board).len() as i32;
    if own == 0 {
        return 0;
    }
    let opponent = match board.null_move() {
        Some(toggled) => MoveGen::new_legal(&toggled).len(),
        None => move_count_for(board, !board.side_to_move()),
    } as i32;

    let relative = (own - opponent) * MOBILITY_WEIGHT;
    match board.side_to_move() {
        Color::White => relative,
        Color::Black => -relative,
    }
}
