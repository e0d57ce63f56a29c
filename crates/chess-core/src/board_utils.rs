//! Board utility functions: piece values, attack maps, square geometry

use chess::{BitBoard, Board, ChessMove, Color, File, Piece, Rank, Square, EMPTY};

// Piece values in centipawns
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
/// "Never trade the king" sentinel. Not part of net material.
pub const KING_VALUE: i32 = 20_000;

/// Material value in centipawns (king counts as zero)
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => 0,
    }
}

/// Piece value including the king sentinel
pub fn king_value(piece: Piece) -> i32 {
    match piece {
        Piece::King => KING_VALUE,
        other => piece_value(other),
    }
}

/// Whole-pawn points (1/3/3/5/9), as shown to humans
pub fn piece_points(piece: Piece) -> i32 {
    piece_value(piece) / 100
}

/// Lowercase English name of a piece kind
pub fn piece_name(piece: Piece) -> &'static str {
    match piece {
        Piece::Pawn => "pawn",
        Piece::Knight => "knight",
        Piece::Bishop => "bishop",
        Piece::Rook => "rook",
        Piece::Queen => "queen",
        Piece::King => "king",
    }
}

/// Get squares attacked by the piece standing on `square`
pub fn attacks(board: &Board, square: Square) -> BitBoard {
    let (piece, color) = match (board.piece_on(square), board.color_on(square)) {
        (Some(p), Some(c)) => (p, c),
        _ => return EMPTY,
    };

    match piece {
        Piece::Pawn => pawn_attacks(square, color),
        Piece::Knight => chess::get_knight_moves(square),
        Piece::King => chess::get_king_moves(square),
        Piece::Bishop => chess::get_bishop_moves(square, *board.combined()),
        Piece::Rook => chess::get_rook_moves(square, *board.combined()),
        Piece::Queen => {
            chess::get_bishop_moves(square, *board.combined())
                | chess::get_rook_moves(square, *board.combined())
        }
    }
}

/// Pawn attack squares (diagonals only, not pushes)
pub fn pawn_attacks(square: Square, color: Color) -> BitBoard {
    let file = square.get_file().to_index();
    let rank = square.get_rank().to_index();

    let target_rank = match color {
        Color::White if rank < 7 => rank + 1,
        Color::Black if rank > 0 => rank - 1,
        _ => return EMPTY,
    };

    let mut result = EMPTY;
    if file > 0 {
        result |= BitBoard::from_square(Square::make_square(
            Rank::from_index(target_rank),
            File::from_index(file - 1),
        ));
    }
    if file < 7 {
        result |= BitBoard::from_square(Square::make_square(
            Rank::from_index(target_rank),
            File::from_index(file + 1),
        ));
    }
    result
}

/// All pieces of `color` that attack `square`
pub fn attackers(board: &Board, color: Color, square: Square) -> BitBoard {
    let occupied = *board.combined();
    let color_pieces = *board.color_combined(color);
    let diagonal = *board.pieces(Piece::Bishop) | *board.pieces(Piece::Queen);
    let straight = *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);

    // Pawns: reverse lookup from the target square with the opposite color
    let mut result = pawn_attacks(square, !color) & *board.pieces(Piece::Pawn);
    result |= chess::get_knight_moves(square) & *board.pieces(Piece::Knight);
    result |= chess::get_king_moves(square) & *board.pieces(Piece::King);
    result |= chess::get_bishop_moves(square, occupied) & diagonal;
    result |= chess::get_rook_moves(square, occupied) & straight;

    result & color_pieces
}

/// Is `square` attacked by any piece of `color`?
pub fn is_attacked_by(board: &Board, color: Color, square: Square) -> bool {
    attackers(board, color, square) != EMPTY
}

/// Lowest material value among the pieces of `color` attacking `square`
pub fn cheapest_attacker_value(board: &Board, color: Color, square: Square) -> Option<i32> {
    attackers(board, color, square)
        .filter_map(|sq| board.piece_on(sq))
        .map(king_value)
        .min()
}

/// Move count for `color` regardless of whose turn it is.
///
/// Pieces move to every attacked square not holding a friendly piece, the
/// king only to squares the other side does not attack. Pawns push one or
/// two squares and capture enemy pieces; a promotion counts four times.
/// Pins, castling and en passant are ignored. Board state is not touched.
pub fn move_count_for(board: &Board, color: Color) -> usize {
    let own = *board.color_combined(color);
    let enemy = *board.color_combined(!color);
    let occupied = *board.combined();

    let mut count = 0;
    for square in own {
        let Some(piece) = board.piece_on(square) else {
            continue;
        };
        match piece {
            Piece::Pawn => count += pawn_move_count(square, color, occupied, enemy),
            Piece::King => {
                count += (attacks(board, square) & !own)
                    .filter(|&to| !is_attacked_by(board, !color, to))
                    .count();
            }
            _ => count += (attacks(board, square) & !own).popcnt() as usize,
        }
    }
    count
}

fn pawn_move_count(square: Square, color: Color, occupied: BitBoard, enemy: BitBoard) -> usize {
    let (start_rank, last_rank) = match color {
        Color::White => (Rank::Second, Rank::Eighth),
        Color::Black => (Rank::Seventh, Rank::First),
    };
    let per_target = |to: Square| if to.get_rank() == last_rank { 4 } else { 1 };
    let free = |to: Square| occupied & BitBoard::from_square(to) == EMPTY;

    let mut count: usize = (pawn_attacks(square, color) & enemy).map(per_target).sum();
    if let Some(one) = square.forward(color).filter(|&to| free(to)) {
        count += per_target(one);
        if square.get_rank() == start_rank {
            if let Some(two) = one.forward(color).filter(|&to| free(to)) {
                count += per_target(two);
            }
        }
    }
    count
}

/// Chebyshev distance between two squares
pub fn square_distance(s1: Square, s2: Square) -> u32 {
    let r1 = s1.get_rank().to_index() as i32;
    let r2 = s2.get_rank().to_index() as i32;
    let f1 = s1.get_file().to_index() as i32;
    let f2 = s2.get_file().to_index() as i32;
    (r1 - r2).unsigned_abs().max((f1 - f2).unsigned_abs())
}

/// King moving two files is castling
pub fn is_castling_move(board: &Board, m: ChessMove) -> bool {
    if board.piece_on(m.get_source()) != Some(Piece::King) {
        return false;
    }
    let from_file = m.get_source().get_file().to_index() as i32;
    let to_file = m.get_dest().get_file().to_index() as i32;
    (from_file - to_file).abs() > 1
}

/// Pawn moving diagonally onto an empty square
pub fn is_en_passant_move(board: &Board, m: ChessMove) -> bool {
    board.piece_on(m.get_source()) == Some(Piece::Pawn)
        && m.get_source().get_file() != m.get_dest().get_file()
        && board.piece_on(m.get_dest()).is_none()
}

/// Piece captured by `m` on `board`, counting en passant as a pawn capture
pub fn captured_piece(board: &Board, m: ChessMove) -> Option<Piece> {
    board.piece_on(m.get_dest()).or_else(|| {
        if is_en_passant_move(board, m) {
            Some(Piece::Pawn)
        } else {
            None
        }
    })
}

/// Home squares of the minor pieces for one color
pub fn minor_piece_home(piece: Piece, color: Color) -> BitBoard {
    let rank = match color {
        Color::White => Rank::First,
        Color::Black => Rank::Eighth,
    };
    let files: &[File] = match piece {
        Piece::Knight => &[File::B, File::G],
        Piece::Bishop => &[File::C, File::F],
        _ => &[],
    };
    files.iter().fold(EMPTY, |acc, &file| {
        acc | BitBoard::from_square(Square::make_square(rank, file))
    })
}

/// Build a square from 0-based file and rank indices
pub fn square_at(file: usize, rank: usize) -> Square {
    Square::make_square(Rank::from_index(rank), File::from_index(file))
}
