//! Mutable position with make/unmake on top of the `chess` crate's copy-make `Board`.
//!
//! `make` pushes the prior board onto an undo stack, `unmake` pops it, so a
//! round trip restores side to move, castling rights and the en-passant
//! target exactly.

use std::cmp::Reverse;
use std::str::FromStr;

use chess::{BitBoard, Board, BoardStatus, ChessMove, Color, MoveGen, Piece, Square};

use crate::board_utils;
use crate::error::ChessCoreError;

/// Restore point for a `Position`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    board: Board,
    depth: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: Board,
    history: Vec<(Board, ChessMove)>,
}

impl Default for Position {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

impl Position {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            history: Vec::new(),
        }
    }

    /// Parse a FEN string
    pub fn from_fen(fen: &str) -> Result<Self, ChessCoreError> {
        let board = Board::from_str(fen.trim())
            .map_err(|e| ChessCoreError::InvalidFen(format!("{fen}: {e}")))?;
        Ok(Self::new(board))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        match (self.board.piece_on(square), self.board.color_on(square)) {
            (Some(piece), Some(color)) => Some((piece, color)),
            _ => None,
        }
    }

    /// Legal moves in a fixed order: piece moves before pawn moves, each
    /// group from the highest origin square down, then highest destination
    /// down, promotions ordered queen, rook, bishop, knight.
    pub fn legal_moves(&self) -> Vec<ChessMove> {
        let mut moves: Vec<ChessMove> = MoveGen::new_legal(&self.board).collect();
        moves.sort_by_key(|m| {
            let is_pawn = self.board.piece_on(m.get_source()) == Some(Piece::Pawn);
            (
                is_pawn,
                Reverse(m.get_source().to_index()),
                Reverse(m.get_dest().to_index()),
                promotion_order(m.get_promotion()),
            )
        });
        moves
    }

    pub fn legal_move_count(&self) -> usize {
        MoveGen::new_legal(&self.board).len()
    }

    pub fn is_legal(&self, m: ChessMove) -> bool {
        self.board.legal(m)
    }

    /// Play a legal move, remembering the prior state
    pub fn make(&mut self, m: ChessMove) -> Result<(), ChessCoreError> {
        if !self.board.legal(m) {
            return Err(ChessCoreError::IllegalMove(m.to_string()));
        }
        let next = self.board.make_move_new(m);
        self.history.push((self.board, m));
        self.board = next;
        Ok(())
    }

    /// Undo the most recent move. `m` must be the move that was made.
    pub fn unmake(&mut self, m: ChessMove) -> Result<(), ChessCoreError> {
        match self.history.last() {
            None => Err(ChessCoreError::EmptyHistory),
            Some((_, last)) if *last != m => Err(ChessCoreError::UnmakeMismatch {
                expected: last.to_string(),
                got: m.to_string(),
            }),
            Some(_) => {
                if let Some((previous, _)) = self.history.pop() {
                    self.board = previous;
                }
                Ok(())
            }
        }
    }

    /// Number of moves currently made on top of the base position
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            depth: self.history.len(),
        }
    }

    /// Return to a snapshot taken earlier on this position
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.history.truncate(snapshot.depth);
        self.board = snapshot.board;
    }

    pub fn status(&self) -> BoardStatus {
        self.board.status()
    }

    pub fn is_check(&self) -> bool {
        self.board.checkers().popcnt() > 0
    }

    pub fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.board.status() == BoardStatus::Stalemate
    }

    pub fn is_castling(&self, m: ChessMove) -> bool {
        board_utils::is_castling_move(&self.board, m)
    }

    pub fn is_en_passant(&self, m: ChessMove) -> bool {
        board_utils::is_en_passant_move(&self.board, m)
    }

    /// Piece taken by `m` in this position, if any
    pub fn captured_by(&self, m: ChessMove) -> Option<Piece> {
        board_utils::captured_piece(&self.board, m)
    }

    pub fn attackers(&self, color: Color, square: Square) -> BitBoard {
        board_utils::attackers(&self.board, color, square)
    }

    pub fn is_attacked_by(&self, color: Color, square: Square) -> bool {
        board_utils::is_attacked_by(&self.board, color, square)
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.board.king_square(color)
    }

    /// The same placement with the other side to move, without touching
    /// this position. `None` while the side to move is in check.
    pub fn turn_toggled(&self) -> Option<Board> {
        self.board.null_move()
    }
}

fn promotion_order(promotion: Option<Piece>) -> u8 {
    match promotion {
        None => 0,
        Some(Piece::Queen) => 1,
        Some(Piece::Rook) => 2,
        Some(Piece::Bishop) => 3,
        Some(Piece::Knight) => 4,
        Some(_) => 5,
    }
}
