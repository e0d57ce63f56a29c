#![allow(dead_code)]

use std::str::FromStr;

use chess::ChessMove;
use chess_core::Position;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A spread of openings, middlegames, endgames and special-move positions.
pub const SAMPLE_FENS: &[&str] = &[
    START_FEN,
    "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    "r3k2r/pppq1ppp/2n5/3pP3/8/2N5/PPP2PPP/R3K2R w KQkq d6 0 10",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "4k3/1P6/8/8/8/8/6p1/4K3 w - - 0 1",
    "4k3/8/8/8/8/8/4r3/4K3 w - - 0 1",
];

pub fn position(fen: &str) -> Position {
    Position::from_fen(fen).unwrap_or_else(|e| panic!("invalid FEN {fen}: {e}"))
}

pub fn mv(uci: &str) -> ChessMove {
    ChessMove::from_str(uci).unwrap_or_else(|_| panic!("invalid UCI move: {uci}"))
}

/// Flip the board vertically and swap colors, so White's position becomes
/// Black's. Side to move, castling rights and en passant follow.
pub fn mirror_fen(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();

    let placement: Vec<String> = fields[0]
        .split('/')
        .rev()
        .map(swap_case)
        .collect();
    let side = if fields[1] == "w" { "b" } else { "w" };

    let castling = if fields[2] == "-" {
        "-".to_string()
    } else {
        let swapped = swap_case(fields[2]);
        ['K', 'Q', 'k', 'q']
            .iter()
            .filter(|c| swapped.contains(**c))
            .collect()
    };

    let en_passant = match fields[3].as_bytes() {
        [file, b'3'] => format!("{}6", *file as char),
        [file, b'6'] => format!("{}3", *file as char),
        _ => "-".to_string(),
    };

    format!(
        "{} {} {} {} {} {}",
        placement.join("/"),
        side,
        castling,
        en_passant,
        fields.get(4).unwrap_or(&"0"),
        fields.get(5).unwrap_or(&"1")
    )
}

fn swap_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}
