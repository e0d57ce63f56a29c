//! Integration tests: position model round trips and input loading.

mod common;

use chess::Color;
use chess_core::{InputFormat, Position};
use common::{mirror_fen, position, SAMPLE_FENS, START_FEN};

#[test]
fn test_make_unmake_two_ply_round_trip() {
    for fen in SAMPLE_FENS {
        let mut pos = position(fen);
        let original = pos.clone();

        for m in original.legal_moves() {
            pos.make(m).unwrap();
            let after_first = pos.clone();
            for reply in after_first.legal_moves() {
                pos.make(reply).unwrap();
                pos.unmake(reply).unwrap();
                assert_eq!(pos, after_first, "{fen}: {m} {reply}");
            }
            pos.unmake(m).unwrap();
            assert_eq!(pos, original, "{fen}: {m}");
        }
        assert_eq!(pos.depth(), 0);
    }
}

#[test]
fn test_legal_move_order_is_stable() {
    for fen in SAMPLE_FENS {
        let a = position(fen).legal_moves();
        let b = position(fen).legal_moves();
        assert_eq!(a, b, "{fen}");
        assert_eq!(a.len(), position(fen).legal_move_count(), "{fen}");
    }
}

#[test]
fn test_mirror_helper() {
    assert_eq!(mirror_fen(START_FEN), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
    let mirrored = position(&mirror_fen(
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
    ));
    assert_eq!(mirrored.side_to_move(), Color::Black);
    for fen in SAMPLE_FENS {
        assert_eq!(mirror_fen(&mirror_fen(fen)), *fen);
    }
}

#[test]
fn test_pgn_and_fen_inputs_agree() {
    let pgn = r#"[Event "Training"]
[Site "?"]

1. e4 e5 2. Nf3 Nc6 {main line} 3. Bc4 (3. Bb5 a6) Nf6 4. O-O *"#;
    let from_pgn = Position::from_input(pgn, InputFormat::Pgn).unwrap();
    let from_fen = Position::from_input(
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4",
        InputFormat::Fen,
    )
    .unwrap();
    assert_eq!(from_pgn.board(), from_fen.board());
}
