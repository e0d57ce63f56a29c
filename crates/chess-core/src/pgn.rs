//! PGN loading: lightweight regex-based parser that replays the mainline.

use chess::Board;
use regex::Regex;

use crate::error::ChessCoreError;
use crate::notation::parse_san_move;
use crate::position::Position;

fn pattern(re: &str) -> Result<Regex, ChessCoreError> {
    Regex::new(re).map_err(|e| ChessCoreError::Pattern(e.to_string()))
}

/// Extract SAN moves from PGN text (after removing headers, comments, variations).
pub fn extract_moves(pgn: &str) -> Result<Vec<String>, ChessCoreError> {
    let no_headers = pattern(r"\[[^\]]*\]")?.replace_all(pgn, "");
    let no_comments = pattern(r"\{[^}]*\}")?.replace_all(&no_headers, "");
    let no_variations = pattern(r"\([^)]*\)")?.replace_all(&no_comments, "");

    let move_re =
        pattern(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O|O-O")?;

    Ok(move_re
        .find_iter(&no_variations)
        .map(|m| m.as_str().to_string())
        .collect())
}

/// Extract a string value from a PGN header (e.g. FEN, SetUp).
pub fn extract_header(pgn: &str, header_name: &str) -> Option<String> {
    let re = pattern(&format!(r#"\[{}\s+"([^"]*)"\]"#, regex::escape(header_name))).ok()?;
    let value = re.captures(pgn)?.get(1)?.as_str().to_string();
    if value.is_empty() { None } else { Some(value) }
}

/// Replay a PGN mainline and return the final position.
/// A `[SetUp "1"]` game starts from its `[FEN]` header.
pub fn position_from_pgn(pgn: &str) -> Result<Position, ChessCoreError> {
    let moves = extract_moves(pgn)?;
    let has_headers = pattern(r#"\[\w+\s+"[^"]*"\]"#)?.is_match(pgn);
    if moves.is_empty() && !has_headers {
        return Err(ChessCoreError::InvalidPgn);
    }

    let start_fen = match extract_header(pgn, "SetUp").as_deref() {
        Some("1") => extract_header(pgn, "FEN"),
        _ => None,
    };
    let mut board = match start_fen {
        Some(fen) => *Position::from_fen(&fen)?.board(),
        None => Board::default(),
    };

    for san in &moves {
        let m = parse_san_move(&board, san)
            .map_err(|_| ChessCoreError::IllegalPgnMove(san.clone()))?;
        board = board.make_move_new(m);
    }

    Ok(Position::new(board))
}
