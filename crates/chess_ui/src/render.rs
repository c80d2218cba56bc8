use chess_core::{Board, Color, Square};

use crate::session::GameStatus;

/// Draws `board` as text with `perspective`'s pieces at the bottom. The
/// squares of the last move are bracketed.
pub fn render_board(board: &Board, perspective: Color) -> String {
    let ranks: Vec<u8> = match perspective {
        Color::White => (0..8).rev().collect(),
        Color::Black => (0..8).collect(),
    };
    let files: Vec<u8> = match perspective {
        Color::White => (0..8).collect(),
        Color::Black => (0..8).rev().collect(),
    };
    let highlighted = board.last_move().map(|mv| [mv.from, mv.to]);

    let mut out = String::new();
    for &rank in &ranks {
        out.push_str(&format!("{} ", rank + 1));
        for &file in &files {
            let Some(square) = Square::new(file, rank) else {
                continue;
            };
            let symbol = board.get_piece(square).map_or('.', |piece| piece.symbol());
            if highlighted.map_or(false, |squares| squares.contains(&square)) {
                out.push_str(&format!("[{}]", symbol));
            } else {
                out.push_str(&format!(" {} ", symbol));
            }
        }
        out.push('\n');
    }
    out.push_str("  ");
    for &file in &files {
        out.push_str(&format!(" {} ", (b'a' + file) as char));
    }
    out.push('\n');
    out
}

pub fn describe_status(status: GameStatus) -> Option<String> {
    match status {
        GameStatus::Ongoing => None,
        GameStatus::Check => Some("Check!".to_string()),
        GameStatus::Checkmate { winner } => Some(format!("Checkmate, {} wins.", winner)),
        GameStatus::Stalemate => Some("Stalemate.".to_string()),
    }
}
