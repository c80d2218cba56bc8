// Fixed-depth game tree search over successor boards.
//
// White is the maximising side and Black the minimising side, matching the
// sign convention of `evaluate_position`.
use chess_core::{Board, Color, MoveGenerator};
use crate::evaluation::{evaluate_position, Score, DRAW_SCORE};

// Root window, wide enough that it never prunes a real line
pub const ALPHA_INIT: Score = Score::NEG_INFINITY;
pub const BETA_INIT: Score = Score::INFINITY;

/// Minimax value of `board` searched `depth` plies deep, with alpha-beta
/// pruning.
///
/// At depth 0 this is the static evaluation. A position without legal moves
/// scores [`DRAW_SCORE`] whether the side to move is mated or stalemated, so
/// the search does not steer towards or away from mate.
///
/// With a full `(ALPHA_INIT, BETA_INIT)` window the result equals
/// [`minimax`]; inside a narrower window only the side of the window the true
/// value lies on is exact.
pub fn alpha_beta(board: &Board, depth: u8, mut alpha: Score, mut beta: Score) -> Score {
    if depth == 0 {
        return evaluate_position(board);
    }

    let mut replies = MoveGenerator::legal(*board).peekable();
    if replies.peek().is_none() {
        return DRAW_SCORE;
    }

    match board.current_turn() {
        Color::White => {
            let mut value = ALPHA_INIT;
            for reply in replies {
                value = value.max(alpha_beta(&reply, depth - 1, alpha, beta));
                alpha = alpha.max(value);
                // Black already has something better elsewhere
                if beta <= alpha {
                    break;
                }
            }
            value
        }
        Color::Black => {
            let mut value = BETA_INIT;
            for reply in replies {
                value = value.min(alpha_beta(&reply, depth - 1, alpha, beta));
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        }
    }
}

/// Full-width minimax with the same leaf and terminal rules as
/// [`alpha_beta`], visiting every node.
pub fn minimax(board: &Board, depth: u8) -> Score {
    if depth == 0 {
        return evaluate_position(board);
    }

    let scores = MoveGenerator::legal(*board).map(|reply| minimax(&reply, depth - 1));
    let best = match board.current_turn() {
        Color::White => scores.fold(None, |best: Option<Score>, score| Some(best.map_or(score, |b| b.max(score)))),
        Color::Black => scores.fold(None, |best: Option<Score>, score| Some(best.map_or(score, |b| b.min(score)))),
    };
    best.unwrap_or(DRAW_SCORE)
}
