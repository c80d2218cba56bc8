use chess_core::{legal_moves, Board, Color};
use log::{debug, info};
use rayon::prelude::*;
use std::time::Instant;

use crate::difficulty::Difficulty;
use crate::evaluation::Score;
use crate::search::{alpha_beta, ALPHA_INIT, BETA_INIT};

const MIN_DEPTH: u8 = 1;
const MAX_DEPTH: u8 = 6; // Each extra ply costs roughly 20-30x the time

/// The bot: picks a reply by searching every legal move to a fixed depth.
///
/// `ChessAI` holds no game state. Callers keep the current board themselves
/// and must not publish a new one while [`ChessAI::get_move`] runs, which can
/// take seconds at the higher depths and cannot be interrupted.
#[derive(Debug, Clone)]
pub struct ChessAI {
    max_depth: u8,
    parallel: bool,
}

impl ChessAI {
    pub fn new(depth: u8) -> Self {
        ChessAI {
            max_depth: depth.clamp(MIN_DEPTH, MAX_DEPTH),
            parallel: false,
        }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(difficulty.depth())
    }

    /// Scores the root moves on the rayon pool instead of one after another.
    /// The chosen move is the same either way.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn depth(&self) -> u8 {
        self.max_depth
    }

    /// Returns the board after the bot's reply.
    ///
    /// If the side to move has no legal move the input board comes back
    /// unchanged; comparing the result with the input is how callers notice.
    /// Among equally scored replies the first one generated wins.
    pub fn get_move(&self, board: &Board) -> Board {
        let start_time = Instant::now();

        let candidates = legal_moves(board);
        if candidates.is_empty() {
            info!("No legal reply for {}", board.current_turn());
            return *board;
        }

        let child_depth = self.max_depth - 1;
        let score = |candidate: &Board| alpha_beta(candidate, child_depth, ALPHA_INIT, BETA_INIT);
        let scores: Vec<Score> = if self.parallel {
            candidates.par_iter().map(score).collect()
        } else {
            candidates.iter().map(score).collect()
        };

        let best = best_index(board.current_turn(), &scores);
        debug!(
            "Chose {:?} with score {} out of {} replies at depth {} in {:?}",
            candidates[best].last_move(),
            scores[best],
            candidates.len(),
            self.max_depth,
            start_time.elapsed()
        );
        candidates[best]
    }
}

impl Default for ChessAI {
    fn default() -> Self {
        ChessAI::with_difficulty(Difficulty::default())
    }
}

/// Board after the bot's reply to `board`, searching `depth` plies.
pub fn select_reply(board: &Board, depth: u8) -> Board {
    ChessAI::new(depth).get_move(board)
}

// White takes the highest score, Black the lowest; ties keep the earlier index
fn best_index(turn: Color, scores: &[Score]) -> usize {
    let mut best = 0;
    for (index, &score) in scores.iter().enumerate().skip(1) {
        let better = match turn {
            Color::White => score > scores[best],
            Color::Black => score < scores[best],
        };
        if better {
            best = index;
        }
    }
    best
}
