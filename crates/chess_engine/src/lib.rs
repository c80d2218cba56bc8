pub mod ai;
pub mod difficulty;
pub mod evaluation;
pub mod search;

pub use ai::{select_reply, ChessAI};
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use evaluation::{evaluate_position, Score, DRAW_SCORE};
pub use search::{alpha_beta, minimax, ALPHA_INIT, BETA_INIT};
