//! The single mutable game cell shared between the input loop, the display
//! and the bot.
//!
//! The engine itself only maps boards to boards. [`GameSession`] owns the
//! current board behind a mutex and keeps it locked for the whole of a
//! submit-and-reply exchange, bot search included, so nobody can observe the
//! board between the human's move and the bot's answer.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chess_core::{is_in_check, legal_moves, submit_move, Board, Color, Square};
use chess_engine::ChessAI;
use log::{debug, info};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{from}{to} is not a legal move")]
    IllegalMove { from: Square, to: Square },
    #[error("it is not {0}'s turn")]
    NotYourTurn(Color),
    #[error("the game is over")]
    GameOver,
    #[error("game state lock was poisoned by a panicking thread")]
    Poisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check but has a way out.
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

/// Status of `board` for the side to move.
///
/// The search scores mate and stalemate the same; telling them apart is only
/// done here, for the player's benefit.
pub fn game_status(board: &Board) -> GameStatus {
    let in_check = is_in_check(board);
    if legal_moves(board).is_empty() {
        if in_check {
            GameStatus::Checkmate {
                winner: board.current_turn().opposite(),
            }
        } else {
            GameStatus::Stalemate
        }
    } else if in_check {
        GameStatus::Check
    } else {
        GameStatus::Ongoing
    }
}

/// Outcome of one accepted human move.
#[derive(Debug, Clone, Copy)]
pub struct Exchange {
    /// Board right after the human's move.
    pub player: Board,
    /// Board after the bot's answer, `None` if the bot had no legal move.
    pub reply: Option<Board>,
    pub thinking: Duration,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    state: Arc<Mutex<Board>>,
    ai: ChessAI,
    human: Color,
}

impl GameSession {
    pub fn new(ai: ChessAI, human: Color) -> Self {
        Self::with_board(Board::new(), ai, human)
    }

    pub fn with_board(board: Board, ai: ChessAI, human: Color) -> Self {
        Self {
            state: Arc::new(Mutex::new(board)),
            ai,
            human,
        }
    }

    pub fn human(&self) -> Color {
        self.human
    }

    pub fn ai(&self) -> &ChessAI {
        &self.ai
    }

    fn lock(&self) -> Result<MutexGuard<'_, Board>, SessionError> {
        self.state.lock().map_err(|_| SessionError::Poisoned)
    }

    /// Copy of the current board. Blocks while the bot is thinking.
    pub fn snapshot(&self) -> Result<Board, SessionError> {
        Ok(*self.lock()?)
    }

    pub fn status(&self) -> Result<GameStatus, SessionError> {
        Ok(game_status(&*self.lock()?))
    }

    /// Lets the bot move if it is its turn, for example to open the game when
    /// the human plays Black. Returns the new board, or `None` when it is not
    /// the bot's turn or it has no legal move.
    pub fn bot_move(&self) -> Result<Option<Board>, SessionError> {
        let mut state = self.lock()?;
        if state.current_turn() == self.human {
            return Ok(None);
        }
        Ok(self.reply_locked(&mut state).0)
    }

    /// Plays the human's move `from`-`to` and then the bot's answer.
    ///
    /// An illegal move leaves the board as it was.
    pub fn submit(&self, from: Square, to: Square) -> Result<Exchange, SessionError> {
        let mut state = self.lock()?;
        if state.current_turn() != self.human {
            return Err(SessionError::NotYourTurn(self.human));
        }

        let Some(player) = submit_move(&state, from, to) else {
            return Err(if legal_moves(&state).is_empty() {
                SessionError::GameOver
            } else {
                SessionError::IllegalMove { from, to }
            });
        };
        info!("{} played {}{}", self.human, from, to);
        *state = player;

        let (reply, thinking) = self.reply_locked(&mut state);
        Ok(Exchange {
            player,
            reply,
            thinking,
        })
    }

    fn reply_locked(&self, state: &mut MutexGuard<'_, Board>) -> (Option<Board>, Duration) {
        let start_time = Instant::now();
        let reply = self.ai.get_move(&**state);
        let thinking = start_time.elapsed();
        debug!("bot thought for {:?} at depth {}", thinking, self.ai.depth());

        if reply == **state {
            return (None, thinking);
        }
        **state = reply;
        (Some(reply), thinking)
    }
}
