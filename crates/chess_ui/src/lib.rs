//! Terminal front end: reads moves from a line-based input, lets the bot
//! answer and prints the board after every exchange.

pub mod input;
pub mod render;
pub mod session;

use std::io::{self, BufRead, Write};

use chess_core::{Board, Color};
use chess_engine::{ChessAI, Difficulty};
use log::{info, warn};
use thiserror::Error;

pub use input::{parse_command, Command, InputError, HELP};
pub use render::{describe_status, render_board};
pub use session::{game_status, Exchange, GameSession, GameStatus, SessionError};

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub ai: ChessAI,
    pub human: Color,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            ai: ChessAI::default(),
            human: Color::White,
        }
    }
}

#[derive(Debug, Error)]
pub enum UiError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Plays one game on `input`/`output` until it ends, the player quits or the
/// input runs dry.
pub fn run<R: BufRead, W: Write>(config: UiConfig, mut input: R, mut output: W) -> Result<(), UiError> {
    let session = GameSession::new(config.ai, config.human);
    let human = session.human();
    info!("New game, human plays {} against depth {}", human, session.ai().depth());

    writeln!(output, "You play {} against the bot (search depth {}).", human, session.ai().depth())?;
    writeln!(output, "{}", HELP)?;

    if let Some(opening) = session.bot_move()? {
        write_bot_move(&mut output, &opening, None)?;
    }
    write!(output, "\n{}", render_board(&session.snapshot()?, human))?;

    let mut line = String::new();
    loop {
        if let Some(text) = describe_status(session.status()?) {
            writeln!(output, "{}", text)?;
        }
        if session.status()?.is_over() {
            break;
        }

        write!(output, "{}> ", human)?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{}", err)?;
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Board => write!(output, "{}", render_board(&session.snapshot()?, human))?,
            Command::Move { from, to } => match session.submit(from, to) {
                Ok(exchange) => match exchange.reply {
                    Some(reply) => {
                        write_bot_move(&mut output, &reply, Some(exchange))?;
                        write!(output, "{}", render_board(&reply, human))?;
                    }
                    None => write!(output, "{}", render_board(&exchange.player, human))?,
                },
                Err(SessionError::Poisoned) => return Err(SessionError::Poisoned.into()),
                Err(err) => writeln!(output, "{}", err)?,
            },
        }
    }

    writeln!(output, "Goodbye.")?;
    Ok(())
}

fn write_bot_move<W: Write>(output: &mut W, board: &Board, exchange: Option<Exchange>) -> io::Result<()> {
    let Some(mv) = board.last_move() else {
        return Ok(());
    };
    match exchange {
        Some(exchange) => writeln!(output, "Bot plays {} (thought for {:.2?})", mv, exchange.thinking),
        None => writeln!(output, "Bot plays {}", mv),
    }
}

/// Asks for a difficulty level on `output` and reads the answer from `input`.
/// Anything that is not a valid level picks the default.
pub fn prompt_difficulty<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Difficulty> {
    writeln!(output, "Choose a difficulty:")?;
    for difficulty in Difficulty::ALL {
        writeln!(output, "  {}. {}", difficulty.level(), difficulty)?;
    }
    writeln!(output, "Warning: {} can take a long time per move.", Difficulty::Challenging)?;
    write!(output, "Level [{}]: ", Difficulty::default().level())?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    if answer.trim().is_empty() {
        return Ok(Difficulty::default());
    }
    Ok(answer.parse().unwrap_or_else(|err| {
        warn!("{}, using {}", err, Difficulty::default());
        Difficulty::default()
    }))
}
