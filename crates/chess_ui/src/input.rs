use chess_core::{ParseSquareError, Square};
use thiserror::Error;

/// A line typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { from: Square, to: Square },
    Board,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("nothing to do, type a move like `e2e4` or `help`")]
    Empty,
    #[error(transparent)]
    Square(#[from] ParseSquareError),
    #[error("unrecognised command `{0}`, type `help`")]
    Unknown(String),
}

pub const HELP: &str = "\
Moves are typed as origin and destination squares: e2e4, e2 e4 or e2-e4.
Castle by moving the king two squares (e1g1). Pawns always promote to a queen;
a trailing promotion letter (e7e8q) is accepted and ignored.
Other commands: board, help, quit";

pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let text = line.trim();
    match text.to_ascii_lowercase().as_str() {
        "" => return Err(InputError::Empty),
        "board" | "b" => return Ok(Command::Board),
        "help" | "h" | "?" => return Ok(Command::Help),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let squares: String = text.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    let squares = match squares.len() {
        4 => squares.as_str(),
        5 if squares.ends_with(['q', 'Q']) => &squares[..4],
        _ => return Err(InputError::Unknown(text.to_string())),
    };
    if !squares.is_ascii() {
        return Err(InputError::Unknown(text.to_string()));
    }

    Ok(Command::Move {
        from: squares[..2].parse()?,
        to: squares[2..].parse()?,
    })
}
