use std::io::{self, Write};

use anyhow::Result;
use chess_core::Color;
use chess_engine::{ChessAI, Difficulty};
use chess_ui::UiConfig;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "chess-bot", about = "Play chess against a minimax bot in the terminal")]
struct Args {
    /// Level 1-5 or its name; asks interactively when omitted
    #[arg(short, long, env = "CHESS_DIFFICULTY")]
    difficulty: Option<Difficulty>,

    /// Search depth in plies, overrides the difficulty (clamped to 1-6)
    #[arg(long, env = "CHESS_DEPTH")]
    depth: Option<u8>,

    #[arg(long, value_enum, default_value = "white", env = "CHESS_PLAY_AS")]
    play_as: Side,

    /// Score the bot's candidate moves on all cores
    #[arg(long, env = "CHESS_PARALLEL")]
    parallel: bool,

    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new().parse_filters(&args.log_level).init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    let ai = match (args.depth, args.difficulty) {
        (Some(depth), _) => ChessAI::new(depth),
        (None, Some(difficulty)) => ChessAI::with_difficulty(difficulty),
        (None, None) => ChessAI::with_difficulty(chess_ui::prompt_difficulty(&mut input, &mut output)?),
    };
    log::info!("Starting game at depth {}", ai.depth());
    output.flush()?;

    let config = UiConfig {
        ai: ai.parallel(args.parallel),
        human: args.play_as.into(),
    };
    chess_ui::run(config, input, output)?;
    Ok(())
}
