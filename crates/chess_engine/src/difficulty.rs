use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Human-facing strength levels. Each level searches one ply deeper than the
/// one before it, so the top level is by far the slowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Beginner,
    #[default]
    Novice,
    Easy,
    Hard,
    Challenging,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}`, expected a level from 1 to 5 or its name")]
pub struct ParseDifficultyError(String);

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Beginner,
        Difficulty::Novice,
        Difficulty::Easy,
        Difficulty::Hard,
        Difficulty::Challenging,
    ];

    pub fn from_level(level: u8) -> Option<Self> {
        Self::ALL.get(usize::from(level).checked_sub(1)?).copied()
    }

    /// Menu number, 1 for the weakest level.
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Novice => 2,
            Difficulty::Easy => 3,
            Difficulty::Hard => 4,
            Difficulty::Challenging => 5,
        }
    }

    /// Plies searched from the root, counting the bot's own move.
    pub fn depth(self) -> u8 {
        self.level()
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Novice => "novice",
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
            Difficulty::Challenging => "challenging",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if let Ok(level) = text.parse::<u8>() {
            return Self::from_level(level).ok_or_else(|| ParseDifficultyError(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(text))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}
