use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A board coordinate. Both fields are 0-based: file 0 is the a-file,
/// rank 0 is White's back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSquareError {
    #[error("square must be two characters like `e4`, got `{0}`")]
    BadLength(String),
    #[error("file must be a letter from a to h, got `{0}`")]
    BadFile(char),
    #[error("rank must be a digit from 1 to 8, got `{0}`")]
    BadRank(char),
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Square at `index` in a1, b1, .., h1, a2, .. order.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Self {
                file: (index % 8) as u8,
                rank: (index / 8) as u8,
            })
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    /// All 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }

    /// The square `(file_delta, rank_delta)` away, if it is still on the board.
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    pub fn from_algebraic(notation: &str) -> Result<Self, ParseSquareError> {
        let mut chars = notation.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return Err(ParseSquareError::BadLength(notation.to_string())),
        };

        let file_lower = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file_lower) {
            return Err(ParseSquareError::BadFile(file));
        }
        if !('1'..='8').contains(&rank) {
            return Err(ParseSquareError::BadRank(rank));
        }

        Ok(Self {
            file: file_lower as u8 - b'a',
            rank: rank as u8 - b'1',
        })
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}
