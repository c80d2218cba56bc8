use std::fmt;

use log::debug;

use crate::{
    piece::PieceType,
    Board, MoveGenerator, Square,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub move_type: MoveType,
    pub promotion: Option<PieceType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveType {
    Normal,
    Capture,
    /// Pawn advance of two squares from its starting rank.
    DoublePush,
    EnPassant,
    Castle,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self::with_type(from, to, MoveType::Normal)
    }

    pub fn capture(from: Square, to: Square) -> Self {
        Self::with_type(from, to, MoveType::Capture)
    }

    pub fn castle(from: Square, to: Square) -> Self {
        Self::with_type(from, to, MoveType::Castle)
    }

    pub fn with_type(from: Square, to: Square, move_type: MoveType) -> Self {
        Self {
            from,
            to,
            move_type,
            promotion: None,
        }
    }

    pub fn promoting_to(mut self, promotion: Option<PieceType>) -> Self {
        self.promotion = promotion;
        self
    }

    /// Works out what kind of move "the piece on `from` goes to `to`" is, the
    /// way a player dragging a piece means it.
    ///
    /// The answer is only a guess at intent: a king stepping two files from
    /// the e-file is taken as castling and a pawn stepping diagonally onto an
    /// empty square as en passant, whether or not either is allowed here.
    /// Returns `None` when `from` is empty.
    pub fn classify(board: &Board, from: Square, to: Square) -> Option<Self> {
        let piece = board.get_piece(from)?;
        let target = board.get_piece(to);
        let plain = if target.is_some() {
            Self::capture(from, to)
        } else {
            Self::new(from, to)
        };

        let mv = match piece.piece_type {
            PieceType::King if from.file == 4 && from.rank == to.rank && (to.file == 6 || to.file == 2) => {
                Self::castle(from, to)
            }
            PieceType::Pawn => {
                let color = piece.color;
                let promotion = (to.rank == color.promotion_rank()).then_some(PieceType::Queen);
                let double_push_target = from.offset(0, 2 * color.pawn_direction());
                if from.rank == color.pawn_rank() && Some(to) == double_push_target {
                    Self::with_type(from, to, MoveType::DoublePush)
                } else if from.file != to.file && target.is_none() {
                    Self::with_type(from, to, MoveType::EnPassant)
                } else {
                    plain.promoting_to(promotion)
                }
            }
            _ => plain,
        };
        Some(mv)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter())?;
        }
        Ok(())
    }
}

/// Plays a move submitted from outside the engine, typically by a person.
///
/// The move is turned into a resulting board with [`Move::classify`] and
/// [`Board::apply`] and accepted only if that board is one the legal move
/// generator produces from `board`. On success the generator's own board is
/// returned; `None` means the move was rejected and `board` still stands.
pub fn submit_move(board: &Board, from: Square, to: Square) -> Option<Board> {
    let candidate = board.apply(Move::classify(board, from, to)?);
    let accepted = MoveGenerator::legal(*board).find(|legal| *legal == candidate);
    if accepted.is_none() {
        debug!("rejected {}{} for {}", from, to, board.current_turn());
    }
    accepted
}
