use std::fmt;
use thiserror::Error;

use crate::{
    moves::{Move, MoveType},
    piece::{Color, Piece, PieceType},
    Square,
};

/// Castling rights of one side.
///
/// These are not move history: after every move each flag is cleared if the
/// piece it guards no longer stands on its home square, and nothing ever sets
/// a flag back to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideRights {
    /// The king is still on its home square (e1 / e8).
    pub king: bool,
    /// The a-file rook is still on its home square.
    pub queenside_rook: bool,
    /// The h-file rook is still on its home square.
    pub kingside_rook: bool,
}

impl SideRights {
    const ALL: Self = Self {
        king: true,
        queenside_rook: true,
        kingside_rook: true,
    };

    const NONE: Self = Self {
        king: false,
        queenside_rook: false,
        kingside_rook: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    pub white: SideRights,
    pub black: SideRights,
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self {
            white: SideRights::ALL,
            black: SideRights::ALL,
        }
    }
}

impl CastlingRights {
    pub fn none() -> Self {
        Self {
            white: SideRights::NONE,
            black: SideRights::NONE,
        }
    }

    pub fn side(&self, color: Color) -> SideRights {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    fn side_mut(&mut self, color: Color) -> &mut SideRights {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("placement needs 8 ranks separated by `/`, found {0}")]
    WrongRankCount(usize),
    #[error("rank {rank} does not describe exactly 8 squares")]
    WrongFileCount { rank: u8 },
    #[error("unknown piece symbol `{0}`")]
    UnknownPiece(char),
}

/// Complete game state: piece placement, side to move, castling rights and
/// the en passant square.
///
/// `Board` is a small `Copy` value. Every move produces a fresh board and the
/// previous one is left as it was, so search branches never share state.
///
/// Nothing checks that each side has exactly one king. Move generation, check
/// detection and search on a board without that property give unspecified
/// (but memory safe) results.
#[derive(Debug, Clone, Copy)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    current_turn: Color,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    last_move: Option<Move>,
}

// `last_move` is bookkeeping for display and takes no part in equality.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.castling_rights == other.castling_rights
            && self.current_turn == other.current_turn
            && self.en_passant == other.en_passant
    }
}

impl Eq for Board {}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

const KING_HOME_FILE: u8 = 4;
const QUEENSIDE_ROOK_FILE: u8 = 0;
const KINGSIDE_ROOK_FILE: u8 = 7;

impl Board {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        let mut board = Self::empty(Color::White);
        board.setup_initial_position();
        board.castling_rights = CastlingRights::default();
        board
    }

    /// A board with no pieces and no castling rights.
    pub fn empty(current_turn: Color) -> Self {
        Self {
            squares: [[None; 8]; 8],
            current_turn,
            castling_rights: CastlingRights::none(),
            en_passant: None,
            last_move: None,
        }
    }

    fn setup_initial_position(&mut self) {
        for color in [Color::White, Color::Black] {
            for (file, &piece_type) in (0..8).zip(BACK_RANK.iter()) {
                self.squares[color.back_rank() as usize][file] = Some(Piece::new(piece_type, color));
                self.squares[color.pawn_rank() as usize][file] = Some(Piece::new(PieceType::Pawn, color));
            }
        }
    }

    /// Builds a board from the piece-placement field of a FEN string, for
    /// example `"4k3/8/8/8/8/8/8/R3K2R"`.
    ///
    /// Castling rights are derived from the placement: a flag is set when its
    /// piece stands on its home square. There is never an en passant square.
    pub fn from_placement(placement: &str, current_turn: Color) -> Result<Self, BoardError> {
        let ranks: Vec<&str> = placement.trim().split('/').collect();
        if ranks.len() != 8 {
            return Err(BoardError::WrongRankCount(ranks.len()));
        }

        let mut board = Self::empty(current_turn);
        for (row, text) in ranks.iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file: u8 = 0;
            for symbol in text.chars() {
                if let Some(skip) = symbol.to_digit(10) {
                    file += skip as u8;
                    continue;
                }
                let piece = Piece::from_symbol(symbol).ok_or(BoardError::UnknownPiece(symbol))?;
                let square = Square::new(file, rank).ok_or(BoardError::WrongFileCount { rank: rank + 1 })?;
                board.set_piece(square, Some(piece));
                file += 1;
            }
            if file != 8 {
                return Err(BoardError::WrongFileCount { rank: rank + 1 });
            }
        }

        board.castling_rights = CastlingRights::default();
        board.refresh_castling_rights();
        Ok(board)
    }

    pub fn get_piece(&self, square: Square) -> Option<Piece> {
        self.squares[square.rank as usize][square.file as usize]
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.rank as usize][square.file as usize] = piece;
    }

    fn take_piece(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.rank as usize][square.file as usize].take()
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn toggle_turn(&mut self) {
        self.current_turn = self.current_turn.opposite();
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Square a pawn can capture onto en passant, if the previous move was a
    /// double step.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// The move that produced this board, if it came from one.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// All occupied squares in index order (a1, b1, .., h8).
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get_piece(sq).map(|piece| (sq, piece)))
    }

    pub fn has_king(&self, color: Color) -> bool {
        self.pieces()
            .any(|(_, piece)| piece.piece_type == PieceType::King && piece.color == color)
    }

    /// Plays `mv` on a copy of this board and returns the copy.
    ///
    /// No legality checks happen here: the move type decides which side
    /// effects apply (rook hop for castling, removal of the passed pawn for en
    /// passant, a new en passant square for a double push) and the caller is
    /// trusted to have picked it correctly.
    pub fn apply(&self, mv: Move) -> Board {
        let mut next = *self;
        next.en_passant = None;

        let moving = next.take_piece(mv.from);
        let placed = match (moving, mv.promotion) {
            (Some(piece), Some(promotion)) => Some(Piece::new(promotion, piece.color)),
            (piece, _) => piece,
        };
        next.set_piece(mv.to, placed);

        match mv.move_type {
            MoveType::Castle => {
                let (rook_from, rook_to) = if mv.to.file > mv.from.file {
                    (mv.from.offset(3, 0), mv.from.offset(1, 0))
                } else {
                    (mv.from.offset(-4, 0), mv.from.offset(-1, 0))
                };
                if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
                    let rook = next.take_piece(rook_from);
                    next.set_piece(rook_to, rook);
                }
            }
            MoveType::EnPassant => {
                if let Some(passed) = Square::new(mv.to.file, mv.from.rank) {
                    next.set_piece(passed, None);
                }
            }
            MoveType::DoublePush => {
                let direction = (mv.to.rank as i8 - mv.from.rank as i8).signum();
                next.en_passant = mv.from.offset(0, direction);
            }
            MoveType::Normal | MoveType::Capture => {}
        }

        next.refresh_castling_rights();
        next.toggle_turn();
        next.last_move = Some(mv);
        next
    }

    /// Clears every castling flag whose piece has left its home square.
    fn refresh_castling_rights(&mut self) {
        for color in [Color::White, Color::Black] {
            let rank = color.back_rank();
            let holds = |file: u8, piece_type: PieceType| {
                Square::new(file, rank).and_then(|sq| self.get_piece(sq)) == Some(Piece::new(piece_type, color))
            };
            let king = holds(KING_HOME_FILE, PieceType::King);
            let queenside_rook = holds(QUEENSIDE_ROOK_FILE, PieceType::Rook);
            let kingside_rook = holds(KINGSIDE_ROOK_FILE, PieceType::Rook);

            let rights = self.castling_rights.side_mut(color);
            rights.king &= king;
            rights.queenside_rook &= queenside_rook;
            rights.kingside_rook &= kingside_rook;
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let symbol = Square::new(file, rank)
                    .and_then(|sq| self.get_piece(sq))
                    .map_or('.', |piece| piece.symbol());
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
