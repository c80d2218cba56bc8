//! Successor generation.
//!
//! [`MoveGenerator`] walks the board file by file, each file from the eighth
//! rank down to the first (a8, a7, .., a1, b8, .., h1), and for every piece of
//! the side to move produces the boards its moves lead to. Within a square the
//! order is fixed per piece: rays in [`ROOK_DIRECTIONS`] then
//! [`BISHOP_DIRECTIONS`] order, steps in offset-table order, then kingside and
//! queenside castling; pawns try the double push, the single push, the two
//! captures and the two en passant captures.
//! Callers rely on this order being stable, since the bot breaks score ties
//! by taking the first candidate.

use std::iter::FusedIterator;
use std::ops::Range;

use crate::{
    check::is_check,
    moves::{Move, MoveType},
    piece::{Color, PieceType},
    Board, Square,
};

// All offsets are (file_delta, rank_delta).
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, -1), (-1, 1), (-1, -1), (1, 1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, -1),
    (1, -2),
    (2, 1),
    (-1, -2),
    (-2, -1),
    (1, 2),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, -1),
    (0, -1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// The `step`th square of the generation walk: files a..h, and within a file
/// ranks 8 down to 1.
fn scan_square(step: usize) -> Option<Square> {
    let file = u8::try_from(step / 8).ok()?;
    Square::new(file, 7 - (step % 8) as u8)
}

/// Lazy sequence of the boards reachable from one board in a single ply.
///
/// With `ignore_check` set every pseudo-legal move is produced. Otherwise a
/// candidate is only produced if [`is_check`] finds the mover's king safe in
/// it, and that test runs when the candidate is pulled, so a consumer that
/// stops early never pays for the rest.
///
/// The generator cannot be rewound; once it returns `None` it keeps doing so.
#[derive(Debug, Clone)]
pub struct MoveGenerator {
    board: Board,
    ignore_check: bool,
    squares: Range<usize>,
    pending: std::vec::IntoIter<Board>,
}

impl MoveGenerator {
    pub fn new(board: Board, ignore_check: bool) -> Self {
        Self {
            board,
            ignore_check,
            squares: 0..64,
            pending: Vec::new().into_iter(),
        }
    }

    /// Moves that do not leave the mover's own king capturable.
    pub fn legal(board: Board) -> Self {
        Self::new(board, false)
    }

    /// Every move the pieces can make, self-check ignored.
    pub fn pseudo_legal(board: Board) -> Self {
        Self::new(board, true)
    }
}

impl Iterator for MoveGenerator {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        loop {
            for candidate in self.pending.by_ref() {
                if self.ignore_check || !is_check(&candidate) {
                    return Some(candidate);
                }
            }

            let square = scan_square(self.squares.next()?)?;
            let mut candidates = Vec::new();
            piece_moves(&self.board, square, &mut candidates);
            self.pending = candidates.into_iter();
        }
    }
}

impl FusedIterator for MoveGenerator {}

pub fn legal_moves(board: &Board) -> Vec<Board> {
    MoveGenerator::legal(*board).collect()
}

pub fn pseudo_legal_moves(board: &Board) -> Vec<Board> {
    MoveGenerator::pseudo_legal(*board).collect()
}

/// Pushes the boards reachable by the piece on `from`, if it belongs to the
/// side to move.
fn piece_moves(board: &Board, from: Square, out: &mut Vec<Board>) {
    let piece = match board.get_piece(from) {
        Some(piece) if piece.color == board.current_turn() => piece,
        _ => return,
    };

    match piece.piece_type {
        PieceType::Rook => slide(board, from, &ROOK_DIRECTIONS, out),
        PieceType::Bishop => slide(board, from, &BISHOP_DIRECTIONS, out),
        PieceType::Queen => {
            slide(board, from, &ROOK_DIRECTIONS, out);
            slide(board, from, &BISHOP_DIRECTIONS, out);
        }
        PieceType::Knight => step(board, from, &KNIGHT_OFFSETS, out),
        PieceType::King => {
            step(board, from, &KING_OFFSETS, out);
            castle(board, from, out);
        }
        PieceType::Pawn => pawn_moves(board, from, piece.color, out),
    }
}

fn slide(board: &Board, from: Square, directions: &[(i8, i8)], out: &mut Vec<Board>) {
    let color = board.current_turn();
    for &(file_delta, rank_delta) in directions {
        let mut to = from;
        while let Some(next) = to.offset(file_delta, rank_delta) {
            to = next;
            match board.get_piece(to) {
                None => out.push(board.apply(Move::new(from, to))),
                Some(target) => {
                    if target.color != color {
                        out.push(board.apply(Move::capture(from, to)));
                    }
                    break;
                }
            }
        }
    }
}

fn step(board: &Board, from: Square, offsets: &[(i8, i8)], out: &mut Vec<Board>) {
    let color = board.current_turn();
    for &(file_delta, rank_delta) in offsets {
        let Some(to) = from.offset(file_delta, rank_delta) else {
            continue;
        };
        match board.get_piece(to) {
            None => out.push(board.apply(Move::new(from, to))),
            Some(target) if target.color != color => out.push(board.apply(Move::capture(from, to))),
            Some(_) => {}
        }
    }
}

/// Castling only looks at the rights flags and the squares between king and
/// rook. Whether the king passes through an attacked square is not checked;
/// the legality filter later rejects a castle only if the king's destination
/// is attacked.
fn castle(board: &Board, from: Square, out: &mut Vec<Board>) {
    let rights = board.castling_rights().side(board.current_turn());
    if !rights.king {
        return;
    }

    let is_empty = |file_delta: i8| {
        from.offset(file_delta, 0)
            .map_or(false, |sq| board.get_piece(sq).is_none())
    };

    if rights.kingside_rook && is_empty(1) && is_empty(2) {
        if let Some(to) = from.offset(2, 0) {
            out.push(board.apply(Move::castle(from, to)));
        }
    }
    if rights.queenside_rook && is_empty(-1) && is_empty(-2) && is_empty(-3) {
        if let Some(to) = from.offset(-2, 0) {
            out.push(board.apply(Move::castle(from, to)));
        }
    }
}

fn pawn_moves(board: &Board, from: Square, color: Color, out: &mut Vec<Board>) {
    let direction = color.pawn_direction();
    let is_empty = |sq: Square| board.get_piece(sq).is_none();
    let promotion = |to: Square| (to.rank == color.promotion_rank()).then_some(PieceType::Queen);

    if from.rank == color.pawn_rank() {
        if let (Some(one), Some(two)) = (from.offset(0, direction), from.offset(0, 2 * direction)) {
            if is_empty(one) && is_empty(two) {
                out.push(board.apply(Move::with_type(from, two, MoveType::DoublePush)));
            }
        }
    }

    if let Some(one) = from.offset(0, direction) {
        if is_empty(one) {
            out.push(board.apply(Move::new(from, one).promoting_to(promotion(one))));
        }
    }

    for file_delta in [-1, 1] {
        let Some(to) = from.offset(file_delta, direction) else {
            continue;
        };
        if matches!(board.get_piece(to), Some(target) if target.color != color) {
            out.push(board.apply(Move::capture(from, to).promoting_to(promotion(to))));
        }
    }

    for file_delta in [-1, 1] {
        let Some(to) = from.offset(file_delta, direction) else {
            continue;
        };
        if board.en_passant() == Some(to) {
            out.push(board.apply(Move::with_type(from, to, MoveType::EnPassant)));
        }
    }
}
