// Core chess rules: board state, move generation and check detection
pub mod board;
pub mod check;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod square;

// Re-export main types for convenience
pub use board::{Board, BoardError, CastlingRights, SideRights};
pub use check::{is_check, is_in_check};
pub use movegen::{legal_moves, pseudo_legal_moves, MoveGenerator};
pub use moves::{submit_move, Move, MoveType};
pub use piece::{Color, Piece, PieceType};
pub use square::{ParseSquareError, Square};

#[cfg(test)]
mod tests;
