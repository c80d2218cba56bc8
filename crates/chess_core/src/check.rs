use crate::{Board, MoveGenerator};

/// Tells whether `board` is an illegal resting state: the side that just
/// moved left its own king where the side to move can take it.
///
/// Every pseudo-legal reply is tried, and the board is in check if any of
/// them leaves the previous mover without a king. This is one full
/// generation per call, and the legal generator calls it once per candidate.
pub fn is_check(board: &Board) -> bool {
    let mover = board.current_turn().opposite();
    MoveGenerator::pseudo_legal(*board).any(|reply| !reply.has_king(mover))
}

/// Tells whether the side to move has its king attacked right now.
pub fn is_in_check(board: &Board) -> bool {
    let mut waiting = *board;
    waiting.toggle_turn();
    is_check(&waiting)
}
