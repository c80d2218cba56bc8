use chess_core::{Board, Color, Piece, PieceType, Square};
use once_cell::sync::Lazy;

/// Evaluation score. Positive favours White, negative favours Black.
pub type Score = f32;

/// Score of a position with no legal moves, mate and stalemate alike.
pub const DRAW_SCORE: Score = 0.0;

// Material in pawns. The king outweighs everything else combined so that
// losing it dominates any evaluation.
const PAWN_VALUE: Score = 1.0;
const KNIGHT_VALUE: Score = 3.0;
const BISHOP_VALUE: Score = 3.0;
const ROOK_VALUE: Score = 5.0;
const QUEEN_VALUE: Score = 9.0;
const KING_VALUE: Score = 200.0;

/// Placement multiplier for every piece on every square, indexed by
/// `Piece::index()` then `Square::index()`.
///
/// Knights, bishops and queens gain up to 30% in the centre. Pawns trade the
/// rank-centrality term for how far they have advanced, up to 32.5% just
/// before promotion. Rooks and kings are flat.
static PLACEMENT: Lazy<[[Score; 64]; 12]> = Lazy::new(|| {
    let mut table = [[1.0; 64]; 12];
    for color in [Color::White, Color::Black] {
        for piece_type in PieceType::ALL {
            let piece = Piece::new(piece_type, color);
            for square in Square::all() {
                table[piece.index()][square.index()] = placement_multiplier(piece, square);
            }
        }
    }
    table
});

/// Evaluates a position statically, without looking at any moves.
///
/// Each piece contributes its material value times a placement multiplier,
/// White pieces positively and Black pieces negatively.
pub fn evaluate_position(board: &Board) -> Score {
    board
        .pieces()
        .map(|(square, piece)| {
            let value = get_piece_value(piece.piece_type) * PLACEMENT[piece.index()][square.index()];
            match piece.color {
                Color::White => value,
                Color::Black => -value,
            }
        })
        .sum()
}

/// Returns the base material value of a piece
pub fn get_piece_value(piece_type: PieceType) -> Score {
    match piece_type {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    }
}

/// 3.5 minus the distance from the board's centre line: 0 on the edge, 3 in
/// the middle.
fn centrality(index: u8) -> Score {
    3.5 - (index as Score - 3.5).abs()
}

fn placement_multiplier(piece: Piece, square: Square) -> Score {
    let file_quality = centrality(square.file);
    let rank_quality = match piece.piece_type {
        PieceType::Rook | PieceType::King => return 1.0,
        PieceType::Pawn => {
            let advanced = match piece.color {
                Color::White => square.rank,
                Color::Black => 7 - square.rank,
            };
            advanced as Score / 2.0
        }
        _ => centrality(square.rank),
    };
    (10.0 + (rank_quality + file_quality) / 2.0) / 10.0
}
