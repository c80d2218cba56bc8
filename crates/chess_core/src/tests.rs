use super::*;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn play(board: &Board, from: &str, to: &str) -> Board {
    submit_move(board, sq(from), sq(to)).unwrap_or_else(|| panic!("{}{} should be legal", from, to))
}

fn placement(text: &str, turn: Color) -> Board {
    Board::from_placement(text, turn).unwrap()
}

fn castles_to(board: &Board, to: &str) -> bool {
    legal_moves(board).iter().any(|next| {
        next.last_move()
            .map_or(false, |mv| mv.move_type == MoveType::Castle && mv.to == sq(to))
    })
}

fn rights_flags(board: &Board) -> [bool; 6] {
    let rights = board.castling_rights();
    [
        rights.white.king,
        rights.white.queenside_rook,
        rights.white.kingside_rook,
        rights.black.king,
        rights.black.queenside_rook,
        rights.black.kingside_rook,
    ]
}

fn perft(board: &Board, depth: u32) -> usize {
    if depth == 0 {
        return 1;
    }
    MoveGenerator::legal(*board).map(|next| perft(&next, depth - 1)).sum()
}

#[test]
fn test_initial_position() {
    let board = Board::new();
    assert_eq!(board.current_turn(), Color::White);
    assert_eq!(board.castling_rights(), CastlingRights::default());
    assert_eq!(board.en_passant(), None);
    assert_eq!(board.get_piece(sq("e1")), Some(Piece::new(PieceType::King, Color::White)));
    assert_eq!(board.get_piece(sq("d8")), Some(Piece::new(PieceType::Queen, Color::Black)));
    assert_eq!(board.pieces().count(), 32);
    assert_eq!(
        board,
        placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", Color::White)
    );
}

#[test]
fn test_twenty_opening_moves() {
    let board = Board::new();
    assert_eq!(legal_moves(&board).len(), 20);
    assert_eq!(pseudo_legal_moves(&board).len(), 20);
}

#[test]
fn test_perft_from_start() {
    let board = Board::new();
    assert_eq!(perft(&board, 1), 20);
    assert_eq!(perft(&board, 2), 400);
    assert_eq!(perft(&board, 3), 8902);
}

#[test]
fn test_generator_is_fused() {
    let mut moves = MoveGenerator::legal(placement("7k/8/8/8/8/8/8/K7", Color::White));
    assert_eq!(moves.by_ref().count(), 3);
    assert_eq!(moves.next(), None);
    assert_eq!(moves.next(), None);
}

fn move_names(board: &Board) -> Vec<String> {
    legal_moves(board)
        .iter()
        .filter_map(|next| next.last_move().map(|mv| mv.to_string()))
        .collect()
}

#[test]
fn test_generation_walks_files_from_the_eighth_rank() {
    let names = move_names(&Board::new());
    assert_eq!(names[..6], ["a2a4", "a2a3", "b2b4", "b2b3", "b1c3", "b1a3"]);
    assert_eq!(names.last().map(String::as_str), Some("h2h3"));

    let kings = placement("7k/8/8/8/8/8/8/K7", Color::White);
    assert_eq!(move_names(&kings), ["a1b1", "a1b2", "a1a2"]);

    let queen = placement("8/7k/8/8/3Q4/8/8/K7", Color::White);
    let names: Vec<String> = move_names(&queen)
        .into_iter()
        .filter(|name| name.starts_with("d4"))
        .collect();
    // down the file first, then up it, then along the rank
    assert_eq!(names[..5], ["d4d3", "d4d2", "d4d1", "d4d5", "d4d6"]);
}

#[test]
fn test_equality_ignores_last_move() {
    let board = Board::new();
    let pushed = play(&board, "e2", "e4");
    let replayed = board.apply(Move::with_type(sq("e2"), sq("e4"), MoveType::DoublePush));
    assert_eq!(pushed, replayed);

    let mut without_history = Board::empty(Color::Black);
    for (square, piece) in pushed.pieces() {
        without_history.set_piece(square, Some(piece));
    }
    // rights and en passant still differ
    assert_ne!(pushed, without_history);
}

#[test]
fn test_double_push_sets_en_passant_for_one_ply() {
    let board = play(&Board::new(), "e2", "e4");
    assert_eq!(board.en_passant(), Some(sq("e3")));
    assert_eq!(board.current_turn(), Color::Black);
    assert_eq!(board.last_move().map(|mv| mv.move_type), Some(MoveType::DoublePush));

    let board = play(&board, "g8", "f6");
    assert_eq!(board.en_passant(), None);
}

#[test]
fn test_en_passant_capture() {
    let mut board = Board::new();
    for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
        board = play(&board, from, to);
    }
    assert_eq!(board.en_passant(), Some(sq("d6")));

    let captured = play(&board, "e5", "d6");
    assert_eq!(captured.get_piece(sq("d6")), Some(Piece::new(PieceType::Pawn, Color::White)));
    assert_eq!(captured.get_piece(sq("d5")), None);
    assert_eq!(captured.get_piece(sq("e5")), None);
    assert_eq!(captured.last_move().map(|mv| mv.move_type), Some(MoveType::EnPassant));
    assert_eq!(captured.pieces().count(), 31);
    assert!(legal_moves(&board).contains(&captured));
}

#[test]
fn test_black_en_passant_capture() {
    let mut board = Board::new();
    for (from, to) in [("h2", "h3"), ("d7", "d5"), ("h3", "h4"), ("d5", "d4"), ("e2", "e4")] {
        board = play(&board, from, to);
    }
    assert_eq!(board.en_passant(), Some(sq("e3")));

    let captured = play(&board, "d4", "e3");
    assert_eq!(captured.get_piece(sq("e3")), Some(Piece::new(PieceType::Pawn, Color::Black)));
    assert_eq!(captured.get_piece(sq("e4")), None);
    assert_eq!(captured.get_piece(sq("d4")), None);
    assert_eq!(captured.last_move().map(|mv| mv.move_type), Some(MoveType::EnPassant));
    assert_eq!(captured.current_turn(), Color::White);
}

#[test]
fn test_en_passant_expires_after_one_ply() {
    let mut board = Board::new();
    for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5"), ("h2", "h3"), ("a6", "a5")] {
        board = play(&board, from, to);
    }
    assert_eq!(board.en_passant(), None);
    assert_eq!(submit_move(&board, sq("e5"), sq("d6")), None);
}

#[test]
fn test_castling_both_sides() {
    let board = placement("r3k2r/8/8/8/8/8/8/R3K2R", Color::White);
    assert_eq!(board.castling_rights(), CastlingRights::default());
    assert!(castles_to(&board, "g1"));
    assert!(castles_to(&board, "c1"));

    let castled = play(&board, "e1", "g1");
    assert_eq!(castled.get_piece(sq("g1")), Some(Piece::new(PieceType::King, Color::White)));
    assert_eq!(castled.get_piece(sq("f1")), Some(Piece::new(PieceType::Rook, Color::White)));
    assert_eq!(castled.get_piece(sq("h1")), None);
    assert_eq!(castled.get_piece(sq("e1")), None);
    assert!(!castled.castling_rights().white.king);
    assert!(castled.castling_rights().black.king);

    let castled = play(&board, "e1", "c1");
    assert_eq!(castled.get_piece(sq("c1")), Some(Piece::new(PieceType::King, Color::White)));
    assert_eq!(castled.get_piece(sq("d1")), Some(Piece::new(PieceType::Rook, Color::White)));
    assert_eq!(castled.get_piece(sq("a1")), None);
}

#[test]
fn test_castling_blocked_by_piece() {
    let board = placement("r3k2r/8/8/8/8/8/8/R3KB1R", Color::White);
    assert!(!castles_to(&board, "g1"));
    assert!(castles_to(&board, "c1"));

    let board = placement("r3k2r/8/8/8/8/8/8/RN2K2R", Color::White);
    assert!(castles_to(&board, "g1"));
    assert!(!castles_to(&board, "c1"));
}

#[test]
fn test_castling_right_lost_for_good() {
    let mut board = placement("r3k2r/8/8/8/8/8/8/R3K2R", Color::White);
    for (from, to) in [("h1", "h2"), ("a8", "a7"), ("h2", "h1"), ("a7", "a8")] {
        board = play(&board, from, to);
    }
    assert_eq!(board.get_piece(sq("h1")), Some(Piece::new(PieceType::Rook, Color::White)));
    assert!(!board.castling_rights().white.kingside_rook);
    assert!(!castles_to(&board, "g1"));
    assert!(castles_to(&board, "c1"));
    assert_eq!(submit_move(&board, sq("e1"), sq("g1")), None);
}

#[test]
fn test_castling_gone_after_king_walks_back() {
    let mut board = placement("r3k2r/8/8/8/8/8/8/R3K2R", Color::White);
    for (from, to) in [("e1", "e2"), ("a8", "a7"), ("e2", "e1"), ("a7", "a8")] {
        board = play(&board, from, to);
    }
    assert_eq!(board.get_piece(sq("e1")), Some(Piece::new(PieceType::King, Color::White)));
    let white = board.castling_rights().white;
    assert!(!white.king);
    assert!(white.queenside_rook && white.kingside_rook);
    assert!(!castles_to(&board, "g1"));
    assert!(!castles_to(&board, "c1"));
    assert_eq!(submit_move(&board, sq("e1"), sq("g1")), None);
    assert_eq!(submit_move(&board, sq("e1"), sq("c1")), None);
}

#[test]
fn test_castling_into_attack_is_illegal() {
    let board = placement("r3k1r1/8/8/8/8/8/8/R3K2R", Color::White);
    assert!(!castles_to(&board, "g1"));
    assert!(castles_to(&board, "c1"));
}

#[test]
fn test_castling_through_attack_is_allowed() {
    // Only the king's destination is tested, so passing over f1 is fine.
    let board = placement("r3kr2/8/8/8/8/8/8/R3K2R", Color::White);
    assert!(castles_to(&board, "g1"));
}

#[test]
fn test_promotion_to_queen() {
    let board = placement("4k3/P7/8/8/8/8/8/4K3", Color::White);
    let promoted = play(&board, "a7", "a8");
    assert_eq!(promoted.get_piece(sq("a8")), Some(Piece::new(PieceType::Queen, Color::White)));
    assert_eq!(promoted.last_move().and_then(|mv| mv.promotion), Some(PieceType::Queen));
    assert_eq!(promoted.last_move().map(|mv| mv.to_string()), Some("a7a8q".to_string()));

    let board = placement("1r2k3/P7/8/8/8/8/8/4K3", Color::White);
    let promoted = play(&board, "a7", "b8");
    assert_eq!(promoted.get_piece(sq("b8")), Some(Piece::new(PieceType::Queen, Color::White)));
}

#[test]
fn test_pinned_piece_cannot_move() {
    let board = placement("4k3/4r3/8/8/8/8/4B3/4K3", Color::White);
    let legal = legal_moves(&board);
    assert_eq!(legal.len(), 4);
    assert!(legal.iter().all(|next| next.get_piece(sq("e1")).is_none()));
    assert_eq!(pseudo_legal_moves(&board).len(), 13);
}

#[test]
fn test_check_detection() {
    let board = placement("4k3/8/8/8/8/8/8/4R1K1", Color::Black);
    assert!(is_in_check(&board));
    assert!(!is_check(&board));

    // White to move with the black king en prise: Black's last move was illegal.
    let mut exposed = board;
    exposed.toggle_turn();
    assert!(is_check(&exposed));
}

#[test]
fn test_checkmate_leaves_no_moves() {
    let board = placement("6k1/5ppp/8/8/8/8/8/R5K1", Color::White);
    let mated = play(&board, "a1", "a8");
    assert!(legal_moves(&mated).is_empty());
    assert!(is_in_check(&mated));
}

#[test]
fn test_stalemate_leaves_no_moves() {
    let board = placement("7k/5Q2/6K1/8/8/8/8/8", Color::Black);
    assert!(legal_moves(&board).is_empty());
    assert!(!is_in_check(&board));
}

#[test]
fn test_submit_rejects_illegal_moves() {
    let board = Board::new();
    assert_eq!(submit_move(&board, sq("e2"), sq("e5")), None);
    assert_eq!(submit_move(&board, sq("e7"), sq("e5")), None);
    assert_eq!(submit_move(&board, sq("e4"), sq("e5")), None);
    assert_eq!(submit_move(&board, sq("e1"), sq("g1")), None);
    assert_eq!(submit_move(&board, sq("b1"), sq("d2")), None);
    assert!(submit_move(&board, sq("b1"), sq("c3")).is_some());
}

#[test]
fn test_placement_errors() {
    assert_eq!(Board::from_placement("8/8", Color::White), Err(BoardError::WrongRankCount(2)));
    assert_eq!(
        Board::from_placement("9/8/8/8/8/8/8/8", Color::White),
        Err(BoardError::WrongFileCount { rank: 8 })
    );
    assert_eq!(
        Board::from_placement("8/8/8/8/8/8/8/7", Color::White),
        Err(BoardError::WrongFileCount { rank: 1 })
    );
    assert_eq!(
        Board::from_placement("x7/8/8/8/8/8/8/8", Color::White),
        Err(BoardError::UnknownPiece('x'))
    );
}

#[test]
fn test_display_diagram() {
    let text = Board::new().to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "8  r n b q k b n r");
    assert_eq!(lines[7], "1  R N B Q K B N R");
    assert_eq!(lines[8], "   a b c d e f g h");
}

#[test]
fn test_random_games_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..4 {
        let mut board = Board::new();
        for _ in 0..40 {
            let legal = legal_moves(&board);
            let pseudo = pseudo_legal_moves(&board);
            assert!(legal.iter().all(|next| pseudo.contains(next)));

            let Some(&next) = legal.choose(&mut rng) else {
                break;
            };
            assert_eq!(next.current_turn(), board.current_turn().opposite());
            for (before, after) in rights_flags(&board).into_iter().zip(rights_flags(&next)) {
                assert!(before || !after, "castling right came back");
            }
            if next.last_move().map(|mv| mv.move_type) != Some(MoveType::DoublePush) {
                assert_eq!(next.en_passant(), None);
            }
            board = next;
        }
    }
}
