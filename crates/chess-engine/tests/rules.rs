//! Rule scenarios played through the public API.

use chess_core::{CastleSide, Color, Move, MoveKind, Piece, Square};
use chess_engine::{
    attacking_pieces, game_status, is_checkmate, is_in_check, is_legal, is_stalemate, legal_moves,
    Game, GameStatus, Position,
};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn play(moves: &[&str]) -> Game {
    let mut game = Game::new();
    for m in moves {
        game.make_move_uci(m)
            .unwrap_or_else(|e| panic!("{} rejected: {}", m, e));
    }
    game
}

#[test]
fn initial_position_has_twenty_moves_for_each_side() {
    let position = chess_engine::initial_position();
    assert_eq!(legal_moves(&position, Color::White).len(), 20);
    assert_eq!(legal_moves(&position, Color::Black).len(), 20);
}

#[test]
fn en_passant_is_available_on_the_next_ply_only() {
    let exd6 = Move::new(sq("e5"), sq("d6"), MoveKind::EnPassant);

    let game = play(&["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert!(is_legal(game.position(), exd6));

    let after = game.position().apply(exd6);
    assert!(after.piece_at(sq("d5")).is_none());
    assert!(after.piece_at(sq("d6")).unwrap().is(Piece::Pawn, Color::White));

    // A waiting move by White gives up the capture even before Black replies.
    let waited = play(&["e2e4", "a7a6", "e4e5", "d7d5", "a2a3"]);
    let position = waited.position();
    assert_eq!(position.side_to_move(), Color::Black);
    assert!(legal_moves(position, Color::White).find(sq("e5"), sq("d6")).is_none());
    assert!(!is_legal(&position.with_side_to_move(Color::White), exd6));

    let late = play(&["e2e4", "a7a6", "e4e5", "d7d5", "a2a3", "h7h6"]);
    assert!(!is_legal(late.position(), exd6));
    assert!(legal_moves(late.position(), Color::White)
        .iter()
        .all(|m| m.kind() != MoveKind::EnPassant));
}

#[test]
fn en_passant_needs_a_double_push() {
    // d7-d6-d5 lands on the same square in two single steps.
    let game = play(&["e2e4", "d7d6", "e4e5", "d6d5"]);
    let exd6 = Move::new(sq("e5"), sq("d6"), MoveKind::EnPassant);
    assert!(!is_legal(game.position(), exd6));
}

#[test]
fn castling_with_safe_path() {
    let position = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let castle = Move::new(Square::E1, Square::G1, MoveKind::Castle(CastleSide::Kingside));
    assert!(legal_moves(&position, Color::White).contains(castle));
}

#[test]
fn castling_through_or_into_attack_is_refused() {
    let castle = Move::new(Square::E1, Square::G1, MoveKind::Castle(CastleSide::Kingside));
    for fen in [
        "5rk1/8/8/8/8/8/8/4K2R w K - 0 1",
        "6rk/8/8/8/8/8/8/4K2R w K - 0 1",
        "4k3/8/8/8/8/8/8/r3K2R w K - 0 1",
    ] {
        let position = Position::from_fen(fen).unwrap();
        assert!(
            !legal_moves(&position, Color::White).contains(castle),
            "castled in {}",
            fen
        );
    }
}

#[test]
fn kingside_right_lost_after_rook_moves_and_returns() {
    let game = play(&[
        "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "h1g1", "f8c5", "g1h1", "d7d6",
    ]);
    let position = game.position();
    assert!(legal_moves(position, Color::White)
        .iter()
        .all(|m| !m.kind().is_castle()));
    assert_eq!(position.castling_sides(Color::White), (false, true));
    assert!(position.to_fen().contains(" w Qkq "));
}

#[test]
fn fools_mate() {
    let game = play(&["f2f3", "e7e5", "g2g4", "d8h4"]);
    let position = game.position();
    assert!(is_in_check(position, Color::White));
    assert!(is_checkmate(position, Color::White));
    assert!(!is_stalemate(position, Color::White));
    assert!(legal_moves(position, Color::White).is_empty());
    assert_eq!(attacking_pieces(position, Square::E1, Color::Black), vec![Piece::Queen]);
}

#[test]
fn stalemate() {
    let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(is_stalemate(&position, Color::Black));
    assert!(!is_checkmate(&position, Color::Black));
    assert!(!is_in_check(&position, Color::Black));
    assert_eq!(game_status(&position), GameStatus::Stalemate);
}

#[test]
fn promotion_defaults_to_queen_and_accepts_other_pieces() {
    let position = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let moves = legal_moves(&position, Color::White);
    let promo = moves.find(sq("b7"), sq("b8")).unwrap();
    assert_eq!(promo.kind(), MoveKind::Promotion(Piece::Queen));

    let queen = position.apply(promo);
    assert!(queen.piece_at(sq("b8")).unwrap().is(Piece::Queen, Color::White));
    assert!(is_in_check(&queen, Color::Black));

    let rook = position.apply(promo.promote_to(Piece::Rook));
    assert!(rook.piece_at(sq("b8")).unwrap().is(Piece::Rook, Color::White));
    assert!(is_legal(&position, promo.promote_to(Piece::Bishop)));
}

#[test]
fn discovered_check_through_en_passant_is_illegal() {
    // Taking en passant would clear the fifth rank between the rooks.
    let position = Position::from_fen("8/8/8/r2pP2K/8/8/8/4k3 w - d6 0 1").unwrap();
    let exd6 = Move::new(sq("e5"), sq("d6"), MoveKind::EnPassant);
    assert!(!is_legal(&position, exd6));
}
