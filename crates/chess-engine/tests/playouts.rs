//! Property tests over random playouts.

use chess_core::Color;
use chess_engine::evaluation::mobility;
use chess_engine::{
    best_move, game_status, is_in_check, legal_moves, pseudo_legal_moves, Evaluator, GameStatus,
    Position,
};
use proptest::prelude::*;

/// Plays a random game, choosing each move by index from `picks`.
fn playout(picks: &[usize]) -> Vec<Position> {
    let mut positions = vec![Position::startpos()];
    for pick in picks {
        let Some(current) = positions.last() else {
            break;
        };
        let moves = legal_moves(current, current.side_to_move());
        if moves.is_empty() {
            break;
        }
        let mv = moves.as_slice()[pick % moves.len()];
        let next = current.apply(mv);
        positions.push(next);
    }
    positions
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn legal_moves_never_leave_own_king_attacked(picks in prop::collection::vec(any::<usize>(), 0..40)) {
        for position in playout(&picks) {
            let side = position.side_to_move();
            for mv in &legal_moves(&position, side) {
                let child = position.apply(*mv);
                prop_assert!(!is_in_check(&child, side), "{} leaves king attacked in {}", mv, position.to_fen());
                prop_assert_eq!(child.side_to_move(), side.opposite());
            }
        }
    }

    #[test]
    fn legal_moves_are_pseudo_legal(picks in prop::collection::vec(any::<usize>(), 0..40)) {
        for position in playout(&picks) {
            for side in Color::BOTH {
                let pseudo = pseudo_legal_moves(&position, side);
                for mv in &legal_moves(&position, side) {
                    prop_assert!(pseudo.as_slice().contains(mv));
                }
            }
        }
    }

    #[test]
    fn cached_check_flags_match_attack_query(picks in prop::collection::vec(any::<usize>(), 0..40)) {
        for position in playout(&picks) {
            for side in Color::BOTH {
                prop_assert_eq!(position.king_in_check(side), is_in_check(&position, side));
                let king = position.piece_at(position.king_square(side));
                prop_assert!(matches!(king, Some(p) if p.is(chess_core::Piece::King, side)));
            }
        }
    }

    #[test]
    fn fen_preserves_legal_moves(picks in prop::collection::vec(any::<usize>(), 0..40)) {
        for position in playout(&picks) {
            let fen = position.to_fen();
            let reparsed = Position::from_fen(&fen).unwrap();
            prop_assert_eq!(reparsed.to_fen(), fen);
            for side in Color::BOTH {
                let before = legal_moves(&position, side);
                let after = legal_moves(&reparsed, side);
                prop_assert_eq!(after.as_slice(), before.as_slice(), "{} to play in {}", side, position.to_fen());
            }
            prop_assert_eq!(mobility(&reparsed), mobility(&position));
        }
    }

    #[test]
    fn status_is_exclusive(picks in prop::collection::vec(any::<usize>(), 0..60)) {
        for position in playout(&picks) {
            let side = position.side_to_move();
            let no_moves = legal_moves(&position, side).is_empty();
            match game_status(&position) {
                GameStatus::Ongoing => prop_assert!(!no_moves),
                GameStatus::Checkmate { winner } => {
                    prop_assert!(no_moves && is_in_check(&position, side));
                    prop_assert_eq!(winner, side.opposite());
                }
                GameStatus::Stalemate => prop_assert!(no_moves && !is_in_check(&position, side)),
            }
        }
    }

    #[test]
    fn depth_one_search_matches_child_evaluation(picks in prop::collection::vec(any::<usize>(), 0..20)) {
        let positions = playout(&picks);
        let Some(position) = positions.last() else {
            return Ok(());
        };
        let side = position.side_to_move();
        let (score, mv) = best_move(position, side, 1);
        match mv {
            Some(mv) => {
                prop_assert!(legal_moves(position, side).contains(mv));
                prop_assert_eq!(score, Evaluator::default().relative(&position.apply(mv), side));
            }
            None => prop_assert!(legal_moves(position, side).is_empty()),
        }
    }
}
