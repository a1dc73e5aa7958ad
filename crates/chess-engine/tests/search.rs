//! Search behaviour through the public API.

use chess_core::Color;
use chess_engine::search::MATE_SCORE;
use chess_engine::{best_move, legal_moves, Evaluator, Position, Score, SearchConfig, Searcher};

#[test]
fn depth_one_score_is_the_best_child_evaluation() {
    let position = Position::startpos();
    let evaluator = Evaluator::default();
    let (score, mv) = best_move(&position, Color::White, 1);
    let mv = mv.unwrap();

    assert!(legal_moves(&position, Color::White).contains(mv));
    assert_eq!(score, evaluator.relative(&position.apply(mv), Color::White));

    let best_child = legal_moves(&position, Color::White)
        .iter()
        .map(|m| evaluator.relative(&position.apply(*m), Color::White))
        .max()
        .unwrap();
    assert_eq!(score, best_child);
}

#[test]
fn black_searches_from_its_own_point_of_view() {
    // Black's rook can take the undefended white queen.
    let position = Position::from_fen("3rk3/8/8/8/8/8/7K/3Q4 b - - 0 1").unwrap();
    let (score, mv) = best_move(&position, Color::Black, 2);
    assert_eq!(mv.unwrap().to_uci(), "d8d1");
    assert!(score > 0);
}

#[test]
fn prefers_the_faster_mate() {
    // Mate in one with the rook, or slower ways to win.
    let position = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
    let mut searcher = Searcher::new(&SearchConfig {
        depth: 3,
        mobility: false,
    });
    let result = searcher.search(&position, Color::White, 3);
    assert_eq!(result.best_move.unwrap().to_uci(), "a1a8");
    assert_eq!(result.score, MATE_SCORE - 1);
    assert_eq!(result.score(), Score::Mate(1));
}

#[test]
fn pruning_reports_cutoffs() {
    let position = Position::from_fen(
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    )
    .unwrap();
    let mut searcher = Searcher::default();
    let result = searcher.search(&position, Color::White, 3);
    assert!(result.best_move.is_some());
    assert!(result.cutoffs > 0);
    assert!(result.nodes > result.cutoffs);
}

#[test]
fn mobility_toggle_changes_the_evaluator_only() {
    let position = Position::startpos();
    let plain = Searcher::new(&SearchConfig {
        depth: 1,
        mobility: false,
    })
    .search(&position, Color::White, 1);
    let mobile = Searcher::new(&SearchConfig {
        depth: 1,
        mobility: true,
    })
    .search(&position, Color::White, 1);
    assert_eq!(plain.nodes, mobile.nodes);
    assert!(plain.best_move.is_some() && mobile.best_move.is_some());
}
