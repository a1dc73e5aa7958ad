//! Fixed-depth negamax search with alpha-beta pruning.
//!
//! The search is fail-soft: a node may return a score outside its
//! `(alpha, beta)` window. Moves are tried in generation order, with no
//! ordering heuristics, transposition table or quiescence search.

use std::fmt;

use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::evaluation::Evaluator;
use crate::movegen::legal::legal_moves;
use crate::Position;
use chess_core::{Color, Move};

/// Larger than any reachable score.
pub const INFINITY: i32 = 1_000_000;

/// Score of delivering mate at the root. A mate found `ply` plies deep
/// scores `MATE_SCORE - ply`, so shorter mates score higher.
pub const MATE_SCORE: i32 = 900_000;

/// Scores within this distance of `MATE_SCORE` are mate scores.
const MATE_WINDOW: i32 = 1_000;

/// A search score split into centipawns or a forced mate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Centipawn advantage for the searching side.
    Centipawns(i32),
    /// Mate in N moves; positive when the searching side mates, negative
    /// when it is mated.
    Mate(i32),
}

impl Score {
    pub fn from_raw(score: i32) -> Self {
        let distance = MATE_SCORE - score.abs();
        if (0..MATE_WINDOW).contains(&distance) {
            let moves = (distance + 1) / 2;
            Score::Mate(if score > 0 { moves } else { -moves })
        } else {
            Score::Centipawns(score)
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Centipawns(cp) => write!(f, "cp {}", cp),
            Score::Mate(n) => write!(f, "mate {}", n),
        }
    }
}

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Score from the searching side's point of view.
    pub score: i32,
    /// Best move found, `None` when the side has no legal moves or the depth
    /// is zero.
    pub best_move: Option<Move>,
    /// Nodes visited, root included.
    pub nodes: u64,
    /// Beta cutoffs taken.
    pub cutoffs: u64,
}

impl SearchResult {
    pub fn score(&self) -> Score {
        Score::from_raw(self.score)
    }
}

/// Search state
#[derive(Debug, Clone)]
pub struct Searcher {
    evaluator: Evaluator,
    nodes: u64,
    cutoffs: u64,
}

impl Searcher {
    pub fn new(config: &SearchConfig) -> Self {
        Self::with_evaluator(Evaluator::new(config.mobility))
    }

    pub fn with_evaluator(evaluator: Evaluator) -> Self {
        Searcher {
            evaluator,
            nodes: 0,
            cutoffs: 0,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn cutoffs(&self) -> u64 {
        self.cutoffs
    }

    /// Searches `depth` plies for `side` and reports the best move.
    ///
    /// The node and cutoff counters are reset first, so each result covers
    /// exactly one search.
    pub fn search(&mut self, position: &Position, side: Color, depth: u32) -> SearchResult {
        self.nodes = 0;
        self.cutoffs = 0;

        let (score, best_move) = self.negamax(position, side, -INFINITY, INFINITY, depth, 0);
        let result = SearchResult {
            score,
            best_move,
            nodes: self.nodes,
            cutoffs: self.cutoffs,
        };

        debug!(
            %side,
            depth,
            score = %result.score(),
            best_move = ?best_move.map(|m| m.to_uci()),
            nodes = result.nodes,
            cutoffs = result.cutoffs,
            "search finished"
        );
        result
    }

    /// Scores `position` for `side` with a `depth`-ply search.
    ///
    /// `ply` is the distance from the root and only affects mate scores.
    /// Returns the best score and the move achieving it; the move is `None`
    /// at the horizon and when `side` has no legal moves.
    pub fn negamax(
        &mut self,
        position: &Position,
        side: Color,
        mut alpha: i32,
        beta: i32,
        depth: u32,
        ply: u32,
    ) -> (i32, Option<Move>) {
        self.nodes += 1;

        if depth == 0 {
            return (self.evaluator.relative(position, side), None);
        }

        let moves = legal_moves(position, side);
        if moves.is_empty() {
            let score = if position.king_in_check(side) {
                -(MATE_SCORE - ply as i32)
            } else {
                0
            };
            return (score, None);
        }

        let mut best = -INFINITY;
        let mut best_move = None;

        for &mv in &moves {
            let child = position.apply(mv);
            let (score, _) =
                self.negamax(&child, side.opposite(), -beta, -alpha, depth - 1, ply + 1);
            let candidate = -score;

            if candidate >= beta {
                self.cutoffs += 1;
                trace!(ply, mv = %mv, candidate, beta, "beta cutoff");
                return (candidate, Some(mv));
            }
            if candidate > best {
                best = candidate;
                best_move = Some(mv);
                if candidate > alpha {
                    alpha = candidate;
                }
            }
        }

        (best, best_move)
    }

    /// Plain negamax over every legal move, without pruning.
    ///
    /// Visits the whole tree to `depth`, so it is only practical for shallow
    /// searches. Its root score and move always agree with [`Self::negamax`]
    /// called with a full window.
    pub fn full_width(
        &mut self,
        position: &Position,
        side: Color,
        depth: u32,
        ply: u32,
    ) -> (i32, Option<Move>) {
        self.nodes += 1;

        if depth == 0 {
            return (self.evaluator.relative(position, side), None);
        }

        let moves = legal_moves(position, side);
        if moves.is_empty() {
            let score = if position.king_in_check(side) {
                -(MATE_SCORE - ply as i32)
            } else {
                0
            };
            return (score, None);
        }

        let mut best = -INFINITY;
        let mut best_move = None;
        for &mv in &moves {
            let (score, _) = self.full_width(&position.apply(mv), side.opposite(), depth - 1, ply + 1);
            if -score > best {
                best = -score;
                best_move = Some(mv);
            }
        }
        (best, best_move)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::with_evaluator(Evaluator::default())
    }
}

/// Searches with the default evaluator and returns `(score, best move)`
/// from `side`'s point of view.
pub fn best_move(position: &Position, side: Color, depth: u32) -> (i32, Option<Move>) {
    let result = Searcher::default().search(position, side, depth);
    (result.score, result.best_move)
}
