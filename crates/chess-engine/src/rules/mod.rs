//! Game-state oracle and the rule set seam.
//!
//! The free functions answer check, checkmate and stalemate questions for
//! either side. [`RuleSet`] bundles the operations a front end needs so a
//! caller can hold the rules as one value.

mod standard;

pub use standard::StandardChess;

use crate::movegen::legal::{is_in_check, legal_moves, LegalMoves};
use crate::Position;
use chess_core::{Color, Move};
use std::fmt;

/// Outcome of a position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has at least one legal move.
    Ongoing,
    /// The side to move is in check with no legal moves.
    Checkmate { winner: Color },
    /// The side to move is not in check and has no legal moves.
    Stalemate,
}

impl GameStatus {
    /// Returns true if the game cannot continue.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => f.write_str("ongoing"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => f.write_str("stalemate"),
        }
    }
}

/// Returns true if `side` is in check and has no legal moves.
pub fn is_checkmate(position: &Position, side: Color) -> bool {
    is_in_check(position, side) && legal_moves(position, side).is_empty()
}

/// Returns true if `side` is not in check but has no legal moves.
pub fn is_stalemate(position: &Position, side: Color) -> bool {
    !is_in_check(position, side) && legal_moves(position, side).is_empty()
}

/// Classifies the position for the side to move.
pub fn game_status(position: &Position) -> GameStatus {
    let side = position.side_to_move();
    if !legal_moves(position, side).is_empty() {
        return GameStatus::Ongoing;
    }
    if is_in_check(position, side) {
        GameStatus::Checkmate {
            winner: side.opposite(),
        }
    } else {
        GameStatus::Stalemate
    }
}

/// The operations a front end drives a game through.
///
/// # Example
///
/// ```
/// use chess_engine::rules::RuleSet;
/// use chess_engine::StandardChess;
/// use chess_core::Color;
///
/// let position = StandardChess.initial_position();
/// let moves = StandardChess.legal_moves(&position, Color::White);
/// assert_eq!(moves.len(), 20);
/// ```
pub trait RuleSet {
    /// Returns the position a new game starts from.
    fn initial_position(&self) -> Position;

    /// Generates all legal moves of `side`.
    fn legal_moves(&self, position: &Position, side: Color) -> LegalMoves;

    /// Returns true if the side to move may play the given move.
    fn is_legal(&self, position: &Position, m: Move) -> bool;

    /// Plays a move, returning the new position.
    ///
    /// # Panics
    ///
    /// May panic if the move is not pseudo-legal. Use
    /// [`is_legal`](RuleSet::is_legal) to check first, or use
    /// [`try_apply`](RuleSet::try_apply).
    fn apply(&self, position: &Position, m: Move) -> Position;

    /// Plays a move, returning `None` if it is illegal.
    fn try_apply(&self, position: &Position, m: Move) -> Option<Position> {
        if self.is_legal(position, m) {
            Some(self.apply(position, m))
        } else {
            None
        }
    }

    fn is_in_check(&self, position: &Position, side: Color) -> bool;

    fn is_checkmate(&self, position: &Position, side: Color) -> bool;

    fn is_stalemate(&self, position: &Position, side: Color) -> bool;

    /// Classifies the position for the side to move.
    fn game_status(&self, position: &Position) -> GameStatus;

    /// Returns true if the side to move cannot continue.
    fn is_game_over(&self, position: &Position) -> bool {
        self.game_status(position).is_over()
    }
}
