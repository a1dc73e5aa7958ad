//! Standard chess rules.

use super::{GameStatus, RuleSet};
use crate::movegen::legal::{self, LegalMoves};
use crate::Position;
use chess_core::{Color, Move};

/// Standard chess: castling, en passant, double pushes and promotion, with
/// checkmate and stalemate as the only terminal states.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_position(&self) -> Position {
        Position::startpos()
    }

    fn legal_moves(&self, position: &Position, side: Color) -> LegalMoves {
        legal::legal_moves(position, side)
    }

    fn is_legal(&self, position: &Position, m: Move) -> bool {
        legal::is_legal(position, m)
    }

    fn apply(&self, position: &Position, m: Move) -> Position {
        position.apply(m)
    }

    fn is_in_check(&self, position: &Position, side: Color) -> bool {
        legal::is_in_check(position, side)
    }

    fn is_checkmate(&self, position: &Position, side: Color) -> bool {
        super::is_checkmate(position, side)
    }

    fn is_stalemate(&self, position: &Position, side: Color) -> bool {
        super::is_stalemate(position, side)
    }

    fn game_status(&self, position: &Position) -> GameStatus {
        super::game_status(position)
    }
}
