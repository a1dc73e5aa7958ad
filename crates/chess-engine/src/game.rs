//! Game management with history and undo.
//!
//! [`Game`] keeps every earlier position, which makes undo a pop rather
//! than a reverse move. It refuses further moves once the side to
//! move is checkmated or stalemated.

use thiserror::Error;
use tracing::debug;

use crate::config::SearchConfig;
use crate::movegen::legal::{is_in_check, legal_moves, LegalMoves};
use crate::position::PositionError;
use crate::rules::{game_status, GameStatus};
use crate::search::{SearchResult, Searcher};
use crate::Position;
use chess_core::Move;

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The move text is not coordinate notation.
    #[error("invalid move text: {0:?}")]
    InvalidMoveText(String),
    /// The game has already ended.
    #[error("game is over: {0}")]
    GameOver(GameStatus),
    /// The engine was asked to move with a zero-depth search.
    #[error("search at depth {0} returned no move")]
    NoMoveFound(u32),
}

/// A chess game with history tracking.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    /// Earlier positions; `moves[i]` was played from `previous[i]`.
    previous: Vec<Position>,
    moves: Vec<Move>,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position) -> Self {
        let status = game_status(&position);
        Game {
            position,
            previous: Vec::new(),
            moves: Vec::new(),
            status,
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Returns the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the starting position.
    pub fn start_position(&self) -> &Position {
        self.previous.first().unwrap_or(&self.position)
    }

    /// Returns all legal moves of the side to move.
    pub fn legal_moves(&self) -> LegalMoves {
        let position = self.position();
        legal_moves(position, position.side_to_move())
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        let position = self.position();
        is_in_check(position, position.side_to_move())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    pub fn fullmove_number(&self) -> u32 {
        self.position().fullmove_number()
    }

    pub fn to_fen(&self) -> String {
        self.position().to_fen()
    }

    /// Plays a move and returns it with its resolved kind.
    ///
    /// Only the squares and the promotion piece of `m` are matched, so a move
    /// built with [`Move::normal`] or parsed from text is accepted.
    pub fn make_move(&mut self, m: Move) -> Result<Move, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver(self.status));
        }

        let resolved = self
            .legal_moves()
            .resolve(m)
            .ok_or_else(|| GameError::IllegalMove(m.to_uci()))?;

        self.push(resolved);
        Ok(resolved)
    }

    /// Plays a move given in coordinate notation (e.g. "e2e4", "e7e8q").
    pub fn make_move_uci(&mut self, text: &str) -> Result<Move, GameError> {
        let m = Move::from_uci(text).ok_or_else(|| GameError::InvalidMoveText(text.to_string()))?;
        self.make_move(m)
    }

    /// Takes back the last move, returning it. `None` at the start.
    pub fn undo(&mut self) -> Option<Move> {
        let m = self.moves.pop()?;
        if let Some(position) = self.previous.pop() {
            self.position = position;
        }
        self.status = game_status(&self.position);
        debug!(mv = %m, ply = self.moves.len(), "move undone");
        Some(m)
    }

    /// Searches the current position and plays the best move found.
    pub fn play_engine_move(&mut self, config: &SearchConfig) -> Result<SearchResult, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver(self.status));
        }

        let side = self.position.side_to_move();
        let result = Searcher::new(config).search(&self.position, side, config.depth);
        let m = result
            .best_move
            .ok_or(GameError::NoMoveFound(config.depth))?;

        self.push(m);
        Ok(result)
    }

    fn push(&mut self, m: Move) {
        let next = self.position.apply(m);
        self.status = game_status(&next);
        self.previous.push(std::mem::replace(&mut self.position, next));
        self.moves.push(m);

        debug!(mv = %m, ply = self.moves.len(), "move played");
        if self.status.is_over() {
            debug!(status = %self.status, plies = self.moves.len(), "game over");
        }
    }
}
