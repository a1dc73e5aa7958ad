//! Chess rules engine and negamax search.
//!
//! This crate provides:
//! - [`Position`] - immutable-per-ply board state with per-piece flags
//! - Move generation and legality filtering ([`movegen`])
//! - Check, checkmate and stalemate detection ([`rules`])
//! - Static evaluation ([`evaluation`]) and alpha-beta search ([`search`])
//! - [`Game`] - move history with undo
//!
//! # Architecture
//!
//! The board is a 64-square mailbox. Each piece carries a `moved` flag, and
//! pawns a `just_double_pushed` flag, from which castling rights and the
//! en-passant target follow. Legal moves come from simulating every
//! pseudo-legal move and discarding those that leave the mover's king
//! attacked.
//!
//! # Example
//!
//! ```
//! use chess_core::Color;
//! use chess_engine::{best_move, legal_moves, Game, Position};
//!
//! let position = Position::startpos();
//! let moves = legal_moves(&position, Color::White);
//! assert_eq!(moves.len(), 20);
//!
//! let (_score, mv) = best_move(&position, Color::White, 2);
//! assert!(moves.contains(mv.unwrap()));
//!
//! let mut game = Game::new();
//! game.make_move_uci("e2e4").unwrap();
//! game.make_move_uci("e7e5").unwrap();
//! assert_eq!(game.ply_count(), 2);
//! ```

mod bitboard;
pub mod config;
pub mod evaluation;
mod game;
pub mod movegen;
mod position;
pub mod rules;
pub mod search;

pub use bitboard::Bitboard;
pub use config::{ConfigError, EngineConfig, PlayerConfig, SearchConfig};
pub use evaluation::{evaluate, Evaluator};
pub use game::{Game, GameError};
pub use movegen::attacks::{attackers, attacking_pieces, is_square_attacked};
pub use movegen::legal::{is_in_check, is_legal, legal_moves, LegalMoves};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{pseudo_legal_moves, pseudo_legal_moves_from, MoveList};
pub use position::{PlacedPiece, Position, PositionError};
pub use rules::{game_status, is_checkmate, is_stalemate, GameStatus, RuleSet, StandardChess};
pub use search::{best_move, Score, SearchResult, Searcher};

/// Returns the standard starting position.
pub fn initial_position() -> Position {
    Position::startpos()
}
