//! Core types for chess.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`] for bounds-checked board coordinates
//! - [`Move`] with an explicit [`MoveKind`] tag
//! - FEN parsing and serialization via [`Fen`]

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{CastlingAvailability, Fen, FenError};
pub use mov::{CastleSide, Move, MoveKind};
pub use piece::Piece;
pub use square::Square;
