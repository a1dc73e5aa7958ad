//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// Which rook a king castles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Castling with the h-file rook (O-O).
    Kingside,
    /// Castling with the a-file rook (O-O-O).
    Queenside,
}

impl CastleSide {
    /// File of the rook taking part in this castle.
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// File delta of the king's two-square step.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }
}

/// What a move does besides relocating the moving piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Quiet move to an empty square.
    Normal,
    /// Move onto a square held by an enemy piece.
    Capture,
    /// Pawn advance of two squares from its start rank.
    DoublePawnPush,
    /// Pawn capture of an enemy pawn that just advanced two squares.
    EnPassant,
    /// King steps two squares toward a rook, which jumps over it.
    Castle(CastleSide),
    /// Pawn reaching the last rank, replaced by the given piece.
    Promotion(Piece),
}

impl MoveKind {
    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        match self {
            MoveKind::Promotion(piece) => Some(piece),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self, MoveKind::Promotion(_))
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self, MoveKind::Castle(_))
    }
}

/// A chess move: source square, destination square and an explicit kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    kind: MoveKind,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move { from, to, kind }
    }

    /// Creates a quiet move with no special action.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::Normal)
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the move kind.
    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Returns this move with its promotion piece replaced.
    ///
    /// Non-promotion moves are returned unchanged.
    #[inline]
    pub const fn promote_to(self, piece: Piece) -> Self {
        match self.kind {
            MoveKind::Promotion(_) => Move::new(self.from, self.to, MoveKind::Promotion(piece)),
            _ => self,
        }
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let MoveKind::Promotion(piece) = self.kind {
            s.push(piece.letter());
        }
        s
    }

    /// Parses a move from coordinate notation.
    ///
    /// Only the squares and an optional promotion letter are read, so the
    /// kind is `Normal` or `Promotion`. Resolve the real kind against the
    /// position's legal moves before applying it.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let kind = match s[4..].chars().next() {
            None => MoveKind::Normal,
            Some(c) => match Piece::from_letter(c) {
                Some(piece) if piece.is_promotion_target() => MoveKind::Promotion(piece),
                _ => return None,
            },
        };
        Some(Move::new(from, to, kind))
    }

    /// Placeholder used to fill fixed-size move buffers; never legal.
    pub const NULL: Move = Move::normal(Square::A1, Square::A1);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, {:?})", self.to_uci(), self.kind)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}
