//! Move generation.
//!
//! Pseudo-legal moves are generated piece by piece straight off the mailbox.
//! The [`legal`] module filters them by playing each one and asking whether
//! the mover's king is left attacked.

pub mod attacks;
pub mod legal;
pub mod perft;

use crate::{Bitboard, Position};
use chess_core::{CastleSide, Color, Move, MoveKind, Piece, Square};

use attacks::{king_attacks, knight_attacks, DIAGONAL, ORTHOGONAL};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the pseudo-legal moves of every piece of `side`, a1 first.
pub fn pseudo_legal_moves(position: &Position, side: Color) -> MoveList {
    let mut moves = MoveList::new();
    for (from, _) in position.pieces_of(side) {
        pseudo_legal_moves_from(position, from, &mut moves);
    }
    moves
}

/// Appends the pseudo-legal moves of the piece on `from` to `moves`.
///
/// Self-check is ignored here. Nothing is appended for an empty square.
pub fn pseudo_legal_moves_from(position: &Position, from: Square, moves: &mut MoveList) {
    let Some(piece) = position.piece_at(from) else {
        return;
    };
    let us = piece.color;
    match piece.kind {
        Piece::Pawn => generate_pawn_moves(position, from, us, moves),
        Piece::Knight => generate_step_moves(position, from, us, knight_attacks(from), moves),
        Piece::Bishop => generate_slider_moves(position, from, us, &DIAGONAL, moves),
        Piece::Rook => generate_slider_moves(position, from, us, &ORTHOGONAL, moves),
        Piece::Queen => {
            generate_slider_moves(position, from, us, &ORTHOGONAL, moves);
            generate_slider_moves(position, from, us, &DIAGONAL, moves);
        }
        Piece::King => {
            generate_step_moves(position, from, us, king_attacks(from), moves);
            if !piece.moved {
                generate_castling_moves(position, from, us, moves);
            }
        }
    }
}

fn generate_pawn_moves(position: &Position, from: Square, us: Color, moves: &mut MoveList) {
    let dir = us.pawn_direction();
    let promotes = |to: Square| to.rank() == us.promotion_rank();
    let unmoved = position.piece_at(from).is_some_and(|p| !p.moved);

    // Pushes
    if let Some(one) = from.offset(0, dir).filter(|sq| position.is_empty(*sq)) {
        if promotes(one) {
            moves.push(Move::new(from, one, MoveKind::Promotion(Piece::Queen)));
        } else {
            moves.push(Move::normal(from, one));
            if unmoved && from.rank() == us.pawn_rank() {
                if let Some(two) = one.offset(0, dir).filter(|sq| position.is_empty(*sq)) {
                    moves.push(Move::new(from, two, MoveKind::DoublePawnPush));
                }
            }
        }
    }

    // Captures
    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match position.piece_at(to) {
            Some(target) if target.color != us => {
                let kind = if promotes(to) {
                    MoveKind::Promotion(Piece::Queen)
                } else {
                    MoveKind::Capture
                };
                moves.push(Move::new(from, to, kind));
            }
            Some(_) => {}
            None => {
                let passed = from
                    .offset(df, 0)
                    .and_then(|sq| position.piece_at(sq))
                    .is_some_and(|p| p.is(Piece::Pawn, us.opposite()) && p.just_double_pushed);
                if passed {
                    moves.push(Move::new(from, to, MoveKind::EnPassant));
                }
            }
        }
    }
}

/// Knight and king steps: empty targets are quiet, enemy targets captures.
fn generate_step_moves(
    position: &Position,
    from: Square,
    us: Color,
    targets: Bitboard,
    moves: &mut MoveList,
) {
    for to in targets {
        match position.piece_at(to) {
            None => moves.push(Move::normal(from, to)),
            Some(p) if p.color != us => moves.push(Move::new(from, to, MoveKind::Capture)),
            Some(_) => {}
        }
    }
}

fn generate_slider_moves(
    position: &Position,
    from: Square,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in directions {
        let mut cursor = from.offset(df, dr);
        while let Some(to) = cursor {
            match position.piece_at(to) {
                None => moves.push(Move::normal(from, to)),
                Some(p) => {
                    if p.color != us {
                        moves.push(Move::new(from, to, MoveKind::Capture));
                    }
                    break;
                }
            }
            cursor = to.offset(df, dr);
        }
    }
}

/// Castles whose rook is unmoved and whose path is empty. Whether the king
/// crosses an attacked square is left to the legality filter.
fn generate_castling_moves(position: &Position, from: Square, us: Color, moves: &mut MoveList) {
    if position.king_in_check(us) || from.rank() != us.back_rank() {
        return;
    }
    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        let Some(rook) = position.castling_rook(us, side) else {
            continue;
        };
        let step = side.direction();
        let mut path_clear = true;
        let mut cursor = from.offset(step, 0);
        while let Some(sq) = cursor.filter(|sq| *sq != rook) {
            if !position.is_empty(sq) {
                path_clear = false;
                break;
            }
            cursor = sq.offset(step, 0);
        }
        if !path_clear {
            continue;
        }
        if let Some(to) = from.offset(2 * step, 0) {
            moves.push(Move::new(from, to, MoveKind::Castle(side)));
        }
    }
}
