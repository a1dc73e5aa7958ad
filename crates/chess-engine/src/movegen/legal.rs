//! Legal move filtering.
//!
//! Every pseudo-legal move is played on a scratch copy of the position and
//! kept only if the mover's king is not attacked afterwards. Castles also
//! need the square the king crosses to be safe.

use std::ops::Range;

use super::attacks::is_square_attacked;
use super::{pseudo_legal_moves_from, MoveList};
use crate::Position;
use chess_core::{Color, Move, MoveKind, Square};

/// Legal moves of one side, grouped by source square.
///
/// Groups appear in board order (a1 to h8); within a group moves keep the
/// order the generator produced them in.
#[derive(Clone, Default)]
pub struct LegalMoves {
    moves: Vec<Move>,
    groups: Vec<(Square, Range<usize>)>,
}

impl LegalMoves {
    /// Legal moves of the piece on `from`. Empty if it has none.
    pub fn from(&self, from: Square) -> &[Move] {
        self.groups
            .iter()
            .find(|(sq, _)| *sq == from)
            .map(|(_, range)| &self.moves[range.clone()])
            .unwrap_or(&[])
    }

    /// Iterates over `(source, moves)` pairs. Pieces without legal moves are
    /// skipped.
    pub fn by_source(&self) -> impl Iterator<Item = (Square, &[Move])> + '_ {
        self.groups
            .iter()
            .map(|(sq, range)| (*sq, &self.moves[range.clone()]))
    }

    /// Iterates over every legal move.
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.moves.contains(&mv)
    }

    /// The legal move from `from` to `to`, if there is one.
    pub fn find(&self, from: Square, to: Square) -> Option<Move> {
        self.from(from).iter().copied().find(|m| m.to() == to)
    }

    /// Matches a requested move against the legal ones.
    ///
    /// Only the squares are compared, so a request parsed from coordinate
    /// text resolves to the move with its real kind. A promotion request
    /// keeps the piece it names.
    pub fn resolve(&self, request: Move) -> Option<Move> {
        let found = self.find(request.from(), request.to())?;
        match (found.kind(), request.kind()) {
            (MoveKind::Promotion(_), MoveKind::Promotion(piece)) => Some(found.promote_to(piece)),
            (_, MoveKind::Promotion(_)) => None,
            _ => Some(found),
        }
    }
}

impl<'a> IntoIterator for &'a LegalMoves {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl std::fmt::Debug for LegalMoves {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.by_source()).finish()
    }
}

/// Generates all legal moves of `side`, whichever side is to move.
pub fn legal_moves(position: &Position, side: Color) -> LegalMoves {
    let mut legal = LegalMoves::default();
    let mut candidates = MoveList::new();

    for (from, _) in position.pieces_of(side) {
        candidates.clear();
        pseudo_legal_moves_from(position, from, &mut candidates);

        let start = legal.moves.len();
        for &mv in &candidates {
            if is_safe(position, side, mv) {
                legal.moves.push(mv);
            }
        }
        if legal.moves.len() > start {
            legal.groups.push((from, start..legal.moves.len()));
        }
    }

    legal
}

fn is_safe(position: &Position, side: Color, mv: Move) -> bool {
    if let MoveKind::Castle(castle) = mv.kind() {
        let crossed = mv.from().offset(castle.direction(), 0);
        if crossed.is_some_and(|sq| is_square_attacked(position, sq, side.opposite())) {
            return false;
        }
    }
    !position.apply(mv).king_in_check(side)
}

/// Returns true if the side to move may play `mv` in `position`.
///
/// A promotion to any of knight, bishop, rook or queen is accepted wherever
/// the generator produced a promotion.
pub fn is_legal(position: &Position, mv: Move) -> bool {
    let side = position.side_to_move();
    if !position.piece_at(mv.from()).is_some_and(|p| p.color == side) {
        return false;
    }
    let moves = legal_moves(position, side);
    match mv.kind() {
        MoveKind::Promotion(p) if p.is_promotion_target() => moves
            .find(mv.from(), mv.to())
            .is_some_and(|m| m.kind().is_promotion()),
        _ => moves.contains(mv),
    }
}

/// Returns true if `side`'s king is attacked.
pub fn is_in_check(position: &Position, side: Color) -> bool {
    is_square_attacked(position, position.king_square(side), side.opposite())
}
