//! Static position evaluation.
//!
//! Scores are integers from White's point of view: positive favours White.
//! The score adds material, a bishop-pair bonus, piece-square tables for the
//! side to move and, optionally, a mobility term.

use crate::movegen::legal::legal_moves;
use crate::Position;
use chess_core::{Color, Move, Piece, Square};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 400;
pub const BISHOP_VALUE: i32 = 500;
pub const ROOK_VALUE: i32 = 850;
pub const QUEEN_VALUE: i32 = 1300;
pub const KING_VALUE: i32 = 100_000;

/// Bonus for a side holding at least two bishops.
pub const BISHOP_PAIR_BONUS: i32 = 50;

/// Weight of the normalised mobility difference.
pub const MOBILITY_SCALE: i32 = 100;

// Piece-square tables, drawn from White's side of the board: the first row
// is rank 8, the last row rank 1. Black reads them mirrored.

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,  0,   0,   0,   0,   0,  0,  0,
    50, 50,  50,  50,  50,  50, 50, 50,
    10, 10,  20,  30,  30,  20, 10, 10,
     5,  5,  10,  25,  25,  10,  5,  5,
     0,  0,   0,  20,  20,   0,  0,  0,
     5, -5, -10,   0,   0, -10, -5,  5,
     5, 10,  10, -20, -20,  10, 10,  5,
     0,  0,   0,   0,   0,   0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20,
    -10,   0,   0,  0,  0,   0,   0, -10,
    -10,   0,   5,  5,  5,   5,   0, -10,
     -5,   0,   5,  5,  5,   5,   0,  -5,
      0,   0,   5,  5,  5,   5,   0,  -5,
    -10,   5,   5,  5,  5,   5,   0, -10,
    -10,   0,   5,  0,  0,   0,   0, -10,
    -20, -10, -10, -5, -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_PST: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

/// Material value of a piece kind.
pub const fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => KING_VALUE,
    }
}

/// Table bonus for a piece of `color` on `sq`, from that piece's own point
/// of view.
pub fn piece_square_value(piece: Piece, color: Color, sq: Square) -> i32 {
    let row = match color {
        Color::White => 7 - sq.rank(),
        Color::Black => sq.rank(),
    };
    let idx = (row * 8 + sq.file()) as usize;
    let table = match piece {
        Piece::Pawn => &PAWN_PST,
        Piece::Knight => &KNIGHT_PST,
        Piece::Bishop => &BISHOP_PST,
        Piece::Rook => &ROOK_PST,
        Piece::Queen => &QUEEN_PST,
        Piece::King => &KING_PST,
    };
    table[idx]
}

/// Material balance including the bishop-pair bonus.
pub fn material(position: &Position) -> i32 {
    let mut score = 0;
    let mut bishops = [0u32; 2];
    for (_, piece) in position.pieces() {
        score += piece.color.sign() * piece_value(piece.kind);
        if piece.kind == Piece::Bishop {
            bishops[piece.color.index()] += 1;
        }
    }
    for color in Color::BOTH {
        if bishops[color.index()] >= 2 {
            score += color.sign() * BISHOP_PAIR_BONUS;
        }
    }
    score
}

/// Piece-square score of the side to move's pieces, signed by its color.
///
/// The opponent's placement is not counted.
pub fn positional(position: &Position) -> i32 {
    let side = position.side_to_move();
    let total: i32 = position
        .pieces_of(side)
        .map(|(sq, piece)| piece_square_value(piece.kind, side, sq))
        .sum();
    side.sign() * total
}

/// Normalised difference of the two sides' legal move counts.
pub fn mobility(position: &Position) -> i32 {
    let white = legal_moves(position, Color::White).len() as i32;
    let black = legal_moves(position, Color::Black).len() as i32;
    if white + black == 0 {
        return 0;
    }
    MOBILITY_SCALE * (white - black) / (white + black)
}

/// Static evaluator with its optional terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    /// Adds the mobility term. It generates legal moves for both sides, so
    /// it is off by default.
    pub mobility: bool,
}

impl Evaluator {
    pub const fn new(mobility: bool) -> Self {
        Evaluator { mobility }
    }

    /// Scores the position from White's point of view.
    pub fn evaluate(&self, position: &Position) -> i32 {
        let mut score = material(position) + positional(position);
        if self.mobility {
            score += mobility(position);
        }
        score
    }

    /// Scores the position from `side`'s point of view.
    pub fn relative(&self, position: &Position, side: Color) -> i32 {
        side.sign() * self.evaluate(position)
    }

    /// Scores the position after each legal move of `side`, from `side`'s
    /// point of view, in legal move order.
    pub fn score_moves(&self, position: &Position, side: Color) -> Vec<(Move, i32)> {
        legal_moves(position, side)
            .iter()
            .map(|&mv| (mv, self.relative(&position.apply(mv), side)))
            .collect()
    }
}

/// Scores a position with the default evaluator, from White's point of view.
pub fn evaluate(position: &Position) -> i32 {
    Evaluator::default().evaluate(position)
}
