//! Attack tables and square-attack queries.
//!
//! Leaper attacks come from tables built at compile time. Slider attacks
//! walk rays over the mailbox and stop at the first occupied square, which
//! is included so that captures fall out of the same set.

use crate::{Bitboard, Position};
use chess_core::{Color, Piece, Square};

/// Rook directions as (file, rank) deltas.
pub const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Bishop directions as (file, rank) deltas.
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&KNIGHT_JUMPS);

const KING_ATTACKS: [Bitboard; 64] = leaper_table(&KING_STEPS);

/// Pawn capture targets, indexed [color][square].
const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    leaper_table(&[(-1, 1), (1, 1)]),
    leaper_table(&[(-1, -1), (1, -1)]),
];

const fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut index = 0u8;
    while index < 64 {
        // SAFETY: the loop bound keeps index within 0-63
        let sq = unsafe { Square::from_index_unchecked(index) };
        let mut bb = Bitboard::EMPTY;
        let mut i = 0;
        while i < deltas.len() {
            bb = bb.with_opt(sq.offset(deltas[i].0, deltas[i].1));
            i += 1;
        }
        table[index as usize] = bb;
        index += 1;
    }
    table
}

/// Returns knight attacks from the given square.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index() as usize]
}

/// Returns king attacks from the given square.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index() as usize]
}

/// Returns the squares a pawn of `color` on `sq` attacks diagonally.
#[inline]
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index() as usize]
}

/// Squares reached by walking each direction until the edge or the first
/// occupied square, inclusive.
pub fn ray_attacks(position: &Position, from: Square, directions: &[(i8, i8)]) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &(df, dr) in directions {
        let mut cursor = from.offset(df, dr);
        while let Some(sq) = cursor {
            bb.set(sq);
            if !position.is_empty(sq) {
                break;
            }
            cursor = sq.offset(df, dr);
        }
    }
    bb
}

#[inline]
pub fn bishop_attacks(position: &Position, sq: Square) -> Bitboard {
    ray_attacks(position, sq, &DIAGONAL)
}

#[inline]
pub fn rook_attacks(position: &Position, sq: Square) -> Bitboard {
    ray_attacks(position, sq, &ORTHOGONAL)
}

#[inline]
pub fn queen_attacks(position: &Position, sq: Square) -> Bitboard {
    bishop_attacks(position, sq) | rook_attacks(position, sq)
}

/// Squares attacked by a piece of the given kind standing on `sq`.
///
/// Pawns attack diagonally only; forward pushes never capture.
pub fn piece_attacks(position: &Position, sq: Square, piece: Piece, color: Color) -> Bitboard {
    match piece {
        Piece::Pawn => pawn_attacks(sq, color),
        Piece::Knight => knight_attacks(sq),
        Piece::Bishop => bishop_attacks(position, sq),
        Piece::Rook => rook_attacks(position, sq),
        Piece::Queen => queen_attacks(position, sq),
        Piece::King => king_attacks(sq),
    }
}

/// Squares holding a piece of `by` that attacks `target`.
///
/// Looks outward from the target: a knight of `by` on a knight-jump away
/// attacks it, a bishop or queen at the end of a diagonal ray attacks it,
/// and so on. A pawn of `by` attacks the target when the target would
/// attack the pawn's square as an opposing pawn.
pub fn attackers(position: &Position, target: Square, by: Color) -> Bitboard {
    scan_attackers(position, target, by, false)
}

/// Returns true if any piece of `by` attacks `target`.
///
/// The target square's own occupant, if any, is irrelevant.
pub fn is_square_attacked(position: &Position, target: Square, by: Color) -> bool {
    scan_attackers(position, target, by, true).is_not_empty()
}

/// Kinds of the pieces of `by` attacking `target`, one entry per attacker,
/// in a1-to-h8 order of their squares.
pub fn attacking_pieces(position: &Position, target: Square, by: Color) -> Vec<Piece> {
    attackers(position, target, by)
        .into_iter()
        .filter_map(|sq| position.piece_at(sq).map(|p| p.kind))
        .collect()
}

fn scan_attackers(position: &Position, target: Square, by: Color, first_only: bool) -> Bitboard {
    let mut found = Bitboard::EMPTY;
    let holds = |sq: Square, kind: Piece| matches!(position.piece_at(sq), Some(p) if p.is(kind, by));

    let leapers = [
        (pawn_attacks(target, by.opposite()), Piece::Pawn),
        (knight_attacks(target), Piece::Knight),
        (king_attacks(target), Piece::King),
    ];
    for (squares, kind) in leapers {
        for sq in squares {
            if holds(sq, kind) {
                found.set(sq);
                if first_only {
                    return found;
                }
            }
        }
    }

    let sliders = [(DIAGONAL, Piece::Bishop), (ORTHOGONAL, Piece::Rook)];
    for (directions, kind) in sliders {
        for (df, dr) in directions {
            let mut cursor = target.offset(df, dr);
            while let Some(sq) = cursor {
                if let Some(piece) = position.piece_at(sq) {
                    if piece.color == by && (piece.kind == kind || piece.kind == Piece::Queen) {
                        found.set(sq);
                        if first_only {
                            return found;
                        }
                    }
                    break;
                }
                cursor = sq.offset(df, dr);
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn knight_attacks_corner() {
        let attacks = knight_attacks(Square::A1);
        assert_eq!(attacks.count(), 2);
        assert!(attacks.contains(sq("b3")));
        assert!(attacks.contains(sq("c2")));
    }

    #[test]
    fn knight_attacks_center() {
        assert_eq!(knight_attacks(sq("e4")).count(), 8);
    }

    #[test]
    fn king_attacks_edges() {
        assert_eq!(king_attacks(Square::A1).count(), 3);
        assert_eq!(king_attacks(sq("e1")).count(), 5);
        assert_eq!(king_attacks(sq("e4")).count(), 8);
    }

    #[test]
    fn pawn_attacks_by_color() {
        let white = pawn_attacks(sq("e4"), Color::White);
        assert!(white.contains(sq("d5")) && white.contains(sq("f5")));
        assert_eq!(white.count(), 2);

        let black = pawn_attacks(sq("a5"), Color::Black);
        assert_eq!(black, Bitboard::from_square(sq("b4")));
    }

    #[test]
    fn rays_stop_at_first_blocker() {
        let pos = Position::from_fen("4k3/8/8/8/1p2R2P/8/8/4K3 w - - 0 1").unwrap();
        let attacks = rook_attacks(&pos, sq("e4"));
        assert!(attacks.contains(sq("b4")));
        assert!(!attacks.contains(sq("a4")));
        assert!(attacks.contains(sq("h4")));
        assert!(attacks.contains(sq("e1")));
        assert!(attacks.contains(sq("e8")));
        assert_eq!(attacks.count(), 3 + 3 + 4 + 3);
    }

    #[test]
    fn empty_board_slider_counts() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/K6k w - - 0 1").unwrap();
        assert_eq!(bishop_attacks(&pos, sq("d4")).count(), 13);
        assert_eq!(rook_attacks(&pos, sq("d4")).count(), 14);
        assert_eq!(queen_attacks(&pos, sq("d4")).count(), 27);
    }

    #[test]
    fn startpos_attacks() {
        let pos = Position::startpos();
        assert!(is_square_attacked(&pos, sq("e3"), Color::White));
        assert!(is_square_attacked(&pos, sq("f3"), Color::White));
        assert!(!is_square_attacked(&pos, sq("e4"), Color::White));
        assert!(is_square_attacked(&pos, sq("e6"), Color::Black));
        assert!(!is_square_attacked(&pos, sq("e5"), Color::Black));
    }

    #[test]
    fn pawns_do_not_attack_forward() {
        let pos = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert!(!is_square_attacked(&pos, sq("e5"), Color::White));
        assert!(is_square_attacked(&pos, sq("d5"), Color::White));
    }

    #[test]
    fn attacking_pieces_lists_each_attacker() {
        let pos = Position::from_fen("4k3/8/8/3r4/8/2n5/8/3K4 w - - 0 1").unwrap();
        let kinds = attacking_pieces(&pos, sq("d1"), Color::Black);
        assert_eq!(kinds, vec![Piece::Knight, Piece::Rook]);
        assert!(attacking_pieces(&pos, sq("h1"), Color::Black).is_empty());
    }

    #[test]
    fn queen_attacks_on_both_ray_families() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/q3K3 w - - 0 1").unwrap();
        assert!(is_square_attacked(&pos, Square::E1, Color::Black));
        assert!(is_square_attacked(&pos, sq("h8"), Color::Black));
        assert_eq!(attackers(&pos, Square::E1, Color::Black), Bitboard::from_square(Square::A1));
    }

    #[test]
    fn reverse_lookup_matches_forward_attacks() {
        let pos = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        for target in Square::all() {
            for by in Color::BOTH {
                let forward: Bitboard = pos
                    .pieces_of(by)
                    .filter(|(from, p)| {
                        piece_attacks(&pos, *from, p.kind, p.color).contains(target)
                    })
                    .map(|(from, _)| from)
                    .collect();
                assert_eq!(attackers(&pos, target, by), forward, "{} by {}", target, by);
            }
        }
    }
}
