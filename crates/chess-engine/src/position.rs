//! Chess position representation.
//!
//! A [`Position`] is a 64-entry mailbox of [`PlacedPiece`]s plus the side to
//! move, the two king squares and a few counters. Castling rights and the
//! en-passant target are not stored separately: they follow from the
//! `moved` and `just_double_pushed` flags on the pieces themselves.
//!
//! Positions are immutable per ply. [`Position::apply`] returns a fresh
//! position and leaves its input untouched, which is what search relies on.

use chess_core::{CastleSide, CastlingAvailability, Color, Fen, FenError, Move, MoveKind, Piece, Square};
use std::fmt;
use thiserror::Error;

use crate::movegen::attacks::is_square_attacked;

/// Errors produced when building a position from FEN.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{0} has no king")]
    MissingKing(Color),

    #[error("{0} has more than one king")]
    ExtraKing(Color),

    #[error("en passant square {0} has no pawn that could have just passed it")]
    OrphanEnPassant(Square),
}

/// A piece standing on the board together with its movement history flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedPiece {
    pub kind: Piece,
    pub color: Color,
    /// False until the piece first moves. Gates pawn double pushes and
    /// castling.
    pub moved: bool,
    /// True only for a pawn that advanced two squares on the previous ply.
    pub just_double_pushed: bool,
}

impl PlacedPiece {
    /// A piece that has not moved yet.
    #[inline]
    pub const fn new(kind: Piece, color: Color) -> Self {
        PlacedPiece {
            kind,
            color,
            moved: false,
            just_double_pushed: false,
        }
    }

    #[inline]
    pub fn is(self, kind: Piece, color: Color) -> bool {
        self.kind == kind && self.color == color
    }
}

/// Complete chess position state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: [Option<PlacedPiece>; 64],
    side_to_move: Color,
    kings: [Square; 2],
    in_check: [bool; 2],
    halfmove_clock: u32,
    fullmove_number: u32,
}

#[inline]
const fn slot(sq: Square) -> usize {
    sq.index() as usize
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        let mut board = [None; 64];
        const BACK: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for color in Color::BOTH {
            for (file, kind) in (0u8..).zip(BACK) {
                let back = (color.back_rank() * 8 + file) as usize;
                let pawn = (color.pawn_rank() * 8 + file) as usize;
                board[back] = Some(PlacedPiece::new(kind, color));
                board[pawn] = Some(PlacedPiece::new(Piece::Pawn, color));
            }
        }
        Position {
            board,
            side_to_move: Color::White,
            kings: [Square::E1, Square::E8],
            in_check: [false, false],
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Self::from_fen_record(&Fen::parse(fen)?)
    }

    /// Creates a position from an already parsed FEN record.
    ///
    /// Piece flags are derived from the record: pawns off their start rank
    /// count as moved, kings and corner rooks count as unmoved only when the
    /// castling field grants the matching right, and the en-passant square
    /// marks the pawn in front of it as having just double-pushed.
    pub fn from_fen_record(fen: &Fen) -> Result<Self, PositionError> {
        let mut board = [None; 64];
        let mut kings = [None; 2];

        for sq in Square::all() {
            let Some((kind, color)) = fen.placement[slot(sq)] else {
                continue;
            };
            let mut piece = PlacedPiece::new(kind, color);
            match kind {
                Piece::Pawn => piece.moved = sq.rank() != color.pawn_rank(),
                Piece::King => {
                    if kings[color.index()].replace(sq).is_some() {
                        return Err(PositionError::ExtraKing(color));
                    }
                    let (kingside, queenside) = fen.castling.for_color(color);
                    let home = sq.file() == 4 && sq.rank() == color.back_rank();
                    piece.moved = !(home && (kingside || queenside));
                }
                Piece::Rook => {
                    let (kingside, queenside) = fen.castling.for_color(color);
                    let on_back = sq.rank() == color.back_rank();
                    let keeps_right = on_back
                        && ((sq.file() == CastleSide::Kingside.rook_file() && kingside)
                            || (sq.file() == CastleSide::Queenside.rook_file() && queenside));
                    piece.moved = !keeps_right;
                }
                _ => {}
            }
            board[slot(sq)] = Some(piece);
        }

        let white_king = kings[0].ok_or(PositionError::MissingKing(Color::White))?;
        let black_king = kings[1].ok_or(PositionError::MissingKing(Color::Black))?;

        if let Some(ep) = fen.en_passant {
            // The pawn that skipped `ep` belongs to the side that just moved.
            let pusher = fen.side_to_move.opposite();
            let pawn_sq = ep
                .offset(0, pusher.pawn_direction())
                .filter(|sq| matches!(board[slot(*sq)], Some(p) if p.is(Piece::Pawn, pusher)))
                .ok_or(PositionError::OrphanEnPassant(ep))?;
            if let Some(pawn) = board[slot(pawn_sq)].as_mut() {
                pawn.moved = true;
                pawn.just_double_pushed = true;
            }
        }

        let mut position = Position {
            board,
            side_to_move: fen.side_to_move,
            kings: [white_king, black_king],
            in_check: [false, false],
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
        };
        position.refresh_checks();
        Ok(position)
    }

    /// Converts the position to a FEN record.
    pub fn to_fen_record(&self) -> Fen {
        let mut placement = [None; 64];
        for (sq, piece) in self.pieces() {
            placement[slot(sq)] = Some((piece.kind, piece.color));
        }
        let (white_kingside, white_queenside) = self.castling_sides(Color::White);
        let (black_kingside, black_queenside) = self.castling_sides(Color::Black);
        Fen {
            placement,
            side_to_move: self.side_to_move,
            castling: CastlingAvailability {
                white_kingside,
                white_queenside,
                black_kingside,
                black_queenside,
            },
            en_passant: self.en_passant_target(),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        self.to_fen_record().to_string()
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<PlacedPiece> {
        self.board[slot(sq)]
    }

    /// Returns true if no piece stands on `sq`.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.board[slot(sq)].is_none()
    }

    /// Iterates over all occupied squares, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, PlacedPiece)> + '_ {
        Square::all().filter_map(move |sq| self.board[slot(sq)].map(|p| (sq, p)))
    }

    /// Iterates over the pieces of one color, a1 first.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, PlacedPiece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Square of the given side's king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Cached check flag for the given side, refreshed by every `apply`.
    #[inline]
    pub fn king_in_check(&self, color: Color) -> bool {
        self.in_check[color.index()]
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Square behind a pawn that double-pushed on the previous ply.
    pub fn en_passant_target(&self) -> Option<Square> {
        let pusher = self.side_to_move.opposite();
        self.pieces_of(pusher)
            .find(|(_, p)| p.kind == Piece::Pawn && p.just_double_pushed)
            .and_then(|(sq, _)| sq.offset(0, -pusher.pawn_direction()))
    }

    /// Returns which castles the side still has rights for, ignoring
    /// whether the path is currently clear or attacked.
    pub fn castling_sides(&self, color: Color) -> (bool, bool) {
        let king_sq = self.king_square(color);
        let king_home = matches!(self.piece_at(king_sq), Some(k) if !k.moved);
        if !king_home {
            return (false, false);
        }
        (
            self.castling_rook(color, CastleSide::Kingside).is_some(),
            self.castling_rook(color, CastleSide::Queenside).is_some(),
        )
    }

    /// Square of an unmoved rook that can still castle on `side`.
    pub(crate) fn castling_rook(&self, color: Color, side: CastleSide) -> Option<Square> {
        let sq = Square::from_coords(side.rook_file(), color.back_rank())?;
        match self.piece_at(sq) {
            Some(rook) if rook.is(Piece::Rook, color) && !rook.moved => Some(sq),
            _ => None,
        }
    }

    /// Returns a copy with a different side to move.
    ///
    /// Useful for asking questions about the side not on move; the board is
    /// otherwise unchanged.
    pub fn with_side_to_move(&self, color: Color) -> Position {
        let mut next = self.clone();
        next.side_to_move = color;
        next
    }

    /// Plays a move and returns the resulting position.
    ///
    /// The piece on `mv.from()` moves, whatever the side to move says, and
    /// the opponent of that piece becomes the side to move. Any pawn that
    /// ends on its last rank is promoted, to `Queen` unless the move names
    /// another piece.
    ///
    /// # Panics
    ///
    /// The move must be pseudo-legal for this position. Calling this with an
    /// empty source square is a contract violation and panics; other
    /// malformed moves produce an unspecified (but memory-safe) position.
    pub fn apply(&self, mv: Move) -> Position {
        let mut next = self.clone();
        let from = mv.from();
        let to = mv.to();

        let mut mover = next.board[slot(from)]
            .take()
            .expect("apply called with an empty source square");
        let us = mover.color;
        let was_pawn = mover.kind == Piece::Pawn;

        // The en-passant privilege lasts exactly one ply, whoever moves.
        for piece in next.board.iter_mut().flatten() {
            piece.just_double_pushed = false;
        }
        mover.just_double_pushed = false;

        let mut captured = next.board[slot(to)].take().is_some();

        match mv.kind() {
            MoveKind::DoublePawnPush => mover.just_double_pushed = true,
            MoveKind::EnPassant => {
                if let Some(victim) = to.offset(0, -us.pawn_direction()) {
                    captured |= next.board[slot(victim)].take().is_some();
                }
            }
            MoveKind::Castle(side) => {
                let rook_from = Square::from_coords(side.rook_file(), from.rank());
                let rook_to = from.offset(side.direction(), 0);
                if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
                    if let Some(mut rook) = next.board[slot(rook_from)].take() {
                        rook.moved = true;
                        next.board[slot(rook_to)] = Some(rook);
                    }
                }
            }
            MoveKind::Normal | MoveKind::Capture | MoveKind::Promotion(_) => {}
        }

        if was_pawn && to.rank() == us.promotion_rank() {
            mover.kind = mv.kind().promotion_piece().unwrap_or(Piece::Queen);
        }

        mover.moved = true;
        next.board[slot(to)] = Some(mover);

        if mover.kind == Piece::King {
            next.kings[us.index()] = to;
        }

        if was_pawn || captured {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock += 1;
        }
        if us == Color::Black {
            next.fullmove_number += 1;
        }

        next.side_to_move = us.opposite();
        next.refresh_checks();
        next
    }

    fn refresh_checks(&mut self) {
        for color in Color::BOTH {
            self.in_check[color.index()] =
                is_square_attacked(self, self.king_square(color), color.opposite());
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = Square::from_coords(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map(|p| p.kind.to_fen_char(p.color))
                    .unwrap_or('.');
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(f, "{} to move", self.side_to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_matches_fen() {
        let built = Position::startpos();
        let parsed = Position::from_fen(Fen::STARTPOS).unwrap();
        assert_eq!(built, parsed);
        assert_eq!(built.to_fen(), Fen::STARTPOS);
    }

    #[test]
    fn fen_roundtrips() {
        for fen in [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 1",
            "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1",
            "8/8/8/8/8/8/8/4K2k w - - 12 60",
        ] {
            assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn rejects_king_count_violations() {
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/7k w - - 0 1"),
            Err(PositionError::MissingKing(Color::White))
        );
        assert_eq!(
            Position::from_fen("k7/8/8/8/8/8/8/K6k w - - 0 1"),
            Err(PositionError::ExtraKing(Color::Black))
        );
        assert!(matches!(
            Position::from_fen("8/8/8 w - - 0 1"),
            Err(PositionError::Fen(_))
        ));
    }

    #[test]
    fn rejects_orphan_en_passant() {
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - e3 0 1"),
            Err(PositionError::OrphanEnPassant(sq("e3")))
        );
    }

    #[test]
    fn fen_flags_follow_castling_field() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        assert!(!pos.piece_at(Square::E1).unwrap().moved);
        assert!(!pos.piece_at(Square::H1).unwrap().moved);
        assert!(pos.piece_at(Square::A1).unwrap().moved);
        assert!(pos.piece_at(Square::H8).unwrap().moved);
        assert_eq!(pos.castling_sides(Color::White), (true, false));
        assert_eq!(pos.castling_sides(Color::Black), (false, true));
    }

    #[test]
    fn piece_at_and_kings() {
        let pos = Position::startpos();
        let king = pos.piece_at(Square::E1).unwrap();
        assert!(king.is(Piece::King, Color::White));
        assert!(pos.piece_at(sq("e4")).is_none());
        assert_eq!(pos.king_square(Color::White), Square::E1);
        assert_eq!(pos.king_square(Color::Black), Square::E8);
        assert_eq!(pos.pieces().count(), 32);
        assert_eq!(pos.pieces_of(Color::Black).count(), 16);
    }

    #[test]
    fn placed_piece_matches_kind_and_color() {
        let knight = PlacedPiece::new(Piece::Knight, Color::Black);
        assert!(knight.is(Piece::Knight, Color::Black));
        assert!(!knight.is(Piece::Knight, Color::White));
        assert!(!knight.is(Piece::Bishop, Color::Black));
    }

    #[test]
    fn apply_does_not_touch_input() {
        let pos = Position::startpos();
        let before = pos.clone();
        let _ = pos.apply(Move::new(sq("e2"), sq("e4"), MoveKind::DoublePawnPush));
        assert_eq!(pos, before);
    }

    #[test]
    fn double_push_sets_flag_and_target() {
        let pos = Position::startpos().apply(Move::new(sq("e2"), sq("e4"), MoveKind::DoublePawnPush));
        let pawn = pos.piece_at(sq("e4")).unwrap();
        assert!(pawn.just_double_pushed);
        assert!(pawn.moved);
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.en_passant_target(), Some(sq("e3")));
        assert_eq!(pos.halfmove_clock(), 0);
    }

    #[test]
    fn double_push_flag_clears_after_one_reply() {
        let pos = Position::startpos()
            .apply(Move::new(sq("e2"), sq("e4"), MoveKind::DoublePawnPush))
            .apply(Move::normal(sq("g8"), sq("f6")));
        assert!(!pos.piece_at(sq("e4")).unwrap().just_double_pushed);
        assert_eq!(pos.en_passant_target(), None);

        let reparsed = Position::from_fen(&pos.to_fen()).unwrap();
        for color in Color::BOTH {
            let live = crate::legal_moves(&pos, color);
            let parsed = crate::legal_moves(&reparsed, color);
            assert_eq!(live.as_slice(), parsed.as_slice());
        }
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let next = pos.apply(Move::new(sq("e5"), sq("d6"), MoveKind::EnPassant));
        assert!(next.piece_at(sq("d5")).is_none());
        assert!(next.piece_at(sq("d6")).unwrap().is(Piece::Pawn, Color::White));
        assert_eq!(next.pieces().count(), 3);
    }

    #[test]
    fn castling_moves_both_pieces() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let short = pos.apply(Move::new(Square::E1, Square::G1, MoveKind::Castle(CastleSide::Kingside)));
        assert!(short.piece_at(Square::G1).unwrap().is(Piece::King, Color::White));
        assert!(short.piece_at(Square::F1).unwrap().is(Piece::Rook, Color::White));
        assert!(short.piece_at(Square::H1).is_none());
        assert_eq!(short.king_square(Color::White), Square::G1);
        assert_eq!(short.castling_sides(Color::White), (false, false));

        let long = pos
            .with_side_to_move(Color::Black)
            .apply(Move::new(Square::E8, Square::C8, MoveKind::Castle(CastleSide::Queenside)));
        assert!(long.piece_at(Square::C8).unwrap().is(Piece::King, Color::Black));
        assert!(long.piece_at(Square::D8).unwrap().moved);
        assert!(long.piece_at(Square::A8).is_none());
        assert_eq!(long.fullmove_number(), 2);
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let queen = pos.apply(Move::normal(sq("a7"), sq("a8")));
        assert!(queen.piece_at(sq("a8")).unwrap().is(Piece::Queen, Color::White));

        let knight = pos.apply(Move::new(sq("a7"), sq("a8"), MoveKind::Promotion(Piece::Knight)));
        assert!(knight.piece_at(sq("a8")).unwrap().is(Piece::Knight, Color::White));
    }

    #[test]
    fn apply_refreshes_check_flags() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert!(!pos.king_in_check(Color::Black));
        let next = pos.apply(Move::normal(Square::A1, Square::A8));
        assert!(next.king_in_check(Color::Black));
        assert!(!next.king_in_check(Color::White));
    }

    #[test]
    fn halfmove_clock_counts_quiet_piece_moves() {
        let pos = Position::startpos()
            .apply(Move::normal(sq("g1"), sq("f3")))
            .apply(Move::normal(sq("g8"), sq("f6")));
        assert_eq!(pos.halfmove_clock(), 2);
        assert_eq!(pos.fullmove_number(), 2);
    }

    #[test]
    fn display_draws_the_board() {
        let text = Position::startpos().to_string();
        assert!(text.starts_with("8 r n b q k b n r"));
        assert!(text.ends_with("White to move"));
    }
}
