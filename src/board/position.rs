use std::fmt;

use super::attacks;
use super::bitboard::Bitboard;
use super::types::{CastleRights, Color, Piece, Square};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const TRICKY_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
pub const KILLER_FEN: &str = "rnbqkb1r/pp1p1pPp/8/2p1pP2/1P1P4/3P3P/P1P1P3/RNBQKBNR w KQkq e6 0 1";
pub const CMK_FEN: &str = "r2q1rk1/ppp2ppp/2n1bn2/2b1p3/3pP3/3P1NPP/PPP1NPB1/R1BQ1RK1 b - - 0 9";
pub const ROOK_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
pub const PROMOTION_FEN: &str = "4k3/1P4P1/8/8/8/8/1pp3p1/4K3 w - - 0 1";
pub const CHECKMATE_FEN: &str = "rnbqkbnr/ppppp2p/8/8/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1";
pub const EMPTY_FEN: &str = "8/k7/8/8/8/8/K7/8 w - - 0 1";

/// Debug positions addressable by name from the UCI `position` command.
pub fn named_fen(name: &str) -> Option<&'static str> {
    match name {
        "startpos" => Some(START_FEN),
        "trickypos" => Some(TRICKY_FEN),
        "killerpos" => Some(KILLER_FEN),
        "cmkpos" => Some(CMK_FEN),
        "rookpos" => Some(ROOK_FEN),
        "promotionpos" => Some(PROMOTION_FEN),
        "checkmatepos" => Some(CHECKMATE_FEN),
        "emptypos" => Some(EMPTY_FEN),
        _ => None,
    }
}

const WHITE: usize = 0;
const BLACK: usize = 1;
const BOTH: usize = 2;

/// Mutable board state. `Copy`, so a full snapshot is a plain assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub(super) pieces: [Bitboard; 12],
    pub(super) occupancy: [Bitboard; 3],
    pub(super) side: Color,
    pub(super) en_passant: Option<Square>,
    pub(super) castling: CastleRights,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    /// A position with no pieces, white to move, no rights.
    pub fn empty() -> Self {
        Self {
            pieces: [Bitboard::EMPTY; 12],
            occupancy: [Bitboard::EMPTY; 3],
            side: Color::White,
            en_passant: None,
            castling: CastleRights::NONE,
        }
    }

    pub fn startpos() -> Self {
        match Self::from_fen(START_FEN) {
            Ok(p) => p,
            Err(e) => unreachable!("start FEN is malformed: {e}"),
        }
    }

    #[inline]
    pub fn side_to_move(&self) -> Color { self.side }
    #[inline]
    pub fn en_passant(&self) -> Option<Square> { self.en_passant }
    #[inline]
    pub fn castling(&self) -> CastleRights { self.castling }
    #[inline]
    pub fn pieces(&self, piece: Piece) -> Bitboard { self.pieces[piece.index()] }
    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard { self.occupancy[color.index()] }
    #[inline]
    pub fn occupied(&self) -> Bitboard { self.occupancy[BOTH] }

    /// Rebuilds all three occupancy boards from the piece boards.
    pub fn refresh_occupancy(&mut self) {
        let mut white = Bitboard::EMPTY;
        let mut black = Bitboard::EMPTY;
        for p in Piece::of_color(Color::White) { white |= self.pieces[p.index()]; }
        for p in Piece::of_color(Color::Black) { black |= self.pieces[p.index()]; }
        self.occupancy[WHITE] = white;
        self.occupancy[BLACK] = black;
        self.occupancy[BOTH] = white | black;
    }

    #[inline]
    pub(super) fn merge_occupancy(&mut self) {
        self.occupancy[BOTH] = self.occupancy[WHITE] | self.occupancy[BLACK];
    }

    /// The piece of `color` on `sq`, if any. At most one board can match.
    #[inline]
    pub fn piece_of_color_on(&self, color: Color, sq: Square) -> Option<Piece> {
        Piece::of_color(color).iter().copied().find(|p| self.pieces[p.index()].contains(sq))
    }

    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        Piece::ALL.iter().copied().find(|p| self.pieces[p.index()].contains(sq))
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> { self.pieces[Piece::king(color).index()].lsb() }

    /// Whether any piece of `by` attacks `sq` in the current occupancy.
    ///
    /// Works backwards from the target: a white pawn attacks `sq` exactly when
    /// a black pawn standing on `sq` would attack that pawn, and likewise for
    /// the symmetric leapers and sliders.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let occ = self.occupied();
        if !(attacks::pawn_attacks(!by, sq) & self.pieces(Piece::pawn(by))).is_empty() { return true; }
        if !(attacks::knight_attacks(sq) & self.pieces(Piece::knight(by))).is_empty() { return true; }
        if !(attacks::king_attacks(sq) & self.pieces(Piece::king(by))).is_empty() { return true; }
        let queens = self.pieces(Piece::queen(by));
        if !(attacks::bishop_attacks(sq, occ) & (self.pieces(Piece::bishop(by)) | queens)).is_empty() { return true; }
        if !(attacks::rook_attacks(sq, occ) & (self.pieces(Piece::rook(by)) | queens)).is_empty() { return true; }
        false
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.king_square(self.side).is_some_and(|k| self.is_square_attacked(k, !self.side))
    }

    /// Full copy for later [`restore`](Self::restore).
    #[inline]
    pub fn snapshot(&self) -> Position { *self }

    #[inline]
    pub fn restore(&mut self, snapshot: &Position) { *self = *snapshot; }

    /// Checks the structural invariants: no square shared between piece boards,
    /// occupancy equal to the union of the piece boards.
    pub fn is_consistent(&self) -> bool {
        let mut seen = Bitboard::EMPTY;
        for bb in self.pieces {
            if !(seen & bb).is_empty() { return false; }
            seen |= bb;
        }
        let mut copy = *self;
        copy.refresh_occupancy();
        copy.occupancy == self.occupancy
    }

    #[inline]
    pub fn debug_validate(&self) {
        debug_assert!(self.is_consistent(), "position invariants broken:\n{self}");
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in 0..8u8 {
            write!(f, "  {} ", 8 - row)?;
            for file in 0..8u8 {
                let c = self.piece_on(Square::from_coords(file, row)).map_or('.', Piece::to_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "\n     a b c d e f g h\n")?;
        writeln!(f, "     Side:        {}", if self.side == Color::White { "white" } else { "black" })?;
        writeln!(f, "     en_passant:  {}", self.en_passant.map_or("no".to_string(), |s| s.to_string()))?;
        write!(f, "     Castling:    {}", self.castling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square { s.parse().unwrap() }

    #[test]
    fn startpos_occupancy() {
        let p = Position::startpos();
        assert_eq!(p.occupancy(Color::White).count(), 16);
        assert_eq!(p.occupancy(Color::Black).count(), 16);
        assert_eq!(p.occupied().count(), 32);
        assert!(p.is_consistent());
        assert_eq!(p.piece_on(sq("e1")), Some(Piece::WhiteKing));
        assert_eq!(p.piece_of_color_on(Color::Black, sq("d8")), Some(Piece::BlackQueen));
        assert_eq!(p.piece_of_color_on(Color::White, sq("d8")), None);
    }

    #[test]
    fn attacked_squares_from_startpos() {
        let p = Position::startpos();
        assert!(p.is_square_attacked(sq("e3"), Color::White));
        assert!(p.is_square_attacked(sq("f3"), Color::White));
        assert!(!p.is_square_attacked(sq("e4"), Color::White));
        assert!(p.is_square_attacked(sq("f6"), Color::Black));
        assert!(!p.in_check());
    }

    #[test]
    fn slider_attack_is_blocked() {
        let p = Position::from_fen("4k3/8/8/8/4p3/8/8/4R2K b - - 0 1").unwrap();
        assert!(p.is_square_attacked(sq("e4"), Color::White));
        assert!(!p.is_square_attacked(sq("e5"), Color::White));
        assert!(!p.in_check());
    }

    #[test]
    fn named_positions_parse() {
        for name in ["startpos", "trickypos", "killerpos", "cmkpos", "rookpos", "promotionpos", "checkmatepos", "emptypos"] {
            let fen = named_fen(name).unwrap();
            assert!(Position::from_fen(fen).is_ok(), "{name}");
        }
        assert!(named_fen("nopos").is_none());
    }
}
