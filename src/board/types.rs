use std::fmt;
use std::ops::Not;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize { self as usize }
}

impl Not for Color {
    type Output = Color;
    #[inline]
    fn not(self) -> Color {
        match self { Color::White => Color::Black, Color::Black => Color::White }
    }
}

/// The twelve colored piece kinds, white first. The discriminant is the index
/// into `Position`'s piece bitboards and into the 4-bit piece fields of a `Move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Piece {
    WhitePawn = 0,
    WhiteKnight,
    WhiteBishop,
    WhiteRook,
    WhiteQueen,
    WhiteKing,
    BlackPawn,
    BlackKnight,
    BlackBishop,
    BlackRook,
    BlackQueen,
    BlackKing,
}

impl Piece {
    pub const COUNT: usize = 12;
    pub const ALL: [Piece; 12] = [
        Piece::WhitePawn, Piece::WhiteKnight, Piece::WhiteBishop, Piece::WhiteRook, Piece::WhiteQueen, Piece::WhiteKing,
        Piece::BlackPawn, Piece::BlackKnight, Piece::BlackBishop, Piece::BlackRook, Piece::BlackQueen, Piece::BlackKing,
    ];

    #[inline]
    pub const fn index(self) -> usize { self as usize }

    #[inline]
    pub fn from_index(idx: usize) -> Option<Piece> { Self::ALL.get(idx).copied() }

    #[inline]
    pub const fn color(self) -> Color {
        if (self as u8) < 6 { Color::White } else { Color::Black }
    }

    /// Kind without color: 0 pawn .. 5 king.
    #[inline]
    pub const fn kind(self) -> usize { (self as usize) % 6 }

    #[inline]
    pub fn pawn(color: Color) -> Piece { Self::ALL[color.index() * 6] }
    #[inline]
    pub fn knight(color: Color) -> Piece { Self::ALL[color.index() * 6 + 1] }
    #[inline]
    pub fn bishop(color: Color) -> Piece { Self::ALL[color.index() * 6 + 2] }
    #[inline]
    pub fn rook(color: Color) -> Piece { Self::ALL[color.index() * 6 + 3] }
    #[inline]
    pub fn queen(color: Color) -> Piece { Self::ALL[color.index() * 6 + 4] }
    #[inline]
    pub fn king(color: Color) -> Piece { Self::ALL[color.index() * 6 + 5] }

    /// Pieces of one color, pawn to king.
    #[inline]
    pub fn of_color(color: Color) -> &'static [Piece] {
        let start = color.index() * 6;
        &Self::ALL[start..start + 6]
    }

    pub fn to_char(self) -> char {
        b"PNBRQKpnbrqk"[self.index()] as char
    }

    pub fn from_char(c: char) -> Option<Piece> {
        "PNBRQKpnbrqk".find(c).and_then(Piece::from_index)
    }
}

/// Square index 0..63, rank-major from a8 (0) to h1 (63).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = 64;

    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);

    #[inline]
    pub const fn new(idx: u8) -> Square {
        debug_assert!(idx < 64);
        Square(idx)
    }

    #[inline]
    pub fn try_new(idx: usize) -> Option<Square> {
        if idx < 64 { Some(Square(idx as u8)) } else { None }
    }

    /// `file` 0 = a, `rank_from_top` 0 = eighth rank.
    #[inline]
    pub const fn from_coords(file: u8, rank_from_top: u8) -> Square { Square(rank_from_top * 8 + file) }

    #[inline]
    pub const fn index(self) -> usize { self.0 as usize }
    #[inline]
    pub const fn file(self) -> u8 { self.0 % 8 }
    /// 0 for the eighth rank, 7 for the first.
    #[inline]
    pub const fn row(self) -> u8 { self.0 / 8 }

    /// One rank towards black's side (a smaller index).
    #[inline]
    pub const fn up(self) -> Square { Square(self.0 - 8) }
    /// One rank towards white's side.
    #[inline]
    pub const fn down(self) -> Square { Square(self.0 + 8) }

    pub fn all() -> impl Iterator<Item = Square> { (0..64u8).map(Square) }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'8' - self.row()) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 2 { return Err(()); }
        let (f, r) = (b[0], b[1]);
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) { return Err(()); }
        Ok(Square::from_coords(f - b'a', b'8' - r))
    }
}

/// Castling rights as a 4-bit set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const WHITE_KING: u8 = 1;
    pub const WHITE_QUEEN: u8 = 2;
    pub const BLACK_KING: u8 = 4;
    pub const BLACK_QUEEN: u8 = 8;

    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(15);

    #[inline]
    pub const fn from_bits(bits: u8) -> CastleRights { CastleRights(bits & 15) }
    #[inline]
    pub const fn bits(self) -> u8 { self.0 }
    #[inline]
    pub const fn has(self, flag: u8) -> bool { self.0 & flag != 0 }
    #[inline]
    pub fn insert(&mut self, flag: u8) { self.0 |= flag; }

    /// Drops whatever a move touching `sq` (as source or target) revokes.
    #[inline]
    pub fn update(&mut self, sq: Square) { self.0 &= SURVIVING_RIGHTS[sq.index()]; }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 { return write!(f, "-"); }
        for (flag, c) in [(Self::WHITE_KING, 'K'), (Self::WHITE_QUEEN, 'Q'), (Self::BLACK_KING, 'k'), (Self::BLACK_QUEEN, 'q')] {
            if self.has(flag) { write!(f, "{c}")?; }
        }
        Ok(())
    }
}

// Rights that survive a move from or to each square.
#[rustfmt::skip]
const SURVIVING_RIGHTS: [u8; 64] = [
     7, 15, 15, 15,  3, 15, 15, 11,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    13, 15, 15, 15, 12, 15, 15, 14,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_names_round_trip() {
        assert_eq!(Square::A8.to_string(), "a8");
        assert_eq!(Square::H1.to_string(), "h1");
        assert_eq!("e4".parse::<Square>(), Ok(Square::from_coords(4, 4)));
        assert!("i1".parse::<Square>().is_err());
        assert!("e9".parse::<Square>().is_err());
    }

    #[test]
    fn king_move_revokes_both_rights() {
        let mut r = CastleRights::ALL;
        r.update(Square::E1);
        assert_eq!(r.to_string(), "kq");
        r.update(Square::H8);
        assert_eq!(r.to_string(), "q");
    }

    #[test]
    fn piece_helpers() {
        assert_eq!(Piece::queen(Color::Black), Piece::BlackQueen);
        assert_eq!(Piece::BlackKnight.kind(), 1);
        assert_eq!(Piece::from_char('k'), Some(Piece::BlackKing));
        assert_eq!(Piece::WhiteRook.to_char(), 'R');
        assert_eq!(Piece::of_color(Color::Black)[0], Piece::BlackPawn);
    }
}
