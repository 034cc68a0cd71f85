use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use super::types::Square;

/// A set of squares, bit `i` for square `i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    pub const NOT_A: Bitboard = Bitboard(0xfefe_fefe_fefe_fefe);
    pub const NOT_AB: Bitboard = Bitboard(0xfcfc_fcfc_fcfc_fcfc);
    pub const NOT_H: Bitboard = Bitboard(0x7f7f_7f7f_7f7f_7f7f);
    pub const NOT_GH: Bitboard = Bitboard(0x3f3f_3f3f_3f3f_3f3f);

    /// Second rank (white pawn start).
    pub const RANK_2: Bitboard = Bitboard(0x00ff_0000_0000_0000);
    /// Seventh rank (black pawn start).
    pub const RANK_7: Bitboard = Bitboard(0x0000_0000_0000_ff00);

    #[inline]
    pub const fn from_square(sq: Square) -> Bitboard { Bitboard(1u64 << sq.index()) }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool { self.0 & (1u64 << sq.index()) != 0 }

    #[inline]
    pub fn set(&mut self, sq: Square) { self.0 |= 1u64 << sq.index(); }

    #[inline]
    pub fn clear(&mut self, sq: Square) { self.0 &= !(1u64 << sq.index()); }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    #[inline]
    pub const fn count(self) -> u32 { self.0.count_ones() }

    /// Least significant set square.
    #[inline]
    pub fn lsb(self) -> Option<Square> {
        if self.0 == 0 { None } else { Some(Square::new(self.0.trailing_zeros() as u8)) }
    }

    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> { self.pop_lsb() }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.count() as usize;
        (n, Some(n))
    }
}

macro_rules! bit_ops {
    ($($tr:ident $f:ident $atr:ident $af:ident $op:tt;)*) => {$(
        impl $tr for Bitboard {
            type Output = Bitboard;
            #[inline]
            fn $f(self, rhs: Bitboard) -> Bitboard { Bitboard(self.0 $op rhs.0) }
        }
        impl $atr for Bitboard {
            #[inline]
            fn $af(&mut self, rhs: Bitboard) { self.0 = self.0 $op rhs.0; }
        }
    )*};
}

bit_ops! {
    BitAnd bitand BitAndAssign bitand_assign &;
    BitOr bitor BitOrAssign bitor_assign |;
    BitXor bitxor BitXorAssign bitxor_assign ^;
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard { Bitboard(!self.0) }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "  {} ", 8 - row)?;
            for file in 0..8u8 {
                let bit = if self.contains(Square::from_coords(file, row)) { 1 } else { 0 };
                write!(f, " {bit}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "\n     a b c d e f g h")?;
        write!(f, "     bitboard: {:#018x}", self.0)
    }
}
