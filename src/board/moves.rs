//! Packed move encoding.
//!
//! ```text
//! bits  0..6   source square
//! bits  6..12  target square
//! bits 12..16  moving piece
//! bits 16..20  promotion piece (12 = none)
//! bits 20..24  captured piece  (12 = none)
//! bit  24      double pawn push
//! bit  25      en passant capture
//! bit  26      castling
//! bits 27..31  castling rights before the move      (unmake record only)
//! bits 31..38  en passant square before the move    (unmake record only, 64 = none)
//! ```
//!
//! Moves coming out of the generator leave the last two fields zero. `make_move`
//! returns a copy with them stamped; that copy is all `unmake_move` needs.

use std::fmt;
use std::ops::Index;

use super::types::{CastleRights, Piece, Square};

const NO_PIECE: u64 = 12;
const NO_SQUARE: u64 = 64;

const SOURCE_SHIFT: u32 = 0;
const TARGET_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const PROMOTION_SHIFT: u32 = 16;
const CAPTURED_SHIFT: u32 = 20;
const DOUBLE_PUSH_BIT: u64 = 1 << 24;
const EN_PASSANT_BIT: u64 = 1 << 25;
const CASTLING_BIT: u64 = 1 << 26;
const RIGHTS_SHIFT: u32 = 27;
const PREV_EP_SHIFT: u32 = 31;

/// Everything above bit 26 belongs to the unmake record, not the move itself.
const MOVE_MASK: u64 = (1 << RIGHTS_SHIFT) - 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Move(u64);

/// Special-move flags for [`Move::new`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub double_push: bool,
    pub en_passant: bool,
    pub castling: bool,
}

impl MoveFlags {
    pub const QUIET: MoveFlags = MoveFlags { double_push: false, en_passant: false, castling: false };
    pub const DOUBLE_PUSH: MoveFlags = MoveFlags { double_push: true, en_passant: false, castling: false };
    pub const EN_PASSANT: MoveFlags = MoveFlags { double_push: false, en_passant: true, castling: false };
    pub const CASTLING: MoveFlags = MoveFlags { double_push: false, en_passant: false, castling: true };
}

impl Move {
    /// Empty slot in killer and PV tables. Never produced by the generator:
    /// a real move always carries a non-zero promotion field.
    pub const NULL: Move = Move(0);

    #[inline]
    pub fn new(source: Square, target: Square, piece: Piece, promotion: Option<Piece>, captured: Option<Piece>, flags: MoveFlags) -> Move {
        let mut raw = (source.index() as u64) << SOURCE_SHIFT
            | (target.index() as u64) << TARGET_SHIFT
            | (piece.index() as u64) << PIECE_SHIFT
            | promotion.map_or(NO_PIECE, |p| p.index() as u64) << PROMOTION_SHIFT
            | captured.map_or(NO_PIECE, |p| p.index() as u64) << CAPTURED_SHIFT;
        if flags.double_push { raw |= DOUBLE_PUSH_BIT; }
        if flags.en_passant { raw |= EN_PASSANT_BIT; }
        if flags.castling { raw |= CASTLING_BIT; }
        Move(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 { self.0 }
    #[inline]
    pub const fn is_null(self) -> bool { self.0 == 0 }

    #[inline]
    pub fn source(self) -> Square { Square::new((self.0 >> SOURCE_SHIFT & 0x3f) as u8) }
    #[inline]
    pub fn target(self) -> Square { Square::new((self.0 >> TARGET_SHIFT & 0x3f) as u8) }

    #[inline]
    pub fn piece(self) -> Piece {
        Piece::from_index((self.0 >> PIECE_SHIFT & 0xf) as usize).unwrap_or(Piece::WhitePawn)
    }

    #[inline]
    pub fn promotion(self) -> Option<Piece> { Piece::from_index((self.0 >> PROMOTION_SHIFT & 0xf) as usize) }

    #[inline]
    pub fn captured(self) -> Option<Piece> { Piece::from_index((self.0 >> CAPTURED_SHIFT & 0xf) as usize) }

    #[inline]
    pub fn is_capture(self) -> bool { (self.0 >> CAPTURED_SHIFT & 0xf) != NO_PIECE }
    #[inline]
    pub const fn is_double_push(self) -> bool { self.0 & DOUBLE_PUSH_BIT != 0 }
    #[inline]
    pub const fn is_en_passant(self) -> bool { self.0 & EN_PASSANT_BIT != 0 }
    #[inline]
    pub const fn is_castling(self) -> bool { self.0 & CASTLING_BIT != 0 }

    /// The move with any unmake-record fields removed.
    #[inline]
    pub const fn bare(self) -> Move { Move(self.0 & MOVE_MASK) }

    /// Stamps the pre-move castling rights and en passant square.
    #[inline]
    pub fn with_undo_state(self, rights: CastleRights, en_passant: Option<Square>) -> Move {
        let ep = en_passant.map_or(NO_SQUARE, |s| s.index() as u64);
        Move(self.bare().0 | (rights.bits() as u64) << RIGHTS_SHIFT | ep << PREV_EP_SHIFT)
    }

    #[inline]
    pub fn prior_castling(self) -> CastleRights { CastleRights::from_bits((self.0 >> RIGHTS_SHIFT & 0xf) as u8) }

    #[inline]
    pub fn prior_en_passant(self) -> Option<Square> { Square::try_new((self.0 >> PREV_EP_SHIFT & 0x7f) as usize) }
}

impl fmt::Display for Move {
    /// Long algebraic notation, e.g. `e2e4` or `e7e8q`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() { return write!(f, "0000"); }
        write!(f, "{}{}", self.source(), self.target())?;
        if let Some(p) = self.promotion() {
            write!(f, "{}", p.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

pub const MAX_MOVES: usize = 256;

/// Fixed-capacity move buffer; no legal position has more than 218 moves.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl Default for MoveList {
    fn default() -> Self { Self::new() }
}

impl MoveList {
    pub fn new() -> Self { Self { moves: [Move::NULL; MAX_MOVES], len: 0 } }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        if let Some(slot) = self.moves.get_mut(self.len) {
            *slot = mv;
            self.len += 1;
        }
    }

    #[inline]
    pub fn clear(&mut self) { self.len = 0; }
    #[inline]
    pub fn len(&self) -> usize { self.len }
    #[inline]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    #[inline]
    pub fn as_slice(&self) -> &[Move] { &self.moves[..self.len] }
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] { &mut self.moves[..self.len] }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> { self.as_slice().iter() }

    /// Keeps only the moves matching `f`, preserving order.
    pub fn retain(&mut self, mut f: impl FnMut(Move) -> bool) {
        let mut kept = 0;
        for i in 0..self.len {
            let mv = self.moves[i];
            if f(mv) {
                self.moves[kept] = mv;
                kept += 1;
            }
        }
        self.len = kept;
    }
}

impl Index<usize> for MoveList {
    type Output = Move;
    fn index(&self, i: usize) -> &Move { &self.as_slice()[i] }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|m| m.to_string())).finish()
    }
}
