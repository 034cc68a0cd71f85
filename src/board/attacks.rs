//! Precomputed attack tables.
//!
//! Leaper attacks (pawn, knight, king) are plain per-square masks. Slider
//! attacks are looked up through magic multiplication: the blockers inside a
//! square's relevant-occupancy mask are multiplied by that square's fixed
//! magic and shifted down to a dense index into the square's slice of a
//! flattened table.
//!
//! The tables are built once, on first use or by an explicit [`init`], and are
//! read-only afterwards, so they can be shared freely between search workers.

use std::sync::OnceLock;

use super::bitboard::Bitboard;
use super::magics::{BISHOP_MAGICS, BISHOP_RELEVANT_BITS, ROOK_MAGICS, ROOK_RELEVANT_BITS};
use super::types::{Color, Square};

#[derive(Clone, Copy, Debug, Default)]
struct Magic {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    offset: usize,
}

impl Magic {
    #[inline]
    fn index(&self, occupancy: Bitboard) -> usize {
        ((occupancy.0 & self.mask.0).wrapping_mul(self.magic) >> self.shift) as usize + self.offset
    }
}

pub struct AttackTables {
    pawn: [[Bitboard; 64]; 2],
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    bishop_magics: [Magic; 64],
    rook_magics: [Magic; 64],
    bishop_table: Box<[Bitboard]>,
    rook_table: Box<[Bitboard]>,
}

static TABLES: OnceLock<AttackTables> = OnceLock::new();

/// Builds the tables if they do not exist yet. Cheap after the first call.
pub fn init() {
    let _ = tables();
}

#[inline]
pub fn tables() -> &'static AttackTables {
    TABLES.get_or_init(AttackTables::build)
}

#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard { tables().pawn[color.index()][sq.index()] }

#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard { tables().knight[sq.index()] }

#[inline]
pub fn king_attacks(sq: Square) -> Bitboard { tables().king[sq.index()] }

#[inline]
pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    let t = tables();
    t.bishop_table[t.bishop_magics[sq.index()].index(occupancy)]
}

#[inline]
pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    let t = tables();
    t.rook_table[t.rook_magics[sq.index()].index(occupancy)]
}

#[inline]
pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

impl AttackTables {
    fn build() -> AttackTables {
        let mut pawn = [[Bitboard::EMPTY; 64]; 2];
        let mut knight = [Bitboard::EMPTY; 64];
        let mut king = [Bitboard::EMPTY; 64];
        for sq in Square::all() {
            pawn[Color::White.index()][sq.index()] = mask_pawn_attacks(Color::White, sq);
            pawn[Color::Black.index()][sq.index()] = mask_pawn_attacks(Color::Black, sq);
            knight[sq.index()] = mask_knight_attacks(sq);
            king[sq.index()] = mask_king_attacks(sq);
        }
        let (bishop_magics, bishop_table) = build_slider(&BISHOP_MAGICS, &BISHOP_RELEVANT_BITS, mask_bishop_occupancy, bishop_attacks_on_the_fly);
        let (rook_magics, rook_table) = build_slider(&ROOK_MAGICS, &ROOK_RELEVANT_BITS, mask_rook_occupancy, rook_attacks_on_the_fly);
        log::debug!("attack tables built: {} bishop and {} rook slots", bishop_table.len(), rook_table.len());
        AttackTables { pawn, knight, king, bishop_magics, rook_magics, bishop_table, rook_table }
    }
}

fn build_slider(
    magics: &[u64; 64],
    relevant_bits: &[u32; 64],
    mask_fn: fn(Square) -> Bitboard,
    attack_fn: fn(Square, Bitboard) -> Bitboard,
) -> ([Magic; 64], Box<[Bitboard]>) {
    let mut entries = [Magic::default(); 64];
    let mut offset = 0usize;
    for sq in Square::all() {
        let bits = relevant_bits[sq.index()];
        entries[sq.index()] = Magic { mask: mask_fn(sq), magic: magics[sq.index()], shift: 64 - bits, offset };
        offset += 1usize << bits;
    }
    let mut table = vec![Bitboard::EMPTY; offset].into_boxed_slice();
    for sq in Square::all() {
        let entry = entries[sq.index()];
        let bits = entry.mask.count();
        debug_assert_eq!(bits, relevant_bits[sq.index()]);
        for subset in 0..(1usize << bits) {
            let occupancy = set_occupancy(subset, entry.mask);
            table[entry.index(occupancy)] = attack_fn(sq, occupancy);
        }
    }
    (entries, table)
}

/// Maps the bits of `subset` onto the set squares of `mask`, lowest first.
pub fn set_occupancy(subset: usize, mut mask: Bitboard) -> Bitboard {
    let mut occupancy = Bitboard::EMPTY;
    let mut bit = 0;
    while let Some(sq) = mask.pop_lsb() {
        if subset & (1 << bit) != 0 {
            occupancy.set(sq);
        }
        bit += 1;
    }
    occupancy
}

fn mask_pawn_attacks(color: Color, sq: Square) -> Bitboard {
    let b = Bitboard::from_square(sq).0;
    let mut attacks = 0u64;
    match color {
        Color::White => {
            if b & Bitboard::NOT_H.0 != 0 { attacks |= b >> 7; }
            if b & Bitboard::NOT_A.0 != 0 { attacks |= b >> 9; }
        }
        Color::Black => {
            if b & Bitboard::NOT_H.0 != 0 { attacks |= b << 9; }
            if b & Bitboard::NOT_A.0 != 0 { attacks |= b << 7; }
        }
    }
    Bitboard(attacks)
}

fn mask_knight_attacks(sq: Square) -> Bitboard {
    let b = Bitboard::from_square(sq).0;
    let mut attacks = 0u64;
    // Each shift is kept only if the landing square did not wrap across the board edge.
    if (b >> 6) & Bitboard::NOT_AB.0 != 0 { attacks |= b >> 6; }
    if (b >> 10) & Bitboard::NOT_GH.0 != 0 { attacks |= b >> 10; }
    if (b >> 15) & Bitboard::NOT_A.0 != 0 { attacks |= b >> 15; }
    if (b >> 17) & Bitboard::NOT_H.0 != 0 { attacks |= b >> 17; }
    if (b << 6) & Bitboard::NOT_GH.0 != 0 { attacks |= b << 6; }
    if (b << 10) & Bitboard::NOT_AB.0 != 0 { attacks |= b << 10; }
    if (b << 15) & Bitboard::NOT_H.0 != 0 { attacks |= b << 15; }
    if (b << 17) & Bitboard::NOT_A.0 != 0 { attacks |= b << 17; }
    Bitboard(attacks)
}

fn mask_king_attacks(sq: Square) -> Bitboard {
    let b = Bitboard::from_square(sq).0;
    let mut attacks = (b >> 8) | (b << 8);
    if b & Bitboard::NOT_A.0 != 0 {
        attacks |= (b >> 1) | (b >> 9) | (b << 7);
    }
    if b & Bitboard::NOT_H.0 != 0 {
        attacks |= (b << 1) | (b << 9) | (b >> 7);
    }
    Bitboard(attacks)
}

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

// Rays with the last square before each edge dropped: an edge blocker never
// changes the attack set.
fn relevant_mask(sq: Square, dirs: &[(i8, i8); 4]) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    for &(dr, df) in dirs {
        let (mut r, mut f) = (sq.row() as i8 + dr, sq.file() as i8 + df);
        loop {
            let next_r = r + dr;
            let next_f = f + df;
            if !(0..8).contains(&r) || !(0..8).contains(&f) { break; }
            if !(0..8).contains(&next_r) || !(0..8).contains(&next_f) { break; }
            mask.set(Square::from_coords(f as u8, r as u8));
            r = next_r;
            f = next_f;
        }
    }
    mask
}

fn ray_attacks(sq: Square, blockers: Bitboard, dirs: &[(i8, i8); 4]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(dr, df) in dirs {
        let (mut r, mut f) = (sq.row() as i8 + dr, sq.file() as i8 + df);
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let target = Square::from_coords(f as u8, r as u8);
            attacks.set(target);
            if blockers.contains(target) { break; }
            r += dr;
            f += df;
        }
    }
    attacks
}

pub fn mask_bishop_occupancy(sq: Square) -> Bitboard { relevant_mask(sq, &BISHOP_DIRS) }

pub fn mask_rook_occupancy(sq: Square) -> Bitboard { relevant_mask(sq, &ROOK_DIRS) }

/// Bishop attacks traced ray by ray; the reference the magic table is built from.
pub fn bishop_attacks_on_the_fly(sq: Square, blockers: Bitboard) -> Bitboard { ray_attacks(sq, blockers, &BISHOP_DIRS) }

/// Rook attacks traced ray by ray.
pub fn rook_attacks_on_the_fly(sq: Square, blockers: Bitboard) -> Bitboard { ray_attacks(sq, blockers, &ROOK_DIRS) }
