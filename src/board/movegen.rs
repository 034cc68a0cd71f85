//! Pseudo-legal move generation. King safety is checked afterwards by
//! [`Position::make_move`]; the only attack queries made here are the castling
//! transit checks.

use super::attacks;
use super::bitboard::Bitboard;
use super::moves::{Move, MoveFlags, MoveList};
use super::position::Position;
use super::types::{CastleRights, Color, Piece, Square};

struct CastlePath {
    flag: u8,
    king_from: Square,
    king_to: Square,
    /// Must be empty: every square between king and rook.
    between: &'static [Square],
    /// Must not be attacked: the king's square and the one it crosses.
    transit: [Square; 2],
}

const WHITE_CASTLES: [CastlePath; 2] = [
    CastlePath { flag: CastleRights::WHITE_KING, king_from: Square::E1, king_to: Square::G1, between: &[Square::F1, Square::G1], transit: [Square::E1, Square::F1] },
    CastlePath { flag: CastleRights::WHITE_QUEEN, king_from: Square::E1, king_to: Square::C1, between: &[Square::D1, Square::C1, Square::B1], transit: [Square::E1, Square::D1] },
];

const BLACK_CASTLES: [CastlePath; 2] = [
    CastlePath { flag: CastleRights::BLACK_KING, king_from: Square::E8, king_to: Square::G8, between: &[Square::F8, Square::G8], transit: [Square::E8, Square::F8] },
    CastlePath { flag: CastleRights::BLACK_QUEEN, king_from: Square::E8, king_to: Square::C8, between: &[Square::D8, Square::C8, Square::B8], transit: [Square::E8, Square::D8] },
];

impl Position {
    /// All pseudo-legal moves for the side to move.
    pub fn generate_moves(&self) -> MoveList {
        let mut list = MoveList::new();
        self.generate_moves_into(&mut list);
        list
    }

    pub fn generate_moves_into(&self, list: &mut MoveList) {
        list.clear();
        let us = self.side;
        let them = !us;
        let own = self.occupancy(us);
        let occ = self.occupied();

        self.generate_pawn_moves(list);
        self.generate_castles(list);

        for sq in self.pieces(Piece::knight(us)) {
            self.push_targets(list, Piece::knight(us), sq, attacks::knight_attacks(sq) & !own, them);
        }
        for sq in self.pieces(Piece::bishop(us)) {
            self.push_targets(list, Piece::bishop(us), sq, attacks::bishop_attacks(sq, occ) & !own, them);
        }
        for sq in self.pieces(Piece::rook(us)) {
            self.push_targets(list, Piece::rook(us), sq, attacks::rook_attacks(sq, occ) & !own, them);
        }
        for sq in self.pieces(Piece::queen(us)) {
            self.push_targets(list, Piece::queen(us), sq, attacks::queen_attacks(sq, occ) & !own, them);
        }
        for sq in self.pieces(Piece::king(us)) {
            self.push_targets(list, Piece::king(us), sq, attacks::king_attacks(sq) & !own, them);
        }
    }

    /// Splits `targets` into quiet moves and captures of the piece found there.
    #[inline]
    fn push_targets(&self, list: &mut MoveList, piece: Piece, from: Square, targets: Bitboard, them: Color) {
        for to in targets {
            let captured = self.piece_of_color_on(them, to);
            list.push(Move::new(from, to, piece, None, captured, MoveFlags::QUIET));
        }
    }

    fn generate_pawn_moves(&self, list: &mut MoveList) {
        let us = self.side;
        let them = !us;
        let pawn = Piece::pawn(us);
        let (start_rank, promo_from_rank) = match us {
            Color::White => (Bitboard::RANK_2, Bitboard::RANK_7),
            Color::Black => (Bitboard::RANK_7, Bitboard::RANK_2),
        };
        let promotions = [Piece::queen(us), Piece::rook(us), Piece::bishop(us), Piece::knight(us)];
        let occ = self.occupied();
        let enemies = self.occupancy(them);

        for from in self.pieces(pawn) {
            let promoting = promo_from_rank.contains(from);
            let push = |sq: Square| if us == Color::White { sq.up() } else { sq.down() };

            let to = push(from);
            if !occ.contains(to) {
                if promoting {
                    for promo in promotions {
                        list.push(Move::new(from, to, pawn, Some(promo), None, MoveFlags::QUIET));
                    }
                } else {
                    list.push(Move::new(from, to, pawn, None, None, MoveFlags::QUIET));
                    if start_rank.contains(from) {
                        let double = push(to);
                        if !occ.contains(double) {
                            list.push(Move::new(from, double, pawn, None, None, MoveFlags::DOUBLE_PUSH));
                        }
                    }
                }
            }

            let attacks = attacks::pawn_attacks(us, from);
            for to in attacks & enemies {
                let captured = self.piece_of_color_on(them, to);
                if promoting {
                    for promo in promotions {
                        list.push(Move::new(from, to, pawn, Some(promo), captured, MoveFlags::QUIET));
                    }
                } else {
                    list.push(Move::new(from, to, pawn, None, captured, MoveFlags::QUIET));
                }
            }

            if let Some(ep) = self.en_passant {
                if attacks.contains(ep) {
                    list.push(Move::new(from, ep, pawn, None, Some(Piece::pawn(them)), MoveFlags::EN_PASSANT));
                }
            }
        }
    }

    fn generate_castles(&self, list: &mut MoveList) {
        let us = self.side;
        let paths = if us == Color::White { &WHITE_CASTLES } else { &BLACK_CASTLES };
        let occ = self.occupied();
        for path in paths {
            if !self.castling.has(path.flag) { continue; }
            if path.between.iter().any(|&sq| occ.contains(sq)) { continue; }
            // The destination square is left to make_move's king-safety check.
            if path.transit.iter().any(|&sq| self.is_square_attacked(sq, !us)) { continue; }
            list.push(Move::new(path.king_from, path.king_to, Piece::king(us), None, None, MoveFlags::CASTLING));
        }
    }

    /// Looks up a long-algebraic move (`e2e4`, `e7e8q`) among the generated
    /// moves. A promotion needs a matching fifth letter; anything else yields
    /// `None`. Legality against king safety is not checked here.
    pub fn parse_move(&self, text: &str) -> Option<Move> {
        let text = text.trim();
        if text.len() < 4 || !text.is_ascii() { return None; }
        let from: Square = text[0..2].parse().ok()?;
        let to: Square = text[2..4].parse().ok()?;
        let promo_char = text[4..].chars().next().map(|c| c.to_ascii_lowercase());
        self.generate_moves().iter().copied().find(|m| {
            m.source() == from
                && m.target() == to
                && match m.promotion() {
                    None => true,
                    Some(p) => promo_char == Some(p.to_char().to_ascii_lowercase()),
                }
        })
    }
}
