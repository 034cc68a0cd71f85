use super::moves::Move;
use super::position::Position;
use super::types::{Color, Piece, Square};

/// Rook relocation for a castling king move, keyed by the king's target.
#[inline]
fn castle_rook(king_target: Square) -> Option<(Piece, Square, Square)> {
    match king_target {
        Square::G1 => Some((Piece::WhiteRook, Square::H1, Square::F1)),
        Square::C1 => Some((Piece::WhiteRook, Square::A1, Square::D1)),
        Square::G8 => Some((Piece::BlackRook, Square::H8, Square::F8)),
        Square::C8 => Some((Piece::BlackRook, Square::A8, Square::D8)),
        _ => None,
    }
}

/// Square of the pawn removed by an en passant capture landing on `target`.
#[inline]
fn en_passant_victim(mover: Color, target: Square) -> Square {
    match mover {
        Color::White => target.down(),
        Color::Black => target.up(),
    }
}

impl Position {
    #[inline]
    fn toggle(&mut self, piece: Piece, sq: Square) {
        let bit = super::bitboard::Bitboard::from_square(sq);
        self.pieces[piece.index()] ^= bit;
        self.occupancy[piece.color().index()] ^= bit;
    }

    /// Plays a pseudo-legal move.
    ///
    /// Returns the unmake record (the move stamped with the prior castling
    /// rights and en passant square) when the mover's king is safe afterwards.
    /// Otherwise the position is reverted and `None` is returned.
    pub fn make_move(&mut self, mv: Move) -> Option<Move> {
        let record = mv.with_undo_state(self.castling, self.en_passant);
        let us = self.side;
        let from = mv.source();
        let to = mv.target();
        let piece = mv.piece();

        self.en_passant = None;

        if let Some(victim) = mv.captured() {
            let at = if mv.is_en_passant() { en_passant_victim(us, to) } else { to };
            self.toggle(victim, at);
        }

        self.toggle(piece, from);
        self.toggle(mv.promotion().unwrap_or(piece), to);

        if mv.is_double_push() {
            self.en_passant = Some(en_passant_victim(us, to));
        } else if mv.is_castling() {
            if let Some((rook, rook_from, rook_to)) = castle_rook(to) {
                self.toggle(rook, rook_from);
                self.toggle(rook, rook_to);
            }
        }

        self.castling.update(from);
        self.castling.update(to);
        self.merge_occupancy();
        self.side = !us;
        self.debug_validate();

        let king_attacked = self.king_square(us).map_or(true, |k| self.is_square_attacked(k, self.side));
        if king_attacked {
            self.unmake_move(record);
            return None;
        }
        Some(record)
    }

    /// Exact inverse of the [`make_move`](Self::make_move) that produced `record`.
    pub fn unmake_move(&mut self, record: Move) {
        let us = !self.side;
        let from = record.source();
        let to = record.target();
        let piece = record.piece();

        if record.is_castling() {
            if let Some((rook, rook_from, rook_to)) = castle_rook(to) {
                self.toggle(rook, rook_to);
                self.toggle(rook, rook_from);
            }
        }

        self.toggle(record.promotion().unwrap_or(piece), to);
        self.toggle(piece, from);

        if let Some(victim) = record.captured() {
            let at = if record.is_en_passant() { en_passant_victim(us, to) } else { to };
            self.toggle(victim, at);
        }

        self.merge_occupancy();
        self.side = us;
        self.castling = record.prior_castling();
        self.en_passant = record.prior_en_passant();
        self.debug_validate();
    }

    /// Passes the turn. Returns the en passant square that was cleared so
    /// [`unmake_null_move`](Self::unmake_null_move) can put it back.
    pub fn make_null_move(&mut self) -> Option<Square> {
        let ep = self.en_passant.take();
        self.side = !self.side;
        ep
    }

    pub fn unmake_null_move(&mut self, en_passant: Option<Square>) {
        self.side = !self.side;
        self.en_passant = en_passant;
    }

    /// Plays a long-algebraic move if it is legal here.
    pub fn play_uci_move(&mut self, text: &str) -> Option<Move> {
        let mv = self.parse_move(text)?;
        self.make_move(mv)
    }
}
