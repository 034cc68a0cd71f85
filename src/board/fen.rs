use super::position::Position;
use super::types::{CastleRights, Color, Piece, Square};
use crate::error::FenError;

impl Position {
    /// Parses the first four FEN fields; move counters are accepted and ignored.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::MissingFields(fields.len()));
        }
        let mut pos = Position::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRankCount(ranks.len()));
        }
        for (row, rank) in ranks.iter().enumerate() {
            let mut file = 0usize;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) { return Err(FenError::InvalidPieceChar(c)); }
                    file += skip as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPieceChar(c))?;
                    if file >= 8 { return Err(FenError::InvalidRankWidth { rank: 8 - row, files: file + 1 }); }
                    let sq = Square::from_coords(file as u8, row as u8);
                    if piece.kind() == 0 && (row == 0 || row == 7) {
                        return Err(FenError::PawnOnBackRank(sq.to_string()));
                    }
                    pos.pieces[piece.index()].set(sq);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::InvalidRankWidth { rank: 8 - row, files: file });
            }
        }

        pos.side = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSide(other.to_string())),
        };

        if fields[2] != "-" {
            for c in fields[2].chars() {
                let flag = match c {
                    'K' => CastleRights::WHITE_KING,
                    'Q' => CastleRights::WHITE_QUEEN,
                    'k' => CastleRights::BLACK_KING,
                    'q' => CastleRights::BLACK_QUEEN,
                    _ => return Err(FenError::InvalidCastlingChar(c)),
                };
                pos.castling.insert(flag);
            }
        }

        pos.en_passant = match fields[3] {
            "-" => None,
            s => {
                let sq: Square = s.parse().map_err(|_| FenError::InvalidEnPassant(s.to_string()))?;
                // The square behind a pawn the opponent just pushed two ranks:
                // sixth rank with white to move, third with black to move.
                let (row, victim) = match pos.side {
                    Color::White => (2, Piece::BlackPawn),
                    Color::Black => (5, Piece::WhitePawn),
                };
                if sq.row() != row {
                    return Err(FenError::InvalidEnPassant(s.to_string()));
                }
                let pushed = if pos.side == Color::White { sq.down() } else { sq.up() };
                let vacated = Piece::ALL.iter().all(|p| !pos.pieces[p.index()].contains(sq));
                if !vacated || !pos.pieces[victim.index()].contains(pushed) {
                    return Err(FenError::InvalidEnPassant(s.to_string()));
                }
                Some(sq)
            }
        };

        for (color, name) in [(Color::White, "white"), (Color::Black, "black")] {
            if pos.pieces(Piece::king(color)).count() != 1 {
                return Err(FenError::BadKingCount(name));
            }
            if !pos.material_fits_promotions(color) {
                return Err(FenError::TooMuchMaterial(name));
            }
        }

        pos.refresh_occupancy();
        Ok(pos)
    }

    /// At most eight pawns, and every piece beyond the starting set must be
    /// accounted for by a missing pawn.
    fn material_fits_promotions(&self, color: Color) -> bool {
        let count = |piece: Piece| self.pieces(piece).count();
        let pawns = count(Piece::pawn(color));
        let promoted = count(Piece::knight(color)).saturating_sub(2)
            + count(Piece::bishop(color)).saturating_sub(2)
            + count(Piece::rook(color)).saturating_sub(2)
            + count(Piece::queen(color)).saturating_sub(1);
        pawns <= 8 && promoted <= 8 - pawns
    }

    /// Serializes the position; move counters are always written as `0 1`.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for row in 0..8u8 {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_on(Square::from_coords(file, row)) {
                    Some(p) => {
                        if empty > 0 { out.push_str(&empty.to_string()); empty = 0; }
                        out.push(p.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 { out.push_str(&empty.to_string()); }
            if row < 7 { out.push('/'); }
        }
        let side = if self.side == Color::White { "w" } else { "b" };
        let ep = self.en_passant.map_or("-".to_string(), |s| s.to_string());
        format!("{out} {side} {} {ep} 0 1", self.castling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::position::{KILLER_FEN, START_FEN, TRICKY_FEN};

    #[test]
    fn fen_round_trips() {
        for fen in [START_FEN, TRICKY_FEN, KILLER_FEN] {
            assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn counters_are_optional() {
        let p = Position::from_fen("8/k7/8/8/8/8/K7/8 b - -").unwrap();
        assert_eq!(p.side_to_move(), Color::Black);
        assert_eq!(p.castling(), CastleRights::NONE);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Position::from_fen("8/8/8 w - -"), Err(FenError::InvalidRankCount(3)));
        assert_eq!(Position::from_fen("rnbqkbnr/pppppppp"), Err(FenError::MissingFields(1)));
        assert!(matches!(Position::from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"), Err(FenError::InvalidPieceChar('x'))));
        assert!(matches!(Position::from_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"), Err(FenError::InvalidRankWidth { .. })));
        assert!(matches!(Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"), Err(FenError::InvalidSide(_))));
        assert!(matches!(Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KX - 0 1"), Err(FenError::InvalidCastlingChar('X'))));
        assert!(matches!(Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1"), Err(FenError::InvalidEnPassant(_))));
        assert!(matches!(Position::from_fen("8/8/8/8/8/8/8/K7 w - - 0 1"), Err(FenError::BadKingCount("black"))));
    }

    #[test]
    fn rejects_pawns_on_back_ranks() {
        assert_eq!(Position::from_fen("P3k3/8/8/8/8/8/8/4K3 w - - 0 1"), Err(FenError::PawnOnBackRank("a8".into())));
        assert_eq!(Position::from_fen("4k3/8/8/8/8/8/8/p3K3 b - - 0 1"), Err(FenError::PawnOnBackRank("a1".into())));
    }

    #[test]
    fn en_passant_square_must_follow_a_double_push() {
        // Wrong rank for the side to move.
        assert_eq!(Position::from_fen("4k3/8/8/8/8/8/3PP3/4K3 w - e3 0 1"), Err(FenError::InvalidEnPassant("e3".into())));
        assert_eq!(Position::from_fen("4k3/3pp3/8/8/8/8/8/4K3 b - e6 0 1"), Err(FenError::InvalidEnPassant("e6".into())));
        // No pushed pawn in front of the square.
        assert_eq!(Position::from_fen("4k3/8/8/3P4/8/8/8/4K3 w - e6 0 1"), Err(FenError::InvalidEnPassant("e6".into())));
        // Square occupied.
        assert_eq!(Position::from_fen("4k3/8/4n3/3Pp3/8/8/8/4K3 w - e6 0 1"), Err(FenError::InvalidEnPassant("e6".into())));
        let p = Position::from_fen("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1").unwrap();
        assert_eq!(p.en_passant(), "e6".parse().ok());
    }

    #[test]
    fn material_is_capped_by_promotions() {
        assert_eq!(Position::from_fen("QQQQQQQQ/QQQQQQQQ/8/8/8/8/8/k6K w - - 0 1"), Err(FenError::TooMuchMaterial("white")));
        assert_eq!(Position::from_fen("4k3/pppppppp/8/8/8/8/qq6/4K3 b - - 0 1"), Err(FenError::TooMuchMaterial("black")));
        // Nine queens and no pawns is reachable.
        assert!(Position::from_fen("QQQQQQQQ/Q7/8/8/8/8/8/k6K b - - 0 1").is_ok());
    }
}
