use crate::board::{Color, Piece, Position};

// Piece-square values from white's point of view, a8 first. Material is folded
// in, so a lone table lookup is the full worth of a piece on a square.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
    190, 190, 190, 190, 190, 190, 190, 190,
    130, 130, 130, 140, 140, 130, 130, 130,
    120, 120, 120, 130, 130, 130, 120, 120,
    110, 110, 110, 120, 120, 110, 110, 110,
    105, 105, 110, 120, 120, 105, 105, 105,
    100, 100, 100, 105, 105, 100, 100, 100,
    100, 100, 100,  90,  90, 100, 100, 100,
    100, 100, 100, 100, 100, 100, 100, 100,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    295, 300, 300, 300, 300, 300, 300, 295,
    295, 300, 300, 310, 310, 300, 300, 295,
    295, 305, 320, 320, 320, 320, 305, 295,
    295, 310, 320, 330, 330, 320, 310, 295,
    295, 310, 320, 330, 330, 320, 310, 295,
    295, 305, 320, 310, 310, 320, 305, 295,
    295, 300, 300, 300, 300, 300, 300, 295,
    295, 290, 300, 300, 300, 300, 290, 295,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    320, 320, 320, 320, 320, 320, 320, 320,
    320, 320, 320, 320, 320, 320, 320, 320,
    320, 320, 320, 330, 330, 320, 320, 320,
    320, 320, 330, 340, 340, 330, 320, 320,
    320, 320, 330, 340, 340, 330, 320, 320,
    320, 330, 320, 320, 320, 320, 330, 320,
    320, 350, 320, 320, 320, 320, 350, 320,
    320, 320, 310, 320, 320, 310, 320, 320,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
    550, 550, 550, 550, 550, 550, 550, 550,
    550, 550, 550, 550, 550, 550, 550, 550,
    500, 500, 510, 520, 520, 510, 500, 500,
    500, 500, 510, 520, 520, 510, 500, 500,
    500, 500, 510, 520, 520, 510, 500, 500,
    500, 500, 510, 520, 520, 510, 500, 500,
    500, 500, 510, 520, 520, 510, 500, 500,
    500, 500, 500, 520, 520, 500, 500, 500,
];

const QUEEN_TABLE: [i32; 64] = [1000; 64];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
    10000, 10000, 10000, 10000, 10000, 10000, 10000, 10000,
    10000, 10000, 10005, 10005, 10005, 10005, 10000, 10000,
    10000, 10005, 10005, 10010, 10010, 10005, 10005, 10000,
    10000, 10005, 10010, 10020, 10020, 10010, 10005, 10000,
    10000, 10005, 10010, 10020, 10020, 10010, 10005, 10000,
    10000, 10000, 10005, 10010, 10010, 10005, 10000, 10000,
    10000, 10005, 10005,  9995,  9995, 10000, 10005, 10000,
    10000, 10000, 10005, 10000,  9985, 10000, 10010, 10000,
];

const TABLES: [&[i32; 64]; 6] = [&PAWN_TABLE, &KNIGHT_TABLE, &BISHOP_TABLE, &ROOK_TABLE, &QUEEN_TABLE, &KING_TABLE];

/// Signed worth of `piece` on square index `sq`: positive for white, negative
/// for black. Black reads the white table through a vertical flip.
#[inline]
pub fn piece_square_value(piece: Piece, sq: usize) -> i32 {
    let table = TABLES[piece.kind()];
    match piece.color() {
        Color::White => table[sq],
        Color::Black => -table[sq ^ 56],
    }
}

/// Material plus placement, positive when white is better.
pub fn evaluate_white(pos: &Position) -> i32 {
    let mut score = 0;
    for piece in Piece::ALL {
        for sq in pos.pieces(piece) {
            score += piece_square_value(piece, sq.index());
        }
    }
    score
}

/// Static evaluation from the side to move's point of view (negamax-friendly).
pub fn evaluate(pos: &Position) -> i32 {
    let base = evaluate_white(pos);
    if pos.side_to_move() == Color::White { base } else { -base }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_is_balanced() {
        assert_eq!(evaluate(&Position::startpos()), 0);
    }

    #[test]
    fn black_tables_mirror_white() {
        for piece in Piece::of_color(Color::White) {
            let black = Piece::ALL[piece.index() + 6];
            for sq in 0..64 {
                assert_eq!(piece_square_value(black, sq ^ 56), -piece_square_value(*piece, sq));
            }
        }
        // The black pawn on d7 of the reference tables scores -90.
        assert_eq!(piece_square_value(Piece::BlackPawn, 11), -90);
    }

    #[test]
    fn sign_follows_side_to_move() {
        let white = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        let black = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").unwrap();
        assert!(evaluate(&white) > 900);
        assert_eq!(evaluate(&white), -evaluate(&black));
    }
}
