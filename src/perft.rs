// Leaf counting over legal moves, using make/unmake (no cloning below the root)
use rayon::prelude::*;
use serde::Serialize;

use crate::board::{Move, Position};

pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let mut nodes = 0u64;
    let moves = pos.generate_moves();
    for &mv in moves.iter() {
        let Some(record) = pos.make_move(mv) else { continue };
        nodes += perft(pos, depth - 1);
        pos.unmake_move(record);
    }
    nodes
}

/// Legal root moves of `pos`, in generator order.
pub fn legal_moves(pos: &mut Position) -> Vec<Move> {
    let moves = pos.generate_moves();
    moves
        .iter()
        .copied()
        .filter(|&mv| match pos.make_move(mv) {
            Some(record) => {
                pos.unmake_move(record);
                true
            }
            None => false,
        })
        .collect()
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Divide {
    pub moves: Vec<(String, u64)>,
    pub total: u64,
}

/// Per-root-move leaf counts.
pub fn perft_divide(pos: &mut Position, depth: u32) -> Divide {
    let mut out = Divide::default();
    if depth == 0 {
        out.total = 1;
        return out;
    }
    for mv in legal_moves(pos) {
        let Some(record) = pos.make_move(mv) else { continue };
        let n = perft(pos, depth - 1);
        pos.unmake_move(record);
        out.moves.push((mv.to_string(), n));
        out.total += n;
    }
    out
}

/// Root-split perft: each legal root move is counted on its own copy of the
/// position by the current rayon pool.
pub fn perft_parallel(pos: &Position, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let mut root = *pos;
    let moves = legal_moves(&mut root);
    moves
        .par_iter()
        .map(|&mv| {
            let mut child = root;
            match child.make_move(mv) {
                Some(_) => perft(&mut child, depth - 1),
                None => 0,
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_startpos_counts() {
        let mut p = Position::startpos();
        assert_eq!(perft(&mut p, 0), 1);
        assert_eq!(perft(&mut p, 1), 20);
        assert_eq!(perft(&mut p, 2), 400);
        assert_eq!(p, Position::startpos());
    }

    #[test]
    fn divide_sums_to_total() {
        let mut p = Position::startpos();
        let d = perft_divide(&mut p, 3);
        assert_eq!(d.moves.len(), 20);
        assert_eq!(d.total, 8902);
        assert_eq!(d.moves.iter().map(|(_, n)| n).sum::<u64>(), d.total);
    }

    #[test]
    fn parallel_matches_serial() {
        let mut p = Position::from_fen(crate::board::position::TRICKY_FEN).unwrap();
        assert_eq!(perft_parallel(&p, 2), perft(&mut p, 2));
    }
}
