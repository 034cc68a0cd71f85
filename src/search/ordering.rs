use crate::board::{Move, MoveList, Piece};

pub const MAX_PLY: usize = 128;

/// Bias that lifts every capture above every quiet move.
pub const CAPTURE_BONUS: i32 = 10_000;
pub const FIRST_KILLER: i32 = 9_000;
pub const SECOND_KILLER: i32 = 8_000;

/// Most valuable victim, least valuable attacker: `[attacker kind][victim kind]`.
#[rustfmt::skip]
const MVV_LVA: [[i32; 6]; 6] = [
    [105, 205, 305, 405, 505, 605],
    [104, 204, 304, 404, 504, 604],
    [103, 203, 303, 403, 503, 603],
    [102, 202, 302, 402, 502, 602],
    [101, 201, 301, 401, 501, 601],
    [100, 200, 300, 400, 500, 600],
];

#[inline]
pub fn mvv_lva(attacker: Piece, victim: Piece) -> i32 { MVV_LVA[attacker.kind()][victim.kind()] }

/// Per-search ordering state: two killer slots per ply and a history score
/// per (piece, target square).
#[derive(Clone)]
pub struct OrderingTables {
    killers: [[Move; MAX_PLY]; 2],
    history: [[i32; 64]; Piece::COUNT],
    pub use_killers: bool,
    pub use_history: bool,
}

impl Default for OrderingTables {
    fn default() -> Self {
        Self {
            killers: [[Move::NULL; MAX_PLY]; 2],
            history: [[0; 64]; Piece::COUNT],
            use_killers: true,
            use_history: true,
        }
    }
}

impl OrderingTables {
    pub fn clear(&mut self) {
        self.killers = [[Move::NULL; MAX_PLY]; 2];
        self.history = [[0; 64]; Piece::COUNT];
    }

    pub fn killer(&self, slot: usize, ply: usize) -> Move { self.killers[slot][ply] }

    pub fn history(&self, piece: Piece, target: usize) -> i32 { self.history[piece.index()][target] }

    /// Records a quiet cutoff move; the old first killer slides to the second slot.
    pub fn update_killers(&mut self, ply: usize, mv: Move) {
        if !self.use_killers || ply >= MAX_PLY { return; }
        let mv = mv.bare();
        self.killers[1][ply] = self.killers[0][ply];
        self.killers[0][ply] = mv;
    }

    pub fn update_history(&mut self, mv: Move, depth: i32) {
        if !self.use_history { return; }
        self.history[mv.piece().index()][mv.target().index()] += depth;
    }

    pub fn score_move(&self, mv: Move, ply: usize) -> i32 {
        if let Some(victim) = mv.captured() {
            return mvv_lva(mv.piece(), victim) + CAPTURE_BONUS;
        }
        let mv = mv.bare();
        if self.use_killers && ply < MAX_PLY {
            if self.killers[0][ply] == mv { return FIRST_KILLER; }
            if self.killers[1][ply] == mv { return SECOND_KILLER; }
        }
        if self.use_history { self.history[mv.piece().index()][mv.target().index()] } else { 0 }
    }

    /// Selection sort, highest score first. Equal scores keep generator order.
    pub fn sort_moves(&self, moves: &mut MoveList, ply: usize) {
        let moves = moves.as_mut_slice();
        let mut scores = [0i32; crate::board::MAX_MOVES];
        for (i, &mv) in moves.iter().enumerate() {
            scores[i] = self.score_move(mv, ply);
        }
        let n = moves.len();
        for current in 0..n {
            for next in current + 1..n {
                if scores[next] > scores[current] {
                    scores.swap(current, next);
                    moves.swap(current, next);
                }
            }
        }
    }
}
