use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use serde::Serialize;

use crate::board::{Move, Position};
use crate::search::clock::Deadline;
use crate::search::eval::evaluate;
use crate::search::ordering::{OrderingTables, MAX_PLY};

/// Root window bound.
pub const INFINITY: i32 = 50_000;
/// Score of being mated at the root; mates found deeper score `MATE_VALUE - ply`.
pub const MATE_VALUE: i32 = 49_000;
/// Any score beyond this magnitude is a forced mate.
pub const MATE_BOUND: i32 = 48_000;

const NULL_MOVE_REDUCTION: i32 = 2;
/// Nodes between deadline checks; a power of two.
const POLL_INTERVAL: u64 = 4096;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub depth: u32,
    pub movetime: Option<Duration>,
    pub use_nullmove: bool,
    pub use_killers: bool,
    pub use_history: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { depth: 6, movetime: None, use_nullmove: true, use_killers: true, use_history: true }
    }
}

/// Telemetry for one completed iteration.
#[derive(Debug, Clone, Serialize)]
pub struct IterationReport {
    pub depth: u32,
    pub score: i32,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub pv: Vec<String>,
    /// Quiescence score at the end of the PV, from the root side's view.
    pub pv_eval: i32,
}

impl IterationReport {
    /// `cp <n>` or `mate <moves>` as the UCI `info score` field expects.
    pub fn uci_score(&self) -> String { format_score(self.score) }
}

pub fn format_score(score: i32) -> String {
    if score > MATE_BOUND {
        format!("mate {}", (MATE_VALUE - score + 1) / 2)
    } else if score < -MATE_BOUND {
        format!("mate -{}", (MATE_VALUE + score + 1) / 2)
    } else {
        format!("cp {score}")
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct SearchResult {
    pub bestmove: Option<String>,
    #[serde(skip)]
    pub best: Option<Move>,
    pub score_cp: i32,
    /// Deepest fully completed iteration; 0 if none finished.
    pub depth: u32,
    pub nodes: u64,
    pub pv: Vec<String>,
}

pub struct Searcher {
    ordering: OrderingTables,
    pv_table: Box<[[Move; MAX_PLY]; MAX_PLY]>,
    pv_length: [usize; MAX_PLY],
    pub(crate) nodes: u64,
    ply: usize,
    use_nullmove: bool,
    stop: Arc<AtomicBool>,
    deadline: Deadline,
}

impl Default for Searcher {
    fn default() -> Self {
        Self {
            ordering: OrderingTables::default(),
            pv_table: Box::new([[Move::NULL; MAX_PLY]; MAX_PLY]),
            pv_length: [0; MAX_PLY],
            nodes: 0,
            ply: 0,
            use_nullmove: true,
            stop: Arc::new(AtomicBool::new(false)),
            deadline: Deadline::unlimited(),
        }
    }
}

impl Searcher {
    /// Shared cancellation flag. Setting it from any thread ends the running
    /// search at the next node; the last completed iteration is kept.
    pub fn stop_handle(&self) -> Arc<AtomicBool> { self.stop.clone() }

    pub fn nodes(&self) -> u64 { self.nodes }

    pub fn ordering(&self) -> &OrderingTables { &self.ordering }

    #[inline]
    fn is_stopped(&self) -> bool { self.stop.load(Ordering::Relaxed) }

    #[inline]
    fn poll(&mut self) {
        if self.nodes & (POLL_INTERVAL - 1) == 0 && self.deadline.expired() {
            debug!("deadline reached after {} nodes", self.nodes);
            self.stop.store(true, Ordering::Relaxed);
        }
    }

    fn reset(&mut self, params: &SearchParams) {
        self.ordering.clear();
        self.ordering.use_killers = params.use_killers;
        self.ordering.use_history = params.use_history;
        self.use_nullmove = params.use_nullmove;
        for row in self.pv_table.iter_mut() { row.fill(Move::NULL); }
        self.pv_length = [0; MAX_PLY];
        self.nodes = 0;
        self.ply = 0;
        self.stop.store(false, Ordering::Relaxed);
        self.deadline = Deadline::new(params.movetime);
    }

    /// Capture-only search from `pos` with a full window.
    pub fn qsearch_eval(&mut self, pos: &mut Position) -> i32 {
        self.ply = 0;
        self.quiescence(pos, -INFINITY, INFINITY)
    }

    /// One fixed-depth negamax pass at the root, without resetting tables.
    pub fn search_depth(&mut self, pos: &mut Position, depth: u32) -> i32 {
        self.ply = 0;
        self.negamax(pos, -INFINITY, INFINITY, depth as i32)
    }

    fn quiescence(&mut self, pos: &mut Position, mut alpha: i32, beta: i32) -> i32 {
        self.poll();
        self.nodes += 1;
        if self.is_stopped() { return 0; }
        if self.ply >= MAX_PLY - 1 { return evaluate(pos); }

        let stand_pat = evaluate(pos);
        if stand_pat >= beta { return beta; }
        if stand_pat > alpha { alpha = stand_pat; }

        let mut moves = pos.generate_moves();
        moves.retain(|m| m.is_capture());
        self.ordering.sort_moves(&mut moves, self.ply);

        for &mv in moves.iter() {
            let Some(record) = pos.make_move(mv) else { continue };
            self.ply += 1;
            let score = -self.quiescence(pos, -beta, -alpha);
            self.ply -= 1;
            pos.unmake_move(record);

            if self.is_stopped() { return 0; }
            if score >= beta { return beta; }
            if score > alpha { alpha = score; }
        }
        alpha
    }

    fn negamax(&mut self, pos: &mut Position, mut alpha: i32, beta: i32, mut depth: i32) -> i32 {
        self.pv_length[self.ply] = self.ply;

        // Extend before the horizon test: a depth-1 search must find mate in one.
        let in_check = pos.in_check();
        if in_check { depth += 1; }

        if depth <= 0 { return self.quiescence(pos, alpha, beta); }
        if self.ply >= MAX_PLY - 1 { return evaluate(pos); }

        self.poll();
        self.nodes += 1;
        if self.is_stopped() { return 0; }

        if self.use_nullmove && depth >= 3 && !in_check && self.ply > 0 {
            // The null move counts as a ply so its subtree keeps its own PV row and killers.
            let ep = pos.make_null_move();
            self.ply += 1;
            let score = -self.negamax(pos, -beta, -beta + 1, depth - 1 - NULL_MOVE_REDUCTION);
            self.ply -= 1;
            pos.unmake_null_move(ep);
            if self.is_stopped() { return 0; }
            if score >= beta { return beta; }
        }

        let mut moves = pos.generate_moves();
        self.ordering.sort_moves(&mut moves, self.ply);

        let mut legal = 0;
        for &mv in moves.iter() {
            let Some(record) = pos.make_move(mv) else { continue };
            legal += 1;
            self.ply += 1;
            let score = -self.negamax(pos, -beta, -alpha, depth - 1);
            self.ply -= 1;
            pos.unmake_move(record);

            if self.is_stopped() { return 0; }

            if score >= beta {
                if !mv.is_capture() { self.ordering.update_killers(self.ply, mv); }
                return beta;
            }
            if score > alpha {
                if !mv.is_capture() { self.ordering.update_history(mv, depth); }
                alpha = score;
                self.update_pv(mv);
            }
        }

        if legal == 0 {
            return if in_check { -MATE_VALUE + self.ply as i32 } else { 0 };
        }
        alpha
    }

    fn update_pv(&mut self, mv: Move) {
        let ply = self.ply;
        let child_len = self.pv_length[ply + 1];
        self.pv_table[ply][ply] = mv.bare();
        for next in ply + 1..child_len {
            self.pv_table[ply][next] = self.pv_table[ply + 1][next];
        }
        self.pv_length[ply] = child_len.max(ply + 1);
    }

    /// The root principal variation from the last negamax pass.
    pub fn principal_variation(&self) -> Vec<Move> {
        self.pv_table[0][..self.pv_length[0]].iter().copied().filter(|m| !m.is_null()).collect()
    }

    /// Replays `pv`, scores the leaf with quiescence and restores `pos`.
    /// The result is from the perspective of the side to move in `pos`.
    fn evaluate_pv(&mut self, pos: &mut Position, pv: &[Move]) -> i32 {
        let root = pos.snapshot();
        let root_side = pos.side_to_move();
        for &mv in pv {
            if pos.make_move(mv).is_none() { break; }
        }
        let nodes = self.nodes;
        let leaf_score = self.qsearch_eval(pos);
        self.nodes = nodes;
        let score = if pos.side_to_move() == root_side { leaf_score } else { -leaf_score };
        pos.restore(&root);
        score
    }

    pub fn search_position(&mut self, pos: &mut Position, params: &SearchParams) -> SearchResult {
        self.search_position_with(pos, params, |_| {})
    }

    /// Iterative deepening from depth 1 to `params.depth`. `on_iteration` is
    /// called after every completed depth.
    pub fn search_position_with<F>(&mut self, pos: &mut Position, params: &SearchParams, mut on_iteration: F) -> SearchResult
    where
        F: FnMut(&IterationReport),
    {
        self.reset(params);
        let root = pos.snapshot();
        let mut result = SearchResult::default();

        for depth in 1..=params.depth.max(1) {
            let score = self.search_depth(pos, depth);
            pos.restore(&root);
            if self.is_stopped() {
                debug!("search interrupted at depth {depth} after {} nodes", self.nodes);
                break;
            }

            let pv = self.principal_variation();
            let pv_eval = self.evaluate_pv(pos, &pv);
            let report = IterationReport {
                depth,
                score,
                nodes: self.nodes,
                elapsed_ms: self.deadline.elapsed().as_millis() as u64,
                pv: pv.iter().map(|m| m.to_string()).collect(),
                pv_eval,
            };
            info!(
                "depth {} score {} nodes {} time {}ms pv {}",
                report.depth, report.uci_score(), report.nodes, report.elapsed_ms, report.pv.join(" ")
            );
            on_iteration(&report);

            result = SearchResult {
                bestmove: pv.first().map(|m| m.to_string()),
                best: pv.first().copied(),
                score_cp: score,
                depth,
                nodes: self.nodes,
                pv: report.pv,
            };
            if self.is_stopped() { break; }
        }

        // Interrupted before depth 1 finished: fall back to the first legal move.
        if result.best.is_none() {
            result.best = first_legal_move(pos);
            result.bestmove = result.best.map(|m| m.to_string());
        }
        result.nodes = self.nodes;
        result
    }
}

fn first_legal_move(pos: &mut Position) -> Option<Move> {
    pos.generate_moves().iter().copied().find(|&mv| match pos.make_move(mv) {
        Some(record) => {
            pos.unmake_move(record);
            true
        }
        None => false,
    })
}
