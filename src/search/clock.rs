use std::time::{Duration, Instant};

use crate::board::Color;

pub const DEFAULT_MOVES_TO_GO: u32 = 30;
/// Safety margin subtracted from every clock-based allocation.
const OVERHEAD_MS: u64 = 100;
const MIN_ALLOCATION_MS: u64 = 10;
/// Depth cap used when a clock rather than a depth bounds the search.
pub const CLOCK_DEPTH: u32 = 64;

/// Clock state from a UCI `go` command. All times in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeControl {
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: u64,
    pub binc: u64,
    pub movestogo: Option<u32>,
    pub movetime: Option<u64>,
}

impl TimeControl {
    pub fn is_set(&self) -> bool {
        self.movetime.is_some() || self.wtime.is_some() || self.btime.is_some()
    }

    /// Time budget for one move by `side`, if any clock applies.
    pub fn allocate(&self, side: Color) -> Option<Duration> {
        if let Some(mt) = self.movetime {
            return Some(Duration::from_millis(mt));
        }
        let (remaining, inc) = match side {
            Color::White => (self.wtime?, self.winc),
            Color::Black => (self.btime?, self.binc),
        };
        let moves = u64::from(self.movestogo.unwrap_or(DEFAULT_MOVES_TO_GO).max(1));
        let share = (remaining / moves).saturating_sub(OVERHEAD_MS) + inc;
        let ms = share.max(MIN_ALLOCATION_MS);
        log::info!("time allocation: {ms}ms (remaining {remaining}ms, inc {inc}ms, movestogo {moves})");
        Some(Duration::from_millis(ms))
    }
}

/// Wall-clock deadline polled by the searcher.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    stop_at: Option<Instant>,
}

impl Deadline {
    pub fn new(budget: Option<Duration>) -> Self {
        let start = Instant::now();
        Self { start, stop_at: budget.map(|d| start + d) }
    }

    pub fn unlimited() -> Self { Self::new(None) }

    #[inline]
    pub fn expired(&self) -> bool { self.stop_at.is_some_and(|t| Instant::now() >= t) }

    pub fn elapsed(&self) -> Duration { self.start.elapsed() }

    pub fn is_bounded(&self) -> bool { self.stop_at.is_some() }
}
