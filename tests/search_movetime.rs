use kestrel::board::Position;
use kestrel::search::alphabeta::{SearchParams, Searcher};
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

#[test]
fn movetime_bounds_a_deep_search() {
    let mut pos = Position::startpos();
    let mut s = Searcher::default();
    let p = SearchParams { depth: 64, movetime: Some(Duration::from_millis(50)), ..SearchParams::default() };
    let t0 = Instant::now();
    let r = s.search_position(&mut pos, &p);
    assert!(t0.elapsed() < Duration::from_secs(5), "search overran: {:?}", t0.elapsed());
    assert!(r.nodes > 0);
    assert!(r.depth >= 1 && r.depth < 64, "depth {}", r.depth);
    assert!(r.bestmove.is_some());
    assert_eq!(pos, Position::startpos());
}

#[test]
fn external_stop_ends_search() {
    let mut pos = Position::from_fen(kestrel::board::position::TRICKY_FEN).unwrap();
    let mut s = Searcher::default();
    let stop = s.stop_handle();
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(100));
        stop.store(true, Ordering::Relaxed);
    });
    let t0 = Instant::now();
    let r = s.search_position(&mut pos, &SearchParams { depth: 64, ..SearchParams::default() });
    stopper.join().unwrap();
    assert!(t0.elapsed() < Duration::from_secs(5));
    assert!(r.depth < 64);
    assert!(r.bestmove.is_some());
}

#[test]
fn expired_budget_still_yields_a_legal_move() {
    let mut pos = Position::from_fen(kestrel::board::position::CMK_FEN).unwrap();
    let mut s = Searcher::default();
    let r = s.search_position(&mut pos, &SearchParams { depth: 10, movetime: Some(Duration::ZERO), ..SearchParams::default() });
    assert_eq!(r.depth, 0);
    let best = r.best.expect("fallback move");
    assert!(pos.make_move(best).is_some());
}
