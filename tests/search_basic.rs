use kestrel::board::Position;
use kestrel::search::alphabeta::{SearchParams, Searcher, MATE_BOUND, MATE_VALUE};
use std::fs::File;
use std::io::{BufRead, BufReader};

#[derive(Debug, serde::Deserialize)]
struct PosRec { fen: String, best: String }

fn load_positions() -> Vec<PosRec> {
    let path = std::env::var("KESTREL_TEST_POSITIONS").unwrap_or_else(|_| "tests/data/tactics.jsonl".to_string());
    let f = File::open(&path).expect("open tactics positions");
    let rdr = BufReader::new(f);
    rdr.lines().map_while(Result::ok).filter(|l| !l.trim().is_empty()).filter_map(|l| serde_json::from_str(&l).ok()).collect()
}

fn search(fen: &str, depth: u32) -> kestrel::search::SearchResult {
    let mut pos = Position::from_fen(fen).expect("valid fen");
    let mut s = Searcher::default();
    s.search_position(&mut pos, &SearchParams { depth, ..SearchParams::default() })
}

#[test]
fn tactics_find_expected_move() {
    let poses = load_positions();
    assert!(!poses.is_empty());
    for rec in &poses {
        let r = search(&rec.fen, 4);
        assert_eq!(r.bestmove.as_deref(), Some(rec.best.as_str()), "FEN {}", rec.fen);
    }
}

#[test]
fn mate_in_one_at_depth_one() {
    let r = search(kestrel::board::position::CHECKMATE_FEN, 1);
    assert_eq!(r.bestmove.as_deref(), Some("d1h5"));
    assert!(r.score_cp > MATE_BOUND, "expected mate score, got {}", r.score_cp);
    assert_eq!(r.score_cp, MATE_VALUE - 1);
}

#[test]
fn mated_side_has_no_move() {
    let mut pos = Position::from_fen(kestrel::board::position::CHECKMATE_FEN).unwrap();
    pos.play_uci_move("d1h5").unwrap();
    let mut s = Searcher::default();
    let r = s.search_position(&mut pos, &SearchParams { depth: 3, ..SearchParams::default() });
    assert_eq!(r.bestmove, None);
    assert_eq!(r.score_cp, -MATE_VALUE);
}

#[test]
fn stalemate_scores_zero() {
    let fen = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";
    let mut pos = Position::from_fen(fen).unwrap();
    let mut s = Searcher::default();
    assert_eq!(s.search_depth(&mut pos, 3), 0);
    let r = search(fen, 3);
    assert_eq!(r.bestmove, None);
    assert_eq!(r.score_cp, 0);
}

#[test]
fn search_is_deterministic() {
    let fen = kestrel::board::position::TRICKY_FEN;
    let r1 = search(fen, 4);
    let r2 = search(fen, 4);
    assert_eq!(r1.bestmove, r2.bestmove);
    assert_eq!(r1.score_cp, r2.score_cp);
    assert_eq!(r1.nodes, r2.nodes);
    assert_eq!(r1.pv, r2.pv);
}

#[test]
fn search_leaves_position_untouched() {
    let mut pos = Position::from_fen(kestrel::board::position::KILLER_FEN).unwrap();
    let before = pos;
    let mut s = Searcher::default();
    let r = s.search_position(&mut pos, &SearchParams { depth: 3, ..SearchParams::default() });
    assert_eq!(pos, before);
    let best = r.best.expect("a move");
    assert!(pos.make_move(best).is_some(), "best move {best} is not legal");
}

#[test]
fn iteration_reports_follow_depths() {
    let mut pos = Position::startpos();
    let mut s = Searcher::default();
    let mut reports = Vec::new();
    let r = s.search_position_with(&mut pos, &SearchParams { depth: 4, ..SearchParams::default() }, |rep| reports.push(rep.clone()));
    let depths: Vec<u32> = reports.iter().map(|r| r.depth).collect();
    assert_eq!(depths, vec![1, 2, 3, 4]);
    assert!(reports.windows(2).all(|w| w[0].nodes <= w[1].nodes));
    let last = reports.last().unwrap();
    assert_eq!(last.pv.first(), r.bestmove.as_ref());
    assert!(!last.pv.is_empty());
    // Startpos after a few symmetric plies is still close to level.
    assert!(last.pv_eval.abs() < 200, "pv eval {}", last.pv_eval);
}
