use kestrel::board::Position;
use kestrel::search::alphabeta::{SearchParams, Searcher};

const FEN: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 2 3";

fn run(fen: &str, use_killers: bool, use_history: bool) -> kestrel::search::SearchResult {
    let mut pos = Position::from_fen(fen).unwrap();
    let mut s = Searcher::default();
    let p = SearchParams { depth: 4, use_nullmove: false, use_killers, use_history, ..SearchParams::default() };
    s.search_position(&mut pos, &p)
}

#[test]
fn ordering_does_not_change_score() {
    // Without null-move pruning the fail-hard score is order independent.
    let base = run(FEN, false, false);
    for (k, h) in [(true, false), (false, true), (true, true)] {
        let r = run(FEN, k, h);
        assert_eq!(r.score_cp, base.score_cp, "killers={k} history={h}");
    }
}

#[test]
fn killers_and_history_reduce_nodes() {
    let plain = run(FEN, false, false);
    let ordered = run(FEN, true, true);
    assert!(ordered.nodes <= plain.nodes + plain.nodes / 10, "ordering did not help: {} vs {}", ordered.nodes, plain.nodes);
}

#[test]
fn history_table_is_populated_after_search() {
    let mut pos = Position::from_fen(FEN).unwrap();
    let mut s = Searcher::default();
    s.search_position(&mut pos, &SearchParams { depth: 4, ..SearchParams::default() });
    let t = s.ordering();
    let total: i32 = kestrel::board::Piece::ALL.iter().flat_map(|&p| (0..64).map(move |sq| (p, sq))).map(|(p, sq)| t.history(p, sq)).sum();
    assert!(total > 0);
}
