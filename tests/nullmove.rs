use kestrel::board::Position;
use kestrel::search::alphabeta::{SearchParams, Searcher, MATE_BOUND};

fn run(fen: &str, depth: u32, use_nullmove: bool) -> kestrel::search::SearchResult {
    let mut pos = Position::from_fen(fen).unwrap();
    let mut s = Searcher::default();
    s.search_position(&mut pos, &SearchParams { depth, use_nullmove, ..SearchParams::default() })
}

#[test]
fn nullmove_reduces_nodes_midgame() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 2 3";
    let r1 = run(fen, 4, false);
    let r2 = run(fen, 4, true);
    assert!(r2.nodes <= r1.nodes, "nullmove did not reduce nodes: {} vs {}", r2.nodes, r1.nodes);
    assert!(r2.bestmove.is_some());
}

#[test]
fn nullmove_keeps_short_mates() {
    let fen = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
    for use_nullmove in [false, true] {
        let r = run(fen, 4, use_nullmove);
        assert_eq!(r.bestmove.as_deref(), Some("a1a8"));
        assert!(r.score_cp > MATE_BOUND);
    }
}

#[test]
fn nullmove_irrelevant_below_depth_three() {
    // Null-move pruning needs depth >= 3 at a non-root node, so depth 2 searches
    // are identical with and without it.
    let fen = kestrel::board::position::TRICKY_FEN;
    let r1 = run(fen, 2, false);
    let r2 = run(fen, 2, true);
    assert_eq!(r1.nodes, r2.nodes);
    assert_eq!(r1.score_cp, r2.score_cp);
    assert_eq!(r1.bestmove, r2.bestmove);
}

#[test]
fn nullmove_pv_replays_legally() {
    let fens = [
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 2 3",
        kestrel::board::position::TRICKY_FEN,
        kestrel::board::position::CMK_FEN,
    ];
    for fen in fens {
        let r = run(fen, 4, true);
        assert!(!r.pv.is_empty(), "{fen}: empty pv");
        let mut pos = Position::from_fen(fen).unwrap();
        for mv in &r.pv {
            assert!(pos.play_uci_move(mv).is_some(), "{fen}: pv move {mv} in {:?} is not legal", r.pv);
        }
    }
}
