use kestrel::board::Position;
use kestrel::perft::{perft, perft_divide};

fn check(fen: &str, expected: &[u64]) {
    let mut p = Position::from_fen(fen).expect("valid fen");
    let before = p;
    for (i, &n) in expected.iter().enumerate() {
        let depth = i as u32 + 1;
        assert_eq!(perft(&mut p, depth), n, "perft({depth}) of {fen}");
    }
    assert_eq!(p, before, "perft left the position modified");
}

#[test]
fn perft_startpos_small_depths() {
    check(kestrel::board::position::START_FEN, &[20, 400, 8902, 197281]);
}

#[test]
fn perft_kiwipete() {
    check(kestrel::board::position::TRICKY_FEN, &[48, 2039, 97862]);
}

#[test]
fn perft_rook_endgame() {
    check(kestrel::board::position::ROOK_FEN, &[14, 191, 2812, 43238]);
}

#[test]
fn perft_promotions_and_checks() {
    check("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1", &[6, 264, 9467]);
    check("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8", &[44, 1486, 62379]);
}

#[test]
fn perft_quiet_middlegame() {
    check("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P3/2NP1N2/PPP1QPPP/R4RK1 w - - 0 10", &[46, 2079, 89890]);
}

#[test]
fn divide_on_kiwipete_sums() {
    let mut p = Position::from_fen(kestrel::board::position::TRICKY_FEN).unwrap();
    let d = perft_divide(&mut p, 2);
    assert_eq!(d.moves.len(), 48);
    assert_eq!(d.total, 2039);
    assert!(d.moves.iter().any(|(m, _)| m == "e1g1"));
    assert!(d.moves.iter().any(|(m, _)| m == "e1c1"));
}

#[test]
#[ignore = "slow in debug builds"]
fn perft_startpos_depth_5() {
    let mut p = Position::startpos();
    assert_eq!(perft(&mut p, 5), 4_865_609);
}
