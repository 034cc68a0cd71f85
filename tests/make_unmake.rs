use kestrel::board::position::{KILLER_FEN, PROMOTION_FEN, START_FEN, TRICKY_FEN};
use kestrel::board::Position;
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Walks random legal games; at every node each pseudo-legal move must unmake
/// back to the identical position.
fn walk(fen: &str, seed: u64, plies: usize) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut pos = Position::from_fen(fen).unwrap();
    for _ in 0..plies {
        let before = pos;
        let mut legal = Vec::new();
        for &mv in pos.generate_moves().iter() {
            if let Some(record) = pos.make_move(mv) {
                assert!(pos.is_consistent(), "inconsistent after {mv}");
                legal.push(mv);
                pos.unmake_move(record);
            }
            assert_eq!(pos, before, "{mv} did not restore {}", before.to_fen());
        }
        let Some(&mv) = legal.choose(&mut rng) else { break };
        pos.make_move(mv).expect("move was legal a moment ago");
    }
}

#[test]
fn random_games_round_trip() {
    for (i, fen) in [START_FEN, TRICKY_FEN, KILLER_FEN, PROMOTION_FEN].iter().enumerate() {
        for seed in 0..4 {
            walk(fen, seed * 10 + i as u64, 80);
        }
    }
}

#[test]
fn snapshot_restore_after_a_line() {
    let mut pos = Position::from_fen(TRICKY_FEN).unwrap();
    let snap = pos.snapshot();
    for text in ["e1g1", "h3g2", "e5f7", "e7f7"] {
        assert!(pos.play_uci_move(text).is_some(), "{text}");
    }
    assert!(pos.is_consistent());
    pos.restore(&snap);
    assert_eq!(pos, Position::from_fen(TRICKY_FEN).unwrap());
}

#[test]
fn unmake_restores_en_passant_square_after_quiet_move() {
    let mut pos = Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2").unwrap();
    pos.play_uci_move("f7f5").unwrap();
    let with_ep = pos;
    assert_eq!(with_ep.en_passant().map(|s| s.to_string()), Some("f6".to_string()));
    let rec = pos.play_uci_move("g1f3").unwrap();
    assert_eq!(pos.en_passant(), None);
    pos.unmake_move(rec);
    assert_eq!(pos, with_ep);
}

#[test]
fn promotion_capture_round_trip() {
    let mut pos = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let before = pos;
    let rec = pos.play_uci_move("a7b8q").unwrap();
    assert_eq!(pos.piece_on("b8".parse().unwrap()), Some(kestrel::board::Piece::WhiteQueen));
    assert_eq!(pos.pieces(kestrel::board::Piece::BlackRook).count(), 0);
    pos.unmake_move(rec);
    assert_eq!(pos, before);
}
