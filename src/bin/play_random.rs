use anyhow::{bail, Result};
use clap::Parser;
use kestrel::board::{Color, Position};
use kestrel::perft::legal_moves;
use kestrel::search::alphabeta::{SearchParams, Searcher, MATE_BOUND};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(name = "play-random", about = "Engine vs random mover smoke games")]
struct Args {
    /// Number of games
    #[arg(long, default_value_t = 4)]
    games: usize,
    /// Engine search depth
    #[arg(long, default_value_t = 3)]
    depth: u32,
    /// Stop a game after this many plies
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    /// RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome { EngineWins, RandomWins, Draw, Unfinished }

fn play_game(rng: &mut SmallRng, engine_side: Color, depth: u32, max_plies: usize) -> Result<Outcome> {
    let mut pos = Position::startpos();
    let mut searcher = Searcher::default();
    let params = SearchParams { depth, ..SearchParams::default() };

    for _ in 0..max_plies {
        let moves = legal_moves(&mut pos);
        if moves.is_empty() {
            if !pos.in_check() { return Ok(Outcome::Draw); }
            return Ok(if pos.side_to_move() == engine_side { Outcome::RandomWins } else { Outcome::EngineWins });
        }
        let mv = if pos.side_to_move() == engine_side {
            let res = searcher.search_position(&mut pos, &params);
            if res.score_cp.abs() > MATE_BOUND { log::debug!("engine sees mate: {}", res.score_cp); }
            match res.best {
                Some(m) => m,
                None => bail!("engine returned no move with {} legal moves available", moves.len()),
            }
        } else {
            match moves.choose(rng) {
                Some(&m) => m,
                None => bail!("empty move list"),
            }
        };
        if pos.make_move(mv).is_none() { bail!("illegal move {mv} in {}", pos.to_fen()); }
    }
    Ok(Outcome::Unfinished)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut tally = [0usize; 4];
    for g in 0..args.games {
        let side = if g % 2 == 0 { Color::White } else { Color::Black };
        let outcome = play_game(&mut rng, side, args.depth, args.max_plies)?;
        println!("game {}: engine as {:?} -> {:?}", g + 1, side, outcome);
        tally[outcome as usize] += 1;
    }
    println!("engine wins={} random wins={} draws={} unfinished={}", tally[0], tally[1], tally[2], tally[3]);
    Ok(())
}
