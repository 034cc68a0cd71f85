use anyhow::{Context, Result};
use clap::Parser;
use kestrel::board::{named_fen, Position};
use kestrel::search::alphabeta::{SearchParams, Searcher};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "kestrel-bench", version, about = "Benchmark Kestrel search NPS over a set of positions")]
struct Args {
    /// FEN strings or named positions; defaults to a small built-in set
    #[arg(long)]
    fen: Vec<String>,

    /// Movetime in milliseconds (ignored if depth is set)
    #[arg(long, default_value_t = 1000)]
    movetime: u64,

    /// Fixed search depth (overrides movetime when > 0)
    #[arg(long, default_value_t = 5)]
    depth: u32,

    /// Disable null-move pruning
    #[arg(long, default_value_t = false)]
    no_nullmove: bool,
}

const DEFAULT_SET: [&str; 4] = ["startpos", "trickypos", "killerpos", "cmkpos"];

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let fens: Vec<String> = if args.fen.is_empty() { DEFAULT_SET.iter().map(|s| s.to_string()).collect() } else { args.fen.clone() };

    let mut p = SearchParams { use_nullmove: !args.no_nullmove, ..SearchParams::default() };
    if args.depth > 0 { p.depth = args.depth; } else { p.depth = 64; p.movetime = Some(Duration::from_millis(args.movetime)); }

    let mut total_nodes = 0u64;
    let t_all = Instant::now();
    for fen in &fens {
        let text = named_fen(fen).unwrap_or(fen.as_str());
        let mut pos = Position::from_fen(text).with_context(|| format!("invalid FEN '{fen}'"))?;
        let mut s = Searcher::default();
        let t0 = Instant::now();
        let res = s.search_position(&mut pos, &p);
        let dt = t0.elapsed();
        let nps = if dt.as_secs_f64() > 0.0 { res.nodes as f64 / dt.as_secs_f64() } else { 0.0 };
        total_nodes += res.nodes;
        println!(
            "{fen}: bestmove={} score_cp={} depth={} nodes={} elapsed={:.3}s nps={:.1}",
            res.bestmove.unwrap_or_else(|| "(none)".to_string()), res.score_cp, res.depth, res.nodes, dt.as_secs_f64(), nps
        );
    }
    let dt = t_all.elapsed().as_secs_f64();
    println!("total nodes={total_nodes} elapsed={dt:.3}s nps={:.1}", total_nodes as f64 / dt.max(f64::EPSILON));
    Ok(())
}
