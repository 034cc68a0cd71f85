use anyhow::{Context, Result};
use clap::Parser;
use kestrel::board::{named_fen, Position};
use kestrel::perft::{perft, perft_divide, perft_parallel};
use std::time::Instant;

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for Kestrel")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or a named position such as "startpos" or "trickypos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
    /// Print per-root-move counts
    #[arg(long, default_value_t = false)]
    divide: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let fen = named_fen(&args.fen).unwrap_or(args.fen.as_str());
    let mut base = Position::from_fen(fen).with_context(|| format!("invalid FEN '{fen}'"))?;

    if args.divide {
        let d = perft_divide(&mut base, args.depth);
        for (mv, n) in &d.moves { println!("{mv}: {n}"); }
        println!("nodes: {}", d.total);
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build().context("thread pool")?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 { perft(&mut base, args.depth) } else { perft_parallel(&base, args.depth) };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
