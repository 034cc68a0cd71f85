use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use kestrel::board::Position;
use kestrel::perft::perft_parallel;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "perft-suite", about = "Check perft counts from a JSON Lines suite")]
struct Args {
    /// Suite file, one {"name", "fen", "counts"} record per line
    #[arg(long, default_value = "tests/data/perft_suite.jsonl")]
    file: PathBuf,
    /// Skip depths above this
    #[arg(long, default_value_t = 4)]
    max_depth: u32,
    /// Worker threads for the root split
    #[arg(long, default_value_t = 1)]
    threads: usize,
}

#[derive(Debug, serde::Deserialize)]
struct SuiteRecord {
    name: String,
    fen: String,
    /// Expected leaf counts for depth 1, 2, ...
    counts: Vec<u64>,
}

fn load(path: &PathBuf) -> Result<Vec<SuiteRecord>> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut out = Vec::new();
    for (i, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        out.push(serde_json::from_str(&line).with_context(|| format!("{}:{}", path.display(), i + 1))?);
    }
    Ok(out)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let suite = load(&args.file)?;
    let jobs: u64 = suite.iter().map(|r| r.counts.len().min(args.max_depth as usize) as u64).sum();

    let pb = ProgressBar::new(jobs);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?.progress_chars("##-"));
    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build().context("thread pool")?;

    let mut failures = 0;
    for rec in &suite {
        let pos = Position::from_fen(&rec.fen).with_context(|| format!("record '{}'", rec.name))?;
        for (i, &expected) in rec.counts.iter().enumerate().take(args.max_depth as usize) {
            let depth = i as u32 + 1;
            pb.set_message(format!("{} d{depth}", rec.name));
            let got = pool.install(|| perft_parallel(&pos, depth));
            if got != expected {
                failures += 1;
                pb.println(format!("FAIL {} depth {depth}: expected {expected}, got {got}", rec.name));
            }
            pb.inc(1);
        }
    }
    pb.finish_with_message("done");

    if failures > 0 { bail!("{failures} perft mismatches"); }
    println!("all {jobs} perft checks passed");
    Ok(())
}
