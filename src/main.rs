use anyhow::{Context, Result};
use clap::Parser;
use kestrel::board::{named_fen, Position};
use kestrel::search::alphabeta::{SearchParams, Searcher};
use kestrel::uci::UciEngine;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Kestrel chess engine (UCI by default)", long_about = None)]
struct Args {
    /// Search this FEN (or named position) once and exit instead of speaking UCI
    #[arg(long)]
    fen: Option<String>,

    /// Default search depth
    #[arg(long, default_value_t = 6)]
    depth: u32,

    /// Movetime in milliseconds for the one-shot search
    #[arg(long)]
    movetime: Option<u64>,

    /// Disable null-move pruning
    #[arg(long, default_value_t = false)]
    no_nullmove: bool,

    /// Disable killer-move ordering
    #[arg(long, default_value_t = false)]
    no_killers: bool,

    /// Disable history ordering
    #[arg(long, default_value_t = false)]
    no_history: bool,

    /// Print the one-shot result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let params = SearchParams {
        depth: args.depth,
        movetime: args.movetime.map(Duration::from_millis),
        use_nullmove: !args.no_nullmove,
        use_killers: !args.no_killers,
        use_history: !args.no_history,
    };

    let Some(fen) = args.fen else {
        return UciEngine::with_params(params).run_loop();
    };

    let fen = named_fen(&fen).unwrap_or(fen.as_str());
    let mut pos = Position::from_fen(fen).with_context(|| format!("invalid FEN '{fen}'"))?;
    println!("{pos}");
    let mut searcher = Searcher::default();
    let res = searcher.search_position_with(&mut pos, &params, |r| {
        if !args.json {
            println!("info score {} depth {} nodes {} time {} pv {}", r.uci_score(), r.depth, r.nodes, r.elapsed_ms, r.pv.join(" "));
        }
    });
    if args.json {
        println!("{}", serde_json::to_string_pretty(&res)?);
    } else {
        println!("bestmove {}", res.bestmove.as_deref().unwrap_or("0000"));
    }
    Ok(())
}
