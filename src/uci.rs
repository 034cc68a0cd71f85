use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::{debug, warn};

use crate::board::{named_fen, Position};
use crate::error::UciError;
use crate::perft::perft_divide;
use crate::search::alphabeta::{SearchParams, Searcher};
use crate::search::clock::{TimeControl, CLOCK_DEPTH};
use crate::search::eval::evaluate;

/// Parsed arguments of a `go` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoCommand {
    Search { depth: Option<u32>, clock: TimeControl },
    Perft(u32),
    Eval,
}

pub struct UciEngine {
    pos: Position,
    searcher: Searcher,
    params: SearchParams,
}

impl Default for UciEngine {
    fn default() -> Self { Self::new() }
}

impl UciEngine {
    pub fn new() -> Self { Self::with_params(SearchParams::default()) }

    /// `params` supplies the defaults for every `go` (depth when none is given,
    /// heuristic toggles).
    pub fn with_params(params: SearchParams) -> Self {
        Self { pos: Position::startpos(), searcher: Searcher::default(), params }
    }

    pub fn position(&self) -> &Position { &self.pos }

    pub fn searcher(&self) -> &Searcher { &self.searcher }

    fn cmd_uci(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "id name Kestrel {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "id author Kestrel developers")?;
        writeln!(out, "uciok")
    }

    /// `position (startpos|fen <fen>|<named>) [moves m1 m2 ...]`.
    ///
    /// Moves are played one by one; on an illegal move the position keeps the
    /// moves before it and the error is returned.
    pub fn set_position(&mut self, args: &str) -> Result<(), UciError> {
        let tokens: Vec<&str> = args.split_whitespace().collect();
        let moves_at = tokens.iter().position(|&t| t == "moves").unwrap_or(tokens.len());
        let (setup, moves) = tokens.split_at(moves_at);

        self.pos = match setup {
            ["fen", fields @ ..] => Position::from_fen(&fields.join(" "))?,
            [name] => {
                let fen = named_fen(name).ok_or_else(|| UciError::UnknownPosition(name.to_string()))?;
                Position::from_fen(fen)?
            }
            _ => return Err(UciError::UnknownPosition(setup.join(" "))),
        };

        for text in moves.iter().skip(1) {
            if self.pos.play_uci_move(text).is_none() {
                return Err(UciError::IllegalMove(text.to_string()));
            }
        }
        Ok(())
    }

    pub fn parse_go(args: &str) -> Result<GoCommand, UciError> {
        fn number<T: std::str::FromStr>(name: &'static str, value: Option<&str>) -> Result<T, UciError> {
            let value = value.unwrap_or_default();
            value.parse().map_err(|_| UciError::BadNumber { name, value: value.to_string() })
        }

        let mut depth = None;
        let mut clock = TimeControl::default();
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            match tok {
                "depth" => depth = Some(number("depth", tokens.next())?),
                "perft" => return Ok(GoCommand::Perft(number("perft", tokens.next())?)),
                "eval" => return Ok(GoCommand::Eval),
                "wtime" => clock.wtime = Some(number("wtime", tokens.next())?),
                "btime" => clock.btime = Some(number("btime", tokens.next())?),
                "winc" => clock.winc = number("winc", tokens.next())?,
                "binc" => clock.binc = number("binc", tokens.next())?,
                "movestogo" => clock.movestogo = Some(number("movestogo", tokens.next())?),
                "movetime" => clock.movetime = Some(number("movetime", tokens.next())?),
                other => debug!("ignoring go token '{other}'"),
            }
        }
        Ok(GoCommand::Search { depth, clock })
    }

    fn cmd_go(&mut self, args: &str, out: &mut impl Write) -> Result<()> {
        match Self::parse_go(args)? {
            GoCommand::Perft(depth) => {
                let divide = perft_divide(&mut self.pos, depth);
                for (mv, n) in &divide.moves {
                    writeln!(out, "{mv}: {n}")?;
                }
                writeln!(out, "\nNodes searched: {}", divide.total)?;
            }
            GoCommand::Eval => {
                writeln!(out, "info string eval {}", evaluate(&self.pos))?;
            }
            GoCommand::Search { depth, clock } => {
                let mut params = self.params;
                params.movetime = clock.allocate(self.pos.side_to_move());
                params.depth = match (depth, clock.is_set()) {
                    (Some(d), _) => d,
                    (None, true) => CLOCK_DEPTH,
                    (None, false) => self.params.depth,
                };

                let mut write_err = None;
                let result = self.searcher.search_position_with(&mut self.pos, &params, |r| {
                    let line = format!(
                        "info score {} depth {} nodes {} time {} pv {}",
                        r.uci_score(), r.depth, r.nodes, r.elapsed_ms, r.pv.join(" ")
                    );
                    if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
                        write_err.get_or_insert(e);
                    }
                });
                if let Some(e) = write_err { return Err(e.into()); }
                writeln!(out, "bestmove {}", result.bestmove.as_deref().unwrap_or("0000"))?;
            }
        }
        Ok(())
    }

    /// Handles one command line. Returns `false` on `quit`.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<bool> {
        let line = line.trim();
        let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match cmd {
            "" => {}
            "uci" => self.cmd_uci(out)?,
            "isready" => writeln!(out, "readyok")?,
            "ucinewgame" => self.pos = Position::startpos(),
            "position" => {
                if let Err(e) = self.set_position(rest) {
                    warn!("position: {e}");
                }
            }
            "go" => {
                if let Err(e) = self.cmd_go(rest, out) {
                    match e.downcast_ref::<UciError>() {
                        Some(uci) => warn!("go: {uci}"),
                        None => return Err(e),
                    }
                }
            }
            "d" => writeln!(out, "{}\n     Fen:         {}\n", self.pos, self.pos.to_fen())?,
            "quit" => return Ok(false),
            other => debug!("ignoring unknown command '{other}'"),
        }
        out.flush()?;
        Ok(true)
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        for line in input.lines() {
            if !self.handle_line(&line?, &mut out)? { break; }
        }
        Ok(())
    }

    pub fn run_loop(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run(stdin.lock(), stdout.lock())
    }
}
