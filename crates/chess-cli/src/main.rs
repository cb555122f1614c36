//! Command-line driver for the chess rules engine.
//!
//! Counts perft nodes, lists legal moves, and replays games given in
//! algebraic notation. Set `RUST_LOG=chess_rules=debug` to see every move
//! the engine accepts or rejects.

mod config;

use anyhow::{bail, Context};
use chess_rules::{perft, perft_divide, Game, GameOptions, Outcome, PositionState};
use chess_types::Fen;
use clap::{Parser, Subcommand};
use config::CliConfig;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Chess rules engine: perft, legal moves and game replay")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count leaf nodes of the move tree
    Perft {
        /// Position to search from
        #[arg(long, default_value = Fen::STARTPOS)]
        fen: String,

        /// Search depth in plies
        #[arg(long)]
        depth: u32,

        /// Print the node count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// List the legal moves of a position in algebraic notation
    Legal {
        /// Position to list moves for
        #[arg(long, default_value = Fen::STARTPOS)]
        fen: String,
    },
    /// Replay a sequence of moves and report the outcome
    Play {
        /// Starting position (defaults to the initial position)
        #[arg(long)]
        fen: Option<String>,

        /// Moves in algebraic notation, e.g. e4 e5 Nf3
        moves: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let config = CliConfig::load_or_default(cli.config.as_deref())
        .with_context(|| format!("loading configuration {:?}", cli.config))?;
    tracing::debug!(?config, "configuration loaded");

    let output = match cli.command {
        Command::Perft { fen, depth, divide } => run_perft(&fen, depth, divide)?,
        Command::Legal { fen } => run_legal(&fen, config.game)?,
        Command::Play { fen, moves } => run_play(fen.as_deref(), &moves, config.game)?,
    };
    print!("{}", output);
    Ok(())
}

fn run_perft(fen: &str, depth: u32, divide: bool) -> anyhow::Result<String> {
    let position = PositionState::from_fen(fen).with_context(|| format!("invalid FEN {:?}", fen))?;
    let start = Instant::now();
    let mut out = String::new();

    let nodes = if divide {
        let results = perft_divide(&position, depth);
        for (mv, count) in &results {
            writeln!(out, "{}: {}", mv, count)?;
        }
        results.iter().map(|(_, count)| count).sum()
    } else {
        perft(&position, depth)
    };

    tracing::info!(depth, nodes, elapsed = ?start.elapsed(), "perft finished");
    writeln!(out, "nodes: {}", nodes)?;
    Ok(out)
}

fn run_legal(fen: &str, options: GameOptions) -> anyhow::Result<String> {
    let game =
        Game::from_fen_with_options(fen, options).with_context(|| format!("invalid FEN {:?}", fen))?;
    let mut notations: Vec<String> = game
        .legal_moves()
        .iter()
        .map(|&m| game.notate_move(m))
        .collect();
    notations.sort();

    let mut out = String::new();
    for notation in &notations {
        writeln!(out, "{}", notation)?;
    }
    Ok(out)
}

fn run_play(fen: Option<&str>, moves: &[String], options: GameOptions) -> anyhow::Result<String> {
    let mut game = match fen {
        Some(fen) => Game::from_fen_with_options(fen, options)
            .with_context(|| format!("invalid FEN {:?}", fen))?,
        None => Game::with_options(options),
    };

    let mut out = String::new();
    let mut outcome = Outcome::None;
    for (ply, token) in moves.iter().enumerate() {
        if outcome.is_terminal() {
            bail!("move {} ({}) played after the game ended: {}", ply + 1, token, outcome);
        }
        let m = game
            .parse_move(token)
            .with_context(|| format!("move {} ({})", ply + 1, token))?;
        outcome = game.play_move(m);
        if outcome == Outcome::Illegal {
            bail!("move {} ({}) is illegal", ply + 1, token);
        }
        let notation = game.history().last().map_or("", |played| played.notation.as_str());
        writeln!(out, "{}. {} ({})", ply + 1, notation, outcome)?;
    }

    writeln!(out, "outcome: {}", outcome)?;
    writeln!(out, "fen: {}", game.to_fen())?;
    Ok(out)
}
