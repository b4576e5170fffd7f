//! Tic-tac-toe CLI - perfect-play solver, baseline players and match runner
//!
//! This CLI provides a unified interface for:
//! - Playing interactively against the solver or a baseline
//! - Running matches between automated players
//! - Analyzing the optimal outcome of every move in a position

use anyhow::Result;
use clap::{Parser, Subcommand};
use tictactoe_solver::cli::commands::{analyze, arena, play};

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(version, about = "Perfect-play tic-tac-toe solver", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. `debug`, `tictactoe_solver=trace`)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play(play::PlayArgs),

    /// Run a match between two automated players
    Arena(arena::ArenaArgs),

    /// Analyze a position
    Analyze(analyze::AnalyzeArgs),
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Play(args) => play::execute(args),
        Commands::Arena(args) => arena::execute(args),
        Commands::Analyze(args) => analyze::execute(args),
    }
}
