//! Analyze command - evaluate every legal move of a position

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::output::{format_number, print_kv, print_section},
    config::SolverConfig,
    solver::Solver,
    tictactoe::{Board, GameOutcome, Mark},
};

#[derive(Parser, Debug)]
#[command(about = "Show the optimal-play outcome of every legal move")]
pub struct AnalyzeArgs {
    /// Board as nine cells in row-major order, e.g. `XX_/OO_/___`
    pub board: String,

    /// Side to move (defaults to the side implied by the piece counts)
    #[arg(long)]
    pub mover: Option<Mark>,

    /// Side whose results are reported (defaults to the mover)
    #[arg(long)]
    pub agent: Option<Mark>,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let board = Board::from_string(&args.board)
        .with_context(|| format!("failed to parse board '{}'", args.board))?;

    println!("{board}");

    if let Some(outcome) = board.winner()? {
        match outcome {
            GameOutcome::Win(mark) => println!("\nGame over: {mark} has won."),
            GameOutcome::Draw => println!("\nGame over: tie."),
        }
        return Ok(());
    }

    let mover = match args.mover {
        Some(mover) => mover,
        None => board.next_to_move()?,
    };
    let agent = args.agent.unwrap_or(mover);

    let mut solver = Solver::with_config(agent, SolverConfig::new().with_seed(0));
    let analysis = solver.analyze(mover, &board)?;

    print_section("Move Analysis");
    print!("{analysis}");

    if let Some(expected) = analysis.expected() {
        print_kv("Expected", &format!("{expected} for {agent}"));
    }
    let stats = solver.stats();
    print_kv("Cached positions", &format_number(solver.cache_len()));
    print_kv("Explored", &format_number(stats.explored as usize));
    print_kv("Cache hits", &format_number(stats.cache_hits as usize));

    Ok(())
}
