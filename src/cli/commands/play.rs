//! Play command - interactive game against an automated opponent

use std::io::{self, BufReader};

use anyhow::Result;
use clap::Parser;

use crate::{
    config::SolverConfig,
    pipeline::{BoardPrinter, HumanPlayer, MatchConfig, MatchPipeline, PlayerKind},
    tictactoe::Mark,
};

#[derive(Parser, Debug)]
#[command(about = "Play a game against the solver or a baseline player")]
pub struct PlayArgs {
    /// Mark you play (`x` moves first)
    #[arg(long, default_value = "x")]
    pub human: Mark,

    /// Opponent to face
    #[arg(long, value_enum, default_value_t = PlayerKind::Minimax)]
    pub opponent: PlayerKind,

    /// Random seed for the opponent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Make a minimax opponent search the empty board instead of taking a
    /// random corner
    #[arg(long)]
    pub full_opening: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let solver_config = SolverConfig::new().with_opening_shortcut(!args.full_opening);
    let opponent_mark = args.human.opponent();
    let mut opponent = args.opponent.build(opponent_mark, args.seed, &solver_config);
    let mut human = HumanPlayer::new(args.human, BufReader::new(io::stdin()), io::stdout());

    println!(
        "You play {} against {} ({}). Enter moves as row,col with 0,0 the upper-left corner.",
        args.human,
        opponent.name(),
        opponent_mark
    );

    let config = MatchConfig {
        num_games: 1,
        seed: None,
        ..MatchConfig::default()
    };
    let mut pipeline =
        MatchPipeline::new(config).with_observer(Box::new(BoardPrinter::new(io::stdout())));
    pipeline.run(&mut human, opponent.as_mut())?;

    Ok(())
}
