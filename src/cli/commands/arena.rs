//! Arena command - run a match between two automated players

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::output::{format_number, format_percent, print_kv, print_section},
    pipeline::{
        JsonlObserver, MatchConfig, MatchPipeline, PlayerKind, ProgressObserver, TracingObserver,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Run a match between two automated players")]
pub struct ArenaArgs {
    /// JSON match configuration; flags below override its fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Player taking X
    #[arg(long, value_enum)]
    pub x: Option<PlayerKind>,

    /// Player taking O
    #[arg(long, value_enum)]
    pub o: Option<PlayerKind>,

    /// Number of games to play
    #[arg(long, short = 'g')]
    pub games: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the match result as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write every game as one JSON line
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl ArenaArgs {
    fn resolve_config(&self) -> Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::load(path)
                .with_context(|| format!("failed to load match config {}", path.display()))?,
            None => MatchConfig::default(),
        };

        if let Some(x) = self.x {
            config.player_x = x;
        }
        if let Some(o) = self.o {
            config.player_o = o;
        }
        if let Some(games) = self.games {
            config.num_games = games;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

pub fn execute(args: ArenaArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let (mut x, mut o) = config.build_players();

    println!(
        "{} (X) vs {} (O), {} games",
        x.name(),
        o.name(),
        format_number(config.num_games)
    );

    let mut pipeline =
        MatchPipeline::new(config).with_observer(Box::new(TracingObserver::new()));
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.record {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline.run(x.as_mut(), o.as_mut())?;

    print_section("Match Results");
    print_kv("Games", &format_number(result.total_games));
    print_kv(
        "X wins",
        &format!("{} ({})", result.x_wins, format_percent(result.x_win_rate)),
    );
    print_kv(
        "O wins",
        &format!("{} ({})", result.o_wins, format_percent(result.o_win_rate)),
    );
    print_kv(
        "Draws",
        &format!("{} ({})", result.draws, format_percent(result.draw_rate)),
    );

    if let Some(path) = &args.export {
        result
            .save(path)
            .with_context(|| format!("failed to export result to {}", path.display()))?;
        println!("\nResult written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");
        std::fs::write(&path, r#"{"num_games": 5, "seed": 1, "player_o": "blocking"}"#).unwrap();

        let args = ArenaArgs {
            config: Some(path),
            x: Some(PlayerKind::Random),
            o: None,
            games: Some(9),
            seed: None,
            export: None,
            record: None,
            no_progress: true,
        };
        let config = args.resolve_config().unwrap();
        assert_eq!(config.num_games, 9);
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.player_x, PlayerKind::Random);
        assert_eq!(config.player_o, PlayerKind::Blocking);
    }
}
