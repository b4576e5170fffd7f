//! Match pipeline: plays complete games between two players

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::players::PlayerKind;
use crate::{
    Error, Result,
    config::SolverConfig,
    ports::{Observer, Player},
    tictactoe::{Board, Game, GameOutcome, Mark, Move},
};

/// Match configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: usize,

    /// Random seed. Player X is seeded with `seed`, player O with `seed + 1`.
    pub seed: Option<u64>,

    /// Kind of player taking X
    pub player_x: PlayerKind,

    /// Kind of player taking O
    pub player_o: PlayerKind,

    /// Settings for minimax players
    pub solver: SolverConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            seed: None,
            player_x: PlayerKind::Minimax,
            player_o: PlayerKind::Random,
            solver: SolverConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open match config {}", path.display()),
            source,
        })?;
        let config = serde_json::from_reader(file)?;
        Ok(config)
    }

    /// Build the configured X and O players
    pub fn build_players(&self) -> (Box<dyn Player>, Box<dyn Player>) {
        let x = self.player_x.build(Mark::X, self.seed, &self.solver);
        let o = self.player_o.build(
            Mark::O,
            self.seed.map(|seed| MatchPipeline::seed_for(seed, Mark::O)),
            &self.solver,
        );
        (x, o)
    }
}

/// Result of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Total games played
    pub total_games: usize,

    /// Games won by X
    pub x_wins: usize,

    /// Games won by O
    pub o_wins: usize,

    /// Drawn games
    pub draws: usize,

    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,
}

impl MatchResult {
    /// Create a new match result
    pub fn new(total_games: usize, x_wins: usize, o_wins: usize, draws: usize) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            x_wins,
            o_wins,
            draws,
            x_win_rate: rate(x_wins),
            o_win_rate: rate(o_wins),
            draw_rate: rate(draws),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open {}", path.display()),
            source,
        })?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Plays a series of games between an X player and an O player
pub struct MatchPipeline {
    config: MatchConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl MatchPipeline {
    /// Create a new match pipeline
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run the match. Either argument order works; each player moves when the
    /// side to move matches its mark.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when both players carry the same mark,
    /// and propagates any player or observer error.
    pub fn run(&mut self, first: &mut dyn Player, second: &mut dyn Player) -> Result<MatchResult> {
        if first.mark() == second.mark() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "both players ({} and {}) play {}",
                    first.name(),
                    second.name(),
                    first.mark()
                ),
            });
        }

        self.seed_pair(first, second)?;

        let mut x_wins = 0;
        let mut o_wins = 0;
        let mut draws = 0;

        for observer in &mut self.observers {
            observer.on_match_start(self.config.num_games)?;
        }

        for game_num in 0..self.config.num_games {
            let (outcome, board) = self.play_game(game_num, first, second)?;

            match outcome {
                GameOutcome::Win(Mark::X) => x_wins += 1,
                GameOutcome::Win(Mark::O) => o_wins += 1,
                GameOutcome::Draw => draws += 1,
            }

            for observer in &mut self.observers {
                observer.on_game_end(game_num, outcome, &board)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_match_end()?;
        }

        Ok(MatchResult::new(
            self.config.num_games,
            x_wins,
            o_wins,
            draws,
        ))
    }

    fn seed_pair(&self, first: &mut dyn Player, second: &mut dyn Player) -> Result<()> {
        if let Some(seed) = self.config.seed {
            first.set_rng_seed(Self::seed_for(seed, first.mark()))?;
            second.set_rng_seed(Self::seed_for(seed, second.mark()))?;
        }
        Ok(())
    }

    fn seed_for(seed: u64, mark: Mark) -> u64 {
        match mark {
            Mark::X => seed,
            Mark::O => seed.wrapping_add(1),
        }
    }

    fn play_game(
        &mut self,
        game_num: usize,
        first: &mut dyn Player,
        second: &mut dyn Player,
    ) -> Result<(GameOutcome, Board)> {
        for observer in &mut self.observers {
            observer.on_game_start(game_num)?;
        }

        let mut game = Game::new();
        let mut step_num = 0;

        loop {
            let mark = game.to_move();
            let player: &mut dyn Player = if first.mark() == mark {
                &mut *first
            } else {
                &mut *second
            };

            let before = *game.board();
            let position = player.select_move(&before)?;
            let outcome = game.play(position)?;

            for observer in &mut self.observers {
                observer.on_move(game_num, step_num, &before, Move { position, mark }, game.board())?;
            }
            step_num += 1;

            if let Some(outcome) = outcome {
                return Ok((outcome, *game.board()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::players::{MinimaxPlayer, RandomPlayer};

    #[test]
    fn test_match_pipeline_counts_games() {
        let config = MatchConfig {
            num_games: 10,
            seed: Some(42),
            ..MatchConfig::default()
        };

        let mut pipeline = MatchPipeline::new(config);
        let mut x = RandomPlayer::with_seed(Mark::X, 0);
        let mut o = RandomPlayer::with_seed(Mark::O, 0);

        let result = pipeline.run(&mut x, &mut o).unwrap();

        assert_eq!(result.total_games, 10);
        assert_eq!(result.x_wins + result.o_wins + result.draws, 10);
    }

    #[test]
    fn test_rejects_same_mark() {
        let mut pipeline = MatchPipeline::new(MatchConfig::default());
        let mut a = RandomPlayer::with_seed(Mark::O, 1);
        let mut b = RandomPlayer::with_seed(Mark::O, 2);
        assert!(matches!(
            pipeline.run(&mut a, &mut b),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_argument_order_does_not_matter() {
        let config = MatchConfig {
            num_games: 5,
            seed: Some(3),
            ..MatchConfig::default()
        };
        let mut pipeline = MatchPipeline::new(config);
        let mut solver = MinimaxPlayer::new(Mark::O, SolverConfig::default());
        let mut random = RandomPlayer::new(Mark::X);

        let result = pipeline.run(&mut solver, &mut random).unwrap();
        assert_eq!(result.x_wins, 0);
    }

    #[test]
    fn test_result_rates() {
        let result = MatchResult::new(4, 1, 1, 2);
        assert_eq!(result.x_win_rate, 0.25);
        assert_eq!(result.draw_rate, 0.5);

        let empty = MatchResult::new(0, 0, 0, 0);
        assert_eq!(empty.draw_rate, 0.0);
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: MatchConfig =
            serde_json::from_str(r#"{"num_games": 7, "player_o": "blocking"}"#).unwrap();
        assert_eq!(config.num_games, 7);
        assert_eq!(config.player_x, PlayerKind::Minimax);
        assert_eq!(config.player_o, PlayerKind::Blocking);
        assert!(config.solver.opening_shortcut);
    }
}
