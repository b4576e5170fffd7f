//! Player adapters
//!
//! This module provides the move sources a match can be played with:
//! - Perfect play (memoized minimax)
//! - Baselines: random, opportunist (takes wins), blocking (stops wins)
//! - An interactive human prompt

use std::{
    fmt,
    io::{BufRead, Write},
    str::FromStr,
};

use clap::ValueEnum;
use rand::{SeedableRng, prelude::IndexedRandom, random, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    Error, Result,
    config::SolverConfig,
    ports::Player,
    solver::Solver,
    tictactoe::{Board, LineAnalyzer, Mark, Position},
};

/// Legal moves, or `NoLegalMoves` on a full board
fn legal_moves_or_err(board: &Board) -> Result<Vec<Position>> {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return Err(Error::NoLegalMoves);
    }
    Ok(moves)
}

fn choose(rng: &mut StdRng, moves: &[Position]) -> Result<Position> {
    moves.choose(rng).copied().ok_or(Error::NoLegalMoves)
}

/// Perfect-play player backed by a [`Solver`]. The solver cache survives
/// across games.
pub struct MinimaxPlayer {
    name: String,
    solver: Solver,
}

impl MinimaxPlayer {
    pub fn new(mark: Mark, config: SolverConfig) -> Self {
        Self {
            name: "MinimaxPlayer".to_string(),
            solver: Solver::with_config(mark, config),
        }
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }
}

impl Player for MinimaxPlayer {
    fn select_move(&mut self, board: &Board) -> Result<Position> {
        self.solver.select_move(board)
    }

    fn mark(&self) -> Mark {
        self.solver.agent()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.solver.reseed(seed);
        Ok(())
    }
}

/// Random player (baseline)
pub struct RandomPlayer {
    name: String,
    mark: Mark,
    rng: StdRng,
}

impl RandomPlayer {
    /// Create a new random player
    pub fn new(mark: Mark) -> Self {
        Self::with_seed(mark, random())
    }

    /// Create a new random player with a deterministic seed
    pub fn with_seed(mark: Mark, seed: u64) -> Self {
        Self {
            name: "RandomPlayer".to_string(),
            mark,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn select_move(&mut self, board: &Board) -> Result<Position> {
        let moves = legal_moves_or_err(board)?;
        choose(&mut self.rng, &moves)
    }

    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Opportunist player: completes a line when it can, otherwise plays randomly.
///
/// Never blocks, so it loses to anything that sets up a threat.
pub struct OpportunistPlayer {
    name: String,
    mark: Mark,
    rng: StdRng,
}

impl OpportunistPlayer {
    pub fn new(mark: Mark) -> Self {
        Self::with_seed(mark, random())
    }

    pub fn with_seed(mark: Mark, seed: u64) -> Self {
        Self {
            name: "OpportunistPlayer".to_string(),
            mark,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for OpportunistPlayer {
    fn select_move(&mut self, board: &Board) -> Result<Position> {
        let moves = legal_moves_or_err(board)?;
        if let Some(&winning) = LineAnalyzer::winning_moves(board.cells(), self.mark).first() {
            trace!(mark = %self.mark, position = %winning, "opportunist takes the win");
            return Ok(winning);
        }
        choose(&mut self.rng, &moves)
    }

    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Blocking player: stops the opponent's immediate win, otherwise plays
/// randomly.
///
/// This does NOT try to win itself, only to block.
pub struct BlockingPlayer {
    name: String,
    mark: Mark,
    rng: StdRng,
}

impl BlockingPlayer {
    pub fn new(mark: Mark) -> Self {
        Self::with_seed(mark, random())
    }

    pub fn with_seed(mark: Mark, seed: u64) -> Self {
        Self {
            name: "BlockingPlayer".to_string(),
            mark,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for BlockingPlayer {
    fn select_move(&mut self, board: &Board) -> Result<Position> {
        let moves = legal_moves_or_err(board)?;
        let threats = LineAnalyzer::winning_moves(board.cells(), self.mark.opponent());
        if let Some(&block) = threats.first() {
            trace!(mark = %self.mark, position = %block, "blocking opponent threat");
            return Ok(block);
        }
        choose(&mut self.rng, &moves)
    }

    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// A player that asks a human for moves.
///
/// Moves are entered as `row,col` with `(0,0)` the upper-left corner. Input
/// that does not parse or names an occupied cell is rejected and the prompt
/// repeats.
pub struct HumanPlayer<R: BufRead + Send, W: Write + Send> {
    name: String,
    mark: Mark,
    input: R,
    output: W,
}

impl<R: BufRead + Send, W: Write + Send> HumanPlayer<R, W> {
    pub fn new(mark: Mark, input: R, output: W) -> Self {
        Self {
            name: "Human".to_string(),
            mark,
            input,
            output,
        }
    }
}

impl<R: BufRead + Send, W: Write + Send> Player for HumanPlayer<R, W> {
    fn select_move(&mut self, board: &Board) -> Result<Position> {
        let moves = legal_moves_or_err(board)?;
        let listing: Vec<String> = moves.iter().map(Position::to_string).collect();
        writeln!(self.output, "Legal plays: {}", listing.join(" | "))?;

        loop {
            write!(self.output, "Your play: ")?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).map_err(|source| Error::Io {
                operation: "read move from input".to_string(),
                source,
            })?;
            if read == 0 {
                return Err(Error::Io {
                    operation: "read move from input".to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "input closed before a move was entered",
                    ),
                });
            }

            match line.parse::<Position>() {
                Ok(position) if moves.contains(&position) => return Ok(position),
                _ => continue,
            }
        }
    }

    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Automated player kinds selectable from configuration and the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Random,
    Opportunist,
    Blocking,
    Minimax,
}

impl PlayerKind {
    const EXPECTED: &'static str = "random, opportunist, blocking, minimax";

    /// Build a boxed player for `mark`, seeded when a seed is given
    pub fn build(self, mark: Mark, seed: Option<u64>, solver: &SolverConfig) -> Box<dyn Player> {
        let seed = seed.unwrap_or_else(random);
        match self {
            PlayerKind::Random => Box::new(RandomPlayer::with_seed(mark, seed)),
            PlayerKind::Opportunist => Box::new(OpportunistPlayer::with_seed(mark, seed)),
            PlayerKind::Blocking => Box::new(BlockingPlayer::with_seed(mark, seed)),
            PlayerKind::Minimax => {
                Box::new(MinimaxPlayer::new(mark, solver.clone().with_seed(seed)))
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerKind::Random => "random",
            PlayerKind::Opportunist => "opportunist",
            PlayerKind::Blocking => "blocking",
            PlayerKind::Minimax => "minimax",
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlayerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(PlayerKind::Random),
            "opportunist" => Ok(PlayerKind::Opportunist),
            "blocking" | "defensive" => Ok(PlayerKind::Blocking),
            "minimax" | "optimal" => Ok(PlayerKind::Minimax),
            _ => Err(Error::UnknownPlayerKind {
                input: s.to_string(),
                expected: Self::EXPECTED.to_string(),
            }),
        }
    }
}
