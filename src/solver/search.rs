//! Exhaustive memoized minimax search

use std::{collections::HashMap, fmt};

use rand::{Rng, SeedableRng, prelude::IndexedRandom, random, rngs::StdRng};
use tracing::{debug, trace};

use super::{
    key::StateKey,
    outcome::{GameResult, Outcome},
};
use crate::{
    Error, Result,
    config::SolverConfig,
    tictactoe::{Board, Mark, Position},
};

/// Cached value of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// First optimal move in row-major order, recorded only when the agent is
    /// the side to move at this key
    pub best_move: Option<Position>,
    /// Outcome with depth counted from the keyed position
    pub outcome: Outcome,
}

/// Counters accumulated over the lifetime of a solver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions evaluated by recursion (cache misses)
    pub explored: u64,
    /// Positions answered from the cache
    pub cache_hits: u64,
}

/// Evaluation of a single legal move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEvaluation {
    pub position: Position,
    /// Outcome with depth counted from the analyzed position
    pub outcome: Outcome,
    /// Depth-adjusted score from the mover's point of view
    pub score: i32,
}

/// Every legal move of a position with its optimal-play outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub mover: Mark,
    pub agent: Mark,
    /// Row-major order
    pub moves: Vec<MoveEvaluation>,
}

impl Analysis {
    /// Highest adjusted score among the moves
    pub fn best_score(&self) -> Option<i32> {
        self.moves.iter().map(|m| m.score).max()
    }

    /// All moves sharing the best adjusted score, in row-major order
    pub fn best_moves(&self) -> Vec<Position> {
        match self.best_score() {
            Some(best) => self
                .moves
                .iter()
                .filter(|m| m.score == best)
                .map(|m| m.position)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Outcome that optimal play from this position leads to
    pub fn expected(&self) -> Option<Outcome> {
        let best = self.best_score()?;
        self.moves
            .iter()
            .find(|m| m.score == best)
            .map(|m| m.outcome)
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let best = self.best_score();
        writeln!(
            f,
            "{:<6} {:<6} {:>5} {:>6}   ({} to move, results for {})",
            "move", "result", "depth", "score", self.mover, self.agent
        )?;
        for m in &self.moves {
            let marker = if Some(m.score) == best { "*" } else { "" };
            writeln!(
                f,
                "{:<6} {:<6} {:>5} {:>6} {}",
                m.position.to_string(),
                m.outcome.result.to_string(),
                m.outcome.depth,
                m.score,
                marker
            )?;
        }
        Ok(())
    }
}

/// Result of searching a position: its outcome and the move reaching it
#[derive(Debug, Clone, Copy)]
struct Evaluation {
    outcome: Outcome,
    best_move: Option<Position>,
}

/// Perfect-play solver for one fixed agent mark.
///
/// The solver explores the whole game tree below a position, memoizing every
/// child position by [`StateKey`]. Outcomes are scored from the agent's point
/// of view for the solver's whole lifetime, which is what makes a key of
/// absolute cells plus mover sufficient. The cache only grows and may be
/// reused across games.
///
/// Ties between equally good moves are broken uniformly at random with the
/// injected generator, so a seeded solver is a pure function of the board.
///
/// # Examples
///
/// ```
/// use tictactoe_solver::{
///     config::SolverConfig,
///     solver::Solver,
///     tictactoe::{Board, Mark, Position},
/// };
///
/// let mut solver = Solver::with_config(Mark::X, SolverConfig::new().with_seed(1));
/// let board = Board::from_string("XX_/OO_/___").unwrap();
/// assert_eq!(solver.select_move(&board).unwrap(), Position::new(0, 2).unwrap());
/// ```
#[derive(Debug)]
pub struct Solver<R = StdRng> {
    agent: Mark,
    config: SolverConfig,
    cache: HashMap<StateKey, CacheEntry>,
    stats: SearchStats,
    rng: R,
}

impl Solver<StdRng> {
    /// Create a solver with the default configuration
    pub fn new(agent: Mark) -> Self {
        Self::with_config(agent, SolverConfig::default())
    }

    /// Create a solver, seeding the tie-break generator from the config or
    /// from entropy when no seed is given
    pub fn with_config(agent: Mark, config: SolverConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(random));
        Self::with_rng(agent, config, rng)
    }

    /// Reseed the tie-break generator. The cache is kept.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl<R: Rng> Solver<R> {
    /// Create a solver with an explicit random source
    pub fn with_rng(agent: Mark, config: SolverConfig, rng: R) -> Self {
        Self {
            agent,
            config,
            cache: HashMap::new(),
            stats: SearchStats::default(),
            rng,
        }
    }

    /// The mark whose perspective all outcomes are scored from
    pub fn agent(&self) -> Mark {
        self.agent
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Number of cached positions
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Look up the cached entry for a position and mover
    pub fn cached(&self, board: &Board, mover: Mark) -> Option<&CacheEntry> {
        self.cache.get(&StateKey::new(board, mover))
    }

    /// Choose an optimal move for the agent.
    ///
    /// Among the moves with the best depth-adjusted score one is drawn
    /// uniformly at random. On an empty board with the opening shortcut
    /// enabled a random corner is returned without searching.
    ///
    /// # Errors
    ///
    /// Returns `NoLegalMoves` if the board is decided or full and
    /// `InvariantViolation` if the board (or any position below it) has two
    /// winners.
    pub fn select_move(&mut self, board: &Board) -> Result<Position> {
        if self.config.opening_shortcut && board.is_empty() {
            let position = *Position::CORNERS
                .choose(&mut self.rng)
                .ok_or(Error::NoLegalMoves)?;
            debug!(agent = %self.agent, %position, "opening shortcut");
            return Ok(position);
        }

        let before = self.stats;
        let analysis = self.analyze(self.agent, board)?;
        let best = analysis.best_moves();
        let position = *best.choose(&mut self.rng).ok_or(Error::NoLegalMoves)?;

        trace!(key = %StateKey::new(board, self.agent), "move analysis:\n{analysis}");
        debug!(
            agent = %self.agent,
            cache_size = self.cache.len(),
            explored = self.stats.explored - before.explored,
            cache_hits = self.stats.cache_hits - before.cache_hits,
            candidates = best.len(),
            expected = %analysis.expected().map(|o| o.to_string()).unwrap_or_default(),
            %position,
            "selected move"
        );

        Ok(position)
    }

    /// Evaluate every legal move of `board` with `mover` to play.
    ///
    /// Scores are adjusted for the mover: maximizing when the mover is the
    /// agent, minimizing otherwise.
    ///
    /// # Errors
    ///
    /// Returns `NoLegalMoves` if the board is decided or full.
    pub fn analyze(&mut self, mover: Mark, board: &Board) -> Result<Analysis> {
        if board.winner()?.is_some() {
            return Err(Error::NoLegalMoves);
        }
        let legal = board.legal_moves();
        if legal.is_empty() {
            return Err(Error::NoLegalMoves);
        }

        let maximizing = mover == self.agent;
        let mut moves = Vec::with_capacity(legal.len());
        for position in legal {
            let outcome = self.child_outcome(mover, board, position)?;
            moves.push(MoveEvaluation {
                position,
                outcome,
                score: outcome.adjusted(maximizing),
            });
        }

        Ok(Analysis {
            mover,
            agent: self.agent,
            moves,
        })
    }

    /// Optimal-play outcome of `board` with `mover` to play, with the
    /// terminal depth offset by `depth`.
    ///
    /// The result is the same for every `depth`; only the reported depth
    /// shifts with it.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if the search meets a board with two
    /// winners.
    pub fn evaluate(&mut self, mover: Mark, board: &Board, depth: u8) -> Result<Outcome> {
        Ok(self.solve(mover, board)?.outcome.deepen(depth))
    }

    fn solve(&mut self, mover: Mark, board: &Board) -> Result<Evaluation> {
        if let Some(decided) = board.winner()? {
            return Ok(Evaluation {
                outcome: Outcome::terminal(GameResult::for_agent(decided, self.agent)),
                best_move: None,
            });
        }

        let maximizing = mover == self.agent;
        let mut best: Option<(Position, Outcome, i32)> = None;
        for position in board.legal_moves() {
            let outcome = self.child_outcome(mover, board, position)?;
            let score = outcome.adjusted(maximizing);
            if best.is_none_or(|(_, _, best_score)| score > best_score) {
                best = Some((position, outcome, score));
            }
        }

        // An undecided board always has an empty cell
        let (position, outcome, _) = best.ok_or(Error::NoLegalMoves)?;
        Ok(Evaluation {
            outcome,
            best_move: maximizing.then_some(position),
        })
    }

    /// Outcome of playing `position`, seen from `board`
    fn child_outcome(&mut self, mover: Mark, board: &Board, position: Position) -> Result<Outcome> {
        let child = board.apply(mover, position)?;
        let next = mover.opponent();
        let key = StateKey::new(&child, next);

        if let Some(entry) = self.cache.get(&key) {
            self.stats.cache_hits += 1;
            return Ok(entry.outcome.deepen(1));
        }

        self.stats.explored += 1;
        let evaluation = self.solve(next, &child)?;
        self.cache.insert(
            key,
            CacheEntry {
                best_move: evaluation.best_move,
                outcome: evaluation.outcome,
            },
        );
        Ok(evaluation.outcome.deepen(1))
    }
}
