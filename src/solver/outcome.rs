//! Perspective-relative outcomes and the depth-adjusted score

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{GameOutcome, Mark};

/// Upper bound on any terminal depth plus one. Nine plies fill the board, so
/// `DEPTH_HORIZON - depth` stays positive for every reachable terminal.
pub const DEPTH_HORIZON: i32 = 10;

/// Terminal result from the solver's fixed agent perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameResult {
    Loss,
    Tie,
    Win,
}

impl GameResult {
    /// Classify a decided game for `agent`
    pub fn for_agent(outcome: GameOutcome, agent: Mark) -> Self {
        match outcome {
            GameOutcome::Win(mark) if mark == agent => GameResult::Win,
            GameOutcome::Win(_) => GameResult::Loss,
            GameOutcome::Draw => GameResult::Tie,
        }
    }

    /// Signed value: +1, 0 or -1
    pub fn value(self) -> i32 {
        match self {
            GameResult::Win => 1,
            GameResult::Tie => 0,
            GameResult::Loss => -1,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameResult::Win => "win",
            GameResult::Tie => "tie",
            GameResult::Loss => "loss",
        };
        f.write_str(label)
    }
}

/// A result together with the ply at which optimal play reaches it.
///
/// `depth` is counted from whichever position the outcome is attached to:
/// zero for a terminal board, one more for each ply above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    pub result: GameResult,
    pub depth: u8,
}

impl Outcome {
    /// Outcome of a board that is itself terminal
    pub fn terminal(result: GameResult) -> Self {
        Outcome { result, depth: 0 }
    }

    /// The same result seen from `plies` moves further up the tree
    #[must_use]
    pub fn deepen(self, plies: u8) -> Self {
        Outcome {
            result: self.result,
            depth: self.depth.saturating_add(plies),
        }
    }

    /// Depth-adjusted score for a chooser.
    ///
    /// For the maximizing side this is `result * (DEPTH_HORIZON - depth)`:
    /// every win outranks every tie, every tie outranks every loss, a faster
    /// win and a slower loss rank higher, and ties score zero at any depth.
    /// The minimizing side uses the negation.
    pub fn adjusted(self, maximizing: bool) -> i32 {
        let score = self.result.value() * (DEPTH_HORIZON - i32::from(self.depth));
        if maximizing { score } else { -score }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {} plies", self.result, self.depth)
    }
}
