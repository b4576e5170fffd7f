//! Perfect-play game solver
//!
//! Exhaustive minimax over the full game tree with memoization by
//! [`StateKey`], depth-aware tie-breaking ("win sooner, lose later") and a
//! uniform random draw among equally optimal moves.

pub mod key;
pub mod outcome;
pub mod search;

pub use key::StateKey;
pub use outcome::{DEPTH_HORIZON, GameResult, Outcome};
pub use search::{Analysis, CacheEntry, MoveEvaluation, SearchStats, Solver};
