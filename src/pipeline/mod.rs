//! Match pipeline abstractions
//!
//! This module provides:
//! - Player adapters (minimax, baselines, human)
//! - A pipeline that plays matches between two players
//! - Observers that report on matches as they are played

pub mod observers;
pub mod players;
pub mod runner;

pub use observers::{BoardPrinter, GameRecord, JsonlObserver, ProgressObserver, TracingObserver};
pub use players::{
    BlockingPlayer, HumanPlayer, MinimaxPlayer, OpportunistPlayer, PlayerKind, RandomPlayer,
};
pub use runner::{MatchConfig, MatchPipeline, MatchResult};

pub use crate::ports::{Observer, Player};
