//! Perfect-play tic-tac-toe
//!
//! This crate provides:
//! - An immutable board model with move legality and win detection
//! - An exhaustive minimax solver memoized by (board, side to move) that
//!   prefers faster wins and slower losses and breaks ties at random
//! - Baseline and interactive players behind a common `Player` port
//! - A match pipeline with pluggable observers
//!
//! # Examples
//!
//! ```
//! use tictactoe_solver::{
//!     config::SolverConfig,
//!     solver::{GameResult, Solver},
//!     tictactoe::{Board, Mark},
//! };
//!
//! let mut solver = Solver::with_config(Mark::O, SolverConfig::new().with_seed(7));
//! let board = Board::from_string("X__/___/___").unwrap();
//! let analysis = solver.analyze(Mark::O, &board).unwrap();
//! assert_eq!(analysis.expected().unwrap().result, GameResult::Tie);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod solver;
pub mod tictactoe;

pub use error::{Error, Result};
