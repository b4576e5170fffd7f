//! Tic-Tac-Toe board model

pub mod board;
pub mod game;
pub mod lines;
pub mod position;

pub use board::{Board, Cell, Mark};
pub use game::{Game, GameOutcome, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use position::Position;
