//! High-level game management

use serde::{Deserialize, Serialize};

use super::{Board, Mark, Position};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: Position,
    pub mark: Mark,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Mark),
    Draw,
}

/// A game in progress or finished, with its move history.
///
/// X always opens. The board is replaced (never mutated in place) on each
/// move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Mark,
    moves: Vec<Move>,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game on an empty board
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            to_move: Mark::X,
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Play a move for the side to move.
    ///
    /// Returns the outcome if this move decided the game.
    ///
    /// # Errors
    ///
    /// Returns `GameOver` once the game is decided, `IllegalMove` if the cell
    /// is occupied and `InvariantViolation` if the resulting board is corrupt.
    pub fn play(&mut self, position: Position) -> Result<Option<GameOutcome>, crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let mark = self.to_move;
        self.board = self.board.apply(mark, position)?;
        self.moves.push(Move { position, mark });
        self.to_move = mark.opponent();
        self.outcome = self.board.winner()?;

        Ok(self.outcome)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move next
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
