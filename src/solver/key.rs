//! Canonical state keys for the solver cache

use std::fmt;

use crate::tictactoe::{Board, Cell, Mark};

/// Absolute cell contents plus the side to move next.
///
/// Two search paths that reach the same cells with the same mover share a key
/// and therefore a cached outcome. No symmetry folding is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey {
    cells: [Cell; 9],
    mover: Mark,
}

impl StateKey {
    pub fn new(board: &Board, mover: Mark) -> Self {
        StateKey {
            cells: *board.cells(),
            mover,
        }
    }

    /// Deterministic `cells_M` serialization, e.g. `XX_OO_____X`
    pub fn encode(&self) -> String {
        let cells: String = self.cells.iter().map(|&c| c.to_char()).collect();
        format!("{cells}_{}", self.mover.to_char())
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
