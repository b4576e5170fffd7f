//! Typed board coordinates

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A cell coordinate on the 3x3 grid, `(0, 0)` being the upper-left corner.
///
/// Positions convert to and from the row-major cell index `0..9`, which is the
/// scan order used everywhere moves are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// The four corner cells
    pub const CORNERS: [Position; 4] = [
        Position { row: 0, col: 0 },
        Position { row: 0, col: 2 },
        Position { row: 2, col: 0 },
        Position { row: 2, col: 2 },
    ];

    /// Create a position from row and column.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPosition` if either coordinate is outside `0..3`.
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row >= 3 || col >= 3 {
            return Err(crate::Error::InvalidPosition { row, col });
        }
        Ok(Position {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Create a position from a row-major cell index.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPosition` if `index >= 9`.
    pub fn from_index(index: usize) -> Result<Self, crate::Error> {
        Self::new(index / 3, index % 3)
    }

    /// All nine positions in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..9u8).map(|i| Position {
            row: i / 3,
            col: i % 3,
        })
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index into the cell array
    pub fn index(self) -> usize {
        self.row() * 3 + self.col()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = crate::Error;

    /// Parse the `row,col` form printed by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::InvalidConfiguration {
            message: format!("cannot parse position '{s}' (expected 'row,col')"),
        };
        let (row, col) = s.trim().split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse::<usize>().map_err(|_| invalid())?;
        let col = col.trim().parse::<usize>().map_err(|_| invalid())?;
        Self::new(row, col)
    }
}
