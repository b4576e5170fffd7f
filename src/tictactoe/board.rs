//! Board representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{game::GameOutcome, lines::LineAnalyzer, position::Position};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The mark occupying this cell, if any
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
            Cell::Empty => None,
        }
    }
}

/// One of the two symbols identifying a side. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opposing mark
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert mark to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }

    pub fn to_char(self) -> char {
        self.to_cell().to_char()
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Mark {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Mark::X),
            "o" => Ok(Mark::O),
            _ => Err(crate::Error::InvalidMark {
                input: s.to_string(),
            }),
        }
    }
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
}

/// A 3x3 grid of cells.
///
/// Boards are values: [`Board::apply`] returns a new board and never touches
/// the receiver, so boards held by earlier search frames stay valid. The type
/// is `Copy` since it is only nine bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace and the row separators `|` and `/` are ignored; the remaining
    /// characters are read as nine cells in row-major order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBoardLength` unless exactly 9 cell characters remain,
    /// and `InvalidCellCharacter` for any character that is not a cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use tictactoe_solver::tictactoe::{Board, Cell, Position};
    ///
    /// let board = Board::from_string("XX_/OO_/___").unwrap();
    /// assert_eq!(board.get(Position::new(0, 1).unwrap()), Cell::X);
    /// assert_eq!(board.legal_moves().len(), 5);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
            .collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    fn count_pieces(&self) -> PieceCount {
        let mut count = PieceCount { x: 0, o: 0 };
        for cell in &self.cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    /// Infer whose turn it is under X-first play.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPieceCounts` unless the counts are equal (X to move) or
    /// X leads by one (O to move).
    pub fn next_to_move(&self) -> Result<Mark, crate::Error> {
        let count = self.count_pieces();
        if count.x == count.o {
            Ok(Mark::X)
        } else if count.x == count.o + 1 {
            Ok(Mark::O)
        } else {
            Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            })
        }
    }

    /// Raw cells in row-major order
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Get the cell at a position
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Check if a position is unoccupied
    pub fn is_vacant(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Check if no mark has been played yet
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == Cell::Empty)
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// All empty cells in row-major order. Empty iff the board is full.
    ///
    /// Unlike a game-level move list this does not look at whether the game is
    /// already decided; callers check [`Board::winner`] for that.
    pub fn legal_moves(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_vacant(pos)).collect()
    }

    /// Return a new board with `mark` placed at `pos`.
    ///
    /// # Errors
    ///
    /// Returns `IllegalMove` if the cell is already occupied.
    #[must_use = "apply returns a new board; the original is unchanged"]
    pub fn apply(&self, mark: Mark, pos: Position) -> Result<Board, crate::Error> {
        if !self.is_vacant(pos) {
            return Err(crate::Error::IllegalMove { position: pos });
        }

        let mut next = *self;
        next.cells[pos.index()] = mark.to_cell();
        Ok(next)
    }

    /// Check if a mark has three in a line
    pub fn has_won(&self, mark: Mark) -> bool {
        LineAnalyzer::has_won(&self.cells, mark)
    }

    /// Classify the board.
    ///
    /// Returns `Some(Win(mark))` when exactly one mark completes a line,
    /// `Some(Draw)` when the board is full without a line, and `None` while
    /// the game is still open.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if both marks complete a line. Legal play
    /// never produces such a board.
    pub fn winner(&self) -> Result<Option<GameOutcome>, crate::Error> {
        match (self.has_won(Mark::X), self.has_won(Mark::O)) {
            (true, true) => Err(crate::Error::InvariantViolation {
                board: self.encode(),
            }),
            (true, false) => Ok(Some(GameOutcome::Win(Mark::X))),
            (false, true) => Ok(Some(GameOutcome::Win(Mark::O))),
            (false, false) if self.is_full() => Ok(Some(GameOutcome::Draw)),
            (false, false) => Ok(None),
        }
    }

    /// Nine-character row-major encoding, `_` for empty cells
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let symbols: Vec<String> = (0..3)
                .map(|col| match self.cells[row * 3 + col] {
                    Cell::Empty => "   ".to_string(),
                    cell => format!(" {} ", cell.to_char()),
                })
                .collect();
            write!(f, "{}", symbols.join("|").trim_end())?;
            if row < 2 {
                writeln!(f)?;
                writeln!(f, "-----------")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(!board.is_full());
        assert_eq!(board.legal_moves().len(), 9);
        assert_eq!(board.winner().unwrap(), None);
    }

    #[test]
    fn test_apply() {
        let board = Board::new();
        let next = board.apply(Mark::X, pos(1, 1)).unwrap();
        assert_eq!(next.get(pos(1, 1)), Cell::X);

        // Input unchanged
        assert!(board.is_empty());

        let result = next.apply(Mark::O, pos(1, 1));
        assert!(matches!(result, Err(crate::Error::IllegalMove { .. })));
        assert!(result.unwrap_err().to_string().contains("occupied"));
    }

    #[test]
    fn test_legal_moves_row_major() {
        let board = Board::from_string("X_O/_X_/O__").unwrap();
        let moves: Vec<usize> = board.legal_moves().into_iter().map(Position::index).collect();
        assert_eq!(moves, vec![1, 3, 5, 7, 8]);
    }

    #[test]
    fn test_legal_moves_ignore_decided_games() {
        // X has won but empty cells remain
        let board = Board::from_string("XXX/OO_/___").unwrap();
        assert_eq!(board.legal_moves().len(), 4);
    }

    #[test]
    fn test_win_detection_horizontal() {
        let board = Board::from_string("XXX/OO_/___").unwrap();
        assert_eq!(board.winner().unwrap(), Some(GameOutcome::Win(Mark::X)));
    }

    #[test]
    fn test_win_detection_vertical() {
        let board = Board::from_string("XOX/_OX/_O_").unwrap();
        assert_eq!(board.winner().unwrap(), Some(GameOutcome::Win(Mark::O)));
    }

    #[test]
    fn test_win_detection_diagonal() {
        let board = Board::from_string("O_X/OX_/X__").unwrap();
        assert_eq!(board.winner().unwrap(), Some(GameOutcome::Win(Mark::X)));
    }

    #[test]
    fn test_tie_detection() {
        let board = Board::from_string("XOX/XOO/OXX").unwrap();
        assert!(board.is_full());
        assert_eq!(board.winner().unwrap(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_win_on_full_board_is_not_a_tie() {
        let board = Board::from_string("XOX/OXO/OXX").unwrap();
        assert_eq!(board.winner().unwrap(), Some(GameOutcome::Win(Mark::X)));
    }

    #[test]
    fn test_double_winner_is_invariant_violation() {
        let board = Board::from_string("XXX/OOO/___").unwrap();
        assert!(matches!(
            board.winner(),
            Err(crate::Error::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_from_string_errors() {
        assert!(matches!(
            Board::from_string("XO_"),
            Err(crate::Error::InvalidBoardLength { got: 3, .. })
        ));
        assert!(matches!(
            Board::from_string("XO_XO_XO_X"),
            Err(crate::Error::InvalidBoardLength { got: 10, .. })
        ));
        assert!(matches!(
            Board::from_string("XO_Z_____"),
            Err(crate::Error::InvalidCellCharacter { character: 'Z', .. })
        ));
    }

    #[test]
    fn test_next_to_move() {
        assert_eq!(Board::new().next_to_move().unwrap(), Mark::X);
        assert_eq!(
            Board::from_string("X________").unwrap().next_to_move().unwrap(),
            Mark::O
        );
        assert!(Board::from_string("XX_______").unwrap().next_to_move().is_err());
    }

    #[test]
    fn test_encode() {
        let board = Board::from_string("XO. ... ...").unwrap();
        assert_eq!(board.encode(), "XO_______");
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("XO_/_X_/__O").unwrap();
        let expected = " X | O |\n-----------\n   | X |\n-----------\n   |   | O";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn test_mark_parse() {
        assert_eq!("x".parse::<Mark>().unwrap(), Mark::X);
        assert_eq!("O".parse::<Mark>().unwrap(), Mark::O);
        assert!("z".parse::<Mark>().is_err());
        assert_eq!(Mark::X.opponent(), Mark::O);
    }
}
