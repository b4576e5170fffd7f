//! Error types for the tic-tac-toe solver crate

use thiserror::Error;

use crate::tictactoe::Position;

/// Main error type for the solver crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: position {position} is already occupied")]
    IllegalMove { position: Position },

    #[error("no legal moves available: the game is already decided or the board is full")]
    NoLegalMoves,

    #[error("invariant violation: both marks complete a line on board '{board}'")]
    InvariantViolation { board: String },

    #[error("game already over")]
    GameOver,

    #[error("position ({row}, {col}) is out of bounds (rows and columns must be 0-2)")]
    InvalidPosition { row: usize, col: usize },

    #[error("wrong board length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("unknown player kind '{input}'. Expected one of: {expected}")]
    UnknownPlayerKind { input: String, expected: String },

    #[error("invalid mark '{input}' (expected 'x' or 'o')")]
    InvalidMark { input: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
