//! Shared helpers for the integration tests.

#![allow(dead_code)]

use tictactoe_solver::tictactoe::{Board, Mark, Position};

pub fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).unwrap()
}

pub fn board(s: &str) -> Board {
    Board::from_string(s).unwrap()
}

/// Play X-first from the empty board, picking `choices[i] % legal.len()` at
/// each ply and stopping early once the game is decided.
///
/// Returns the reached board and the side to move on it.
pub fn play_choices(choices: &[usize]) -> (Board, Mark) {
    let mut board = Board::new();
    let mut mover = Mark::X;
    for &choice in choices {
        if board.winner().unwrap().is_some() {
            break;
        }
        let legal = board.legal_moves();
        let position = legal[choice % legal.len()];
        board = board.apply(mover, position).unwrap();
        mover = mover.opponent();
    }
    (board, mover)
}
