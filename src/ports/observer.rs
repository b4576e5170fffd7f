//! Observer port - abstraction for watching matches
//!
//! Observers receive match events without the match pipeline knowing how
//! they are displayed, logged or recorded.

use crate::{
    Result,
    tictactoe::{Board, GameOutcome, Move},
};

/// Observer trait for monitoring matches
///
/// # Event Sequence
///
/// 1. `on_match_start(total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - For each move in the game
///    - `on_game_end(game_num, outcome, final_board)`
/// 3. `on_match_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use tictactoe_solver::{
///     ports::Observer,
///     tictactoe::{Board, GameOutcome},
/// };
///
/// struct DrawCounter {
///     draws: usize,
/// }
///
/// impl Observer for DrawCounter {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         outcome: GameOutcome,
///         _board: &Board,
///     ) -> tictactoe_solver::Result<()> {
///         if outcome == GameOutcome::Draw {
///             self.draws += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first game.
    fn on_match_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts. `game_num` is 0-based.
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each move is applied.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the current game
    /// * `step_num` - Ply within the game (0-based)
    /// * `before` - Board before the move
    /// * `mv` - The move that was played
    /// * `after` - Board after the move
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _before: &Board,
        _mv: Move,
        _after: &Board,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches a decided board.
    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome, _board: &Board) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game.
    fn on_match_end(&mut self) -> Result<()> {
        Ok(())
    }
}
