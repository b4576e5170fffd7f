//! Player port - abstraction over move sources

use crate::{
    Result,
    tictactoe::{Board, Mark, Position},
};

/// Player trait - unified interface for everything that picks moves
///
/// Implemented by the perfect-play solver, the baseline heuristics and the
/// interactive human prompt. A player is bound to one mark for its lifetime.
///
/// # Examples
///
/// ```no_run
/// use tictactoe_solver::{
///     ports::Player,
///     tictactoe::{Board, GameOutcome, Mark},
/// };
///
/// fn play_out(x: &mut dyn Player, o: &mut dyn Player) -> tictactoe_solver::Result<GameOutcome> {
///     let mut board = Board::new();
///     let mut to_move = Mark::X;
///     loop {
///         let position = match to_move {
///             Mark::X => x.select_move(&board)?,
///             Mark::O => o.select_move(&board)?,
///         };
///         board = board.apply(to_move, position)?;
///         if let Some(outcome) = board.winner()? {
///             return Ok(outcome);
///         }
///         to_move = to_move.opponent();
///     }
/// }
/// ```
pub trait Player: Send {
    /// Select a move for the given board.
    ///
    /// # Errors
    ///
    /// Returns `NoLegalMoves` if the board has no empty cell, and whatever
    /// error the underlying source reports (I/O for interactive players).
    fn select_move(&mut self, board: &Board) -> Result<Position>;

    /// The mark this player places
    fn mark(&self) -> Mark;

    /// Display name used in summaries and logs
    fn name(&self) -> &str;

    /// Seed the player's internal random number generator.
    ///
    /// Match pipelines call this when given a deterministic seed. Players
    /// without randomness keep the default no-op.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
