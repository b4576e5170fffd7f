//! Configuration types for solver creation.

use serde::{Deserialize, Serialize};

/// Configuration for creating a [`Solver`](crate::solver::Solver).
///
/// # Examples
///
/// ```
/// use tictactoe_solver::config::SolverConfig;
///
/// let config = SolverConfig::new()
///     .with_seed(42)
///     .with_opening_shortcut(false);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// On an empty board, pick a random corner instead of searching the full
    /// tree. Every opening is a tie under optimal play, so this only saves time.
    pub opening_shortcut: bool,
    /// Random seed for the tie-break draw. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl SolverConfig {
    /// Create a configuration with the opening shortcut enabled and no seed.
    pub fn new() -> Self {
        Self {
            opening_shortcut: true,
            seed: None,
        }
    }

    /// Enable or disable the empty-board shortcut.
    pub fn with_opening_shortcut(mut self, enabled: bool) -> Self {
        self.opening_shortcut = enabled;
        self
    }

    /// Set the random seed for deterministic tie-breaking.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}
