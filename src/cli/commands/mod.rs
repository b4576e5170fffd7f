//! CLI command implementations

pub mod analyze;
pub mod arena;
pub mod play;
