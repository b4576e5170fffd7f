//! Ports (trait boundaries) between the game loop and its collaborators.
//!
//! Move sources implement [`Player`]; anything that wants to watch a match
//! implements [`Observer`].

pub mod observer;
pub mod player;

pub use observer::Observer;
pub use player::Player;
