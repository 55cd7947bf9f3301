//! Core types: player colors and reserves, territories, RNG.
//!
//! These are shared by the live board and by the hypothetical positions the
//! search builds.

pub mod player;
pub mod rng;
pub mod territory;

pub use player::{Color, Player};
pub use rng::GameRng;
pub use territory::{Attack, Territory, TerritoryId};
