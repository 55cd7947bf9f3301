//! Live play: a search-driven player against a baseline opponent on a
//! real board.

pub mod config;
pub mod duel;

pub use config::{DuelConfig, DEFAULT_INITIAL_TROOPS};
pub use duel::{Duel, DuelResult, TurnReport};
