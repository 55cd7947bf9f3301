//! Dice combat: exchange table, capture estimator, blitz resolution.
//!
//! - `table`: closed-form probabilities of one dice exchange
//! - `estimator`: Monte Carlo capture probability built on the table
//! - `blitz`: full resolution of an attack with real dice

pub mod blitz;
pub mod estimator;
pub mod table;

pub use blitz::{BlitzResolver, BlitzResult, DiceBlitz};
pub use estimator::{estimate_capture_probability, CaptureEstimator, DEFAULT_TRIALS};
pub use table::{Dice, Exchange, OutcomeSplit, COMBAT_OUTCOMES};
