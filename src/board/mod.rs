//! The live board.
//!
//! - `graph`: `Board`, its builder, and the `TerritoryGraph` view the
//!   search reads
//! - `continent`: continent grouping and monopoly tracking
//! - `setup`: claiming, starting troops, random reinforcement
//! - `maps`: small sample boards

pub mod continent;
pub mod graph;
pub mod maps;
pub mod setup;

pub use continent::Continent;
pub use graph::{AttackOutcome, Board, BoardBuilder, TerritoryGraph};
pub use setup::{claim_territories, deploy_randomly, initialize_troops};
