//! # conquest-ai
//!
//! Lookahead AI for a territory-conquest board game.
//!
//! ## Design Principles
//!
//! 1. **Estimate, then search**: Dice combat is collapsed into a single
//!    capture probability per troop matchup. The search only deals in those
//!    probabilities, never in individual dice.
//!
//! 2. **Deterministic by seed**: Every random draw goes through `GameRng`.
//!    Each combat matchup gets its own stream, so a search's estimates do
//!    not depend on the order it asks for them.
//!
//! 3. **Graph behind a trait**: The search reads adjacency, ownership and
//!    troop counts through `TerritoryGraph` and never mutates the board.
//!
//! ## Architecture
//!
//! - **Alpha-beta over captures**: Two sides alternate single captures.
//!   The primary color maximizes `likelihood * troops` at the horizon.
//!
//! - **Persistent Data Structures**: Positions hold their troop maps in
//!   `im` ordered maps, so children share structure with their parents.
//!
//! - **Arena tree**: Nodes live in one `Vec` and refer to each other by
//!   `NodeId`. A cursor walks the tree as the live game advances.
//!
//! ## Modules
//!
//! - `core`: Colors, players, territories, RNG
//! - `combat`: Dice exchange table, capture estimator, blitz resolution
//! - `board`: Live board, builder, setup, sample maps
//! - `search`: Positions, state tree, alpha-beta, cursor, move policies
//! - `game`: Search-driven duel on a live board
//! - `error`: Crate error type

pub mod board;
pub mod combat;
pub mod core;
pub mod error;
pub mod game;
pub mod search;

// Re-export commonly used types
pub use crate::core::{Attack, Color, GameRng, Player, Territory, TerritoryId};

pub use crate::combat::{
    estimate_capture_probability, BlitzResolver, BlitzResult, CaptureEstimator, DiceBlitz,
    DEFAULT_TRIALS,
};

pub use crate::board::{AttackOutcome, Board, BoardBuilder, Continent, TerritoryGraph};

pub use crate::search::{
    BestChild, FirstChild, GameState, MovePolicy, NodeId, SearchConfig, SearchStats,
    StateSpaceSearch, StateTree, StatespaceCursor, TreeStats, TroopMap,
};

pub use crate::game::{Duel, DuelConfig, DuelResult, TurnReport};

pub use crate::error::{Error, Result};
