//! Game-tree search over hypothetical attacks.
//!
//! - `state`: positions (`GameState`) and their arena ids
//! - `tree`: the arena holding a searched tree
//! - `search`: alpha-beta expansion and evaluation
//! - `cursor`: walking a searched tree as the live game advances
//! - `policy`: how a player picks its next attack from the tree

pub mod config;
pub mod cursor;
pub mod policy;
#[allow(clippy::module_inception)]
pub mod search;
pub mod state;
pub mod stats;
pub mod tree;

pub use config::{SearchConfig, DEFAULT_MAX_DEPTH, DEFAULT_PROB_THRESHOLD};
pub use cursor::StatespaceCursor;
pub use policy::{BestChild, FirstChild, MovePolicy};
pub use search::StateSpaceSearch;
pub use state::{GameState, NodeId, TroopMap};
pub use stats::SearchStats;
pub use tree::{StateTree, TreeStats};
