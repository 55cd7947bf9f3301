//! Error types for conquest-ai.
//!
//! All failures are local and synchronous. None of them is retried: the
//! current decision cycle either proceeds or is abandoned, and no partial
//! search tree is handed back on error.

use thiserror::Error;

use crate::core::{Color, TerritoryId};
use crate::search::NodeId;

/// Main error type for the crate.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Capture probability requested with fewer than 2 attacking troops or
    /// no defending troops. Always a caller bug.
    #[error("invalid combat input: {attack} attacking troops against {defend} defending troops")]
    InvalidCombatInput { attack: u32, defend: u32 },

    #[error("territory {0} not found")]
    TerritoryNotFound(TerritoryId),

    /// Internal consistency failure (broken ownership partition, double
    /// claim, illegal attack on the live board).
    #[error("invariant violation: {message}")]
    InvariantViolation { message: String },

    #[error("invalid transition: {target} is not a child of {current}")]
    InvalidTransition { current: NodeId, target: NodeId },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("no player with color {0}")]
    PlayerNotFound(Color),
}

impl Error {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Error::InvariantViolation {
            message: message.into(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
