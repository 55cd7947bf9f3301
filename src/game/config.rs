//! Duel configuration.

use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::error::{Error, Result};
use crate::search::SearchConfig;

/// Troops each player starts with.
pub const DEFAULT_INITIAL_TROOPS: u32 = 70;

/// Parameters of a two-player duel between the searching player and a
/// baseline opponent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Reserve each player starts with before claiming.
    pub initial_troops: u32,

    /// Turns played before the duel is called without a winner.
    pub max_turns: u32,

    /// Grant and randomly deploy turn income before each attack.
    pub reinforce: bool,

    /// Seed for seating order, troop placement and deployment.
    pub seed: u64,

    /// The baseline player. The searching player is `search.primary`.
    pub opponent: Color,

    pub search: SearchConfig,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            initial_troops: DEFAULT_INITIAL_TROOPS,
            max_turns: 2,
            reinforce: false,
            seed: 42,
            opponent: Color::Blue,
            search: SearchConfig::default(),
        }
    }
}

impl DuelConfig {
    pub fn with_initial_troops(mut self, troops: u32) -> Self {
        self.initial_troops = troops;
        self
    }

    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    pub fn with_reinforce(mut self, reinforce: bool) -> Self {
        self.reinforce = reinforce;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// The searching player.
    #[must_use]
    pub fn primary(&self) -> Color {
        self.search.primary
    }

    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        if self.opponent == self.search.primary {
            return Err(Error::configuration(format!(
                "{} cannot play against itself",
                self.opponent
            )));
        }
        if self.initial_troops == 0 {
            return Err(Error::configuration("initial_troops must be positive"));
        }
        Ok(())
    }
}
