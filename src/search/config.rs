//! State-space search parameters.

use serde::{Deserialize, Serialize};

use crate::combat::DEFAULT_TRIALS;
use crate::core::Color;
use crate::error::{Error, Result};

/// Default search horizon in plies.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Default minimum capture probability for an attack to be considered.
pub const DEFAULT_PROB_THRESHOLD: f64 = 0.9;

/// State-space search parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum depth below the root. Nodes at this depth are leaves.
    pub max_depth: u32,

    /// Attacks whose capture probability does not exceed this are not
    /// expanded.
    pub prob_threshold: f64,

    /// Monte Carlo trials per capture estimate.
    pub trials: u32,

    /// Seed for the capture estimator.
    /// Same seed produces identical trees.
    pub seed: u64,

    /// The color whose value is maximized. Nodes where any other color
    /// moves minimize.
    pub primary: Color,

    /// Alpha-beta cutoffs. Disabling gives a full-width minimax with the
    /// same root value.
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            prob_threshold: DEFAULT_PROB_THRESHOLD,
            trials: DEFAULT_TRIALS,
            seed: 42,
            primary: Color::Red,
            pruning: true,
        }
    }
}

impl SearchConfig {
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_prob_threshold(mut self, threshold: f64) -> Self {
        self.prob_threshold = threshold;
        self
    }

    pub fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_primary(mut self, primary: Color) -> Self {
        self.primary = primary;
        self
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Reject parameters the search cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(Error::configuration("trials must be positive"));
        }
        if !(0.0..1.0).contains(&self.prob_threshold) {
            return Err(Error::configuration(format!(
                "prob_threshold {} must lie in [0, 1)",
                self.prob_threshold
            )));
        }
        if self.max_depth > u32::from(u16::MAX) {
            return Err(Error::configuration(format!("max_depth {} is too deep", self.max_depth)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.prob_threshold, 0.9);
        assert_eq!(config.trials, 1000);
        assert_eq!(config.primary, Color::Red);
        assert!(config.pruning);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SearchConfig::default()
            .with_max_depth(5)
            .with_prob_threshold(0.5)
            .with_trials(200)
            .with_seed(7)
            .with_primary(Color::Blue)
            .with_pruning(false);

        assert_eq!(config.max_depth, 5);
        assert_eq!(config.prob_threshold, 0.5);
        assert_eq!(config.trials, 200);
        assert_eq!(config.seed, 7);
        assert_eq!(config.primary, Color::Blue);
        assert!(!config.pruning);
    }

    #[test]
    fn test_config_validate() {
        assert!(SearchConfig::default().with_trials(0).validate().is_err());
        assert!(SearchConfig::default().with_prob_threshold(1.0).validate().is_err());
        assert!(SearchConfig::default().with_prob_threshold(-0.1).validate().is_err());
        assert!(SearchConfig::default().with_prob_threshold(0.0).validate().is_ok());
        assert!(SearchConfig::default().with_max_depth(0).validate().is_ok());
    }

    #[test]
    fn test_config_serde() {
        let config = SearchConfig::default().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
