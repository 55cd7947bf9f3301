//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one state-space search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes added to the tree, root included.
    pub nodes_created: u32,

    /// Capture probabilities requested from the estimator.
    pub estimates: u32,

    /// Sibling loops abandoned by an alpha-beta cutoff.
    pub cutoffs: u32,

    /// Deepest node created.
    pub max_depth: u16,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes_created as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    pub(crate) fn record_node(&mut self, depth: u16) {
        self.nodes_created += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}
