//! Minimax search statistics.

use serde::{Deserialize, Serialize};

/// Statistics collected during one minimax decision.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MinimaxStats {
    /// Iterative-deepening rounds that ran to completion.
    pub rounds_completed: u32,

    /// Depth limit of the last completed round.
    pub completed_depth: u32,

    /// States visited (max and min positions).
    pub nodes_visited: u64,

    /// Positions scored by the static evaluation because of the depth limit.
    pub depth_cutoffs: u64,

    /// Branches skipped by alpha-beta.
    pub prunes: u64,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl MinimaxStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Visited states per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes_visited as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
