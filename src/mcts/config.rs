//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MctsConfig {
    /// UCT exploration constant (default: sqrt(2) = 1.414).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Random playouts averaged into one simulation score (default: 10).
    pub playouts_per_simulation: u32,

    /// Joint moves a playout may take before it is scored as a neutral 50
    /// (0 = play to the end).
    pub max_playout_depth: u32,

    /// Maximum nodes to allocate in the tree.
    /// Prevents memory exhaustion on long deadlines.
    pub max_nodes: usize,

    /// Random seed for playouts.
    /// Same seed produces deterministic searches.
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            playouts_per_simulation: 10,
            max_playout_depth: 0,
            max_nodes: 100_000,
            seed: 42,
        }
    }
}

impl MctsConfig {
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_playouts(mut self, count: u32) -> Self {
        self.playouts_per_simulation = count;
        self
    }

    pub fn with_max_playout_depth(mut self, depth: u32) -> Self {
        self.max_playout_depth = depth;
        self
    }

    pub fn with_max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = nodes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
