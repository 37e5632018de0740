//! Minimax configuration parameters.

use serde::{Deserialize, Serialize};

/// Static evaluation used when a search is cut off before a terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heuristic {
    /// The game's reward for the cutoff state.
    Reward,
    /// Share of the agent's action vocabulary that is legal, scaled to 100.
    Mobility,
    /// Reward plus the agent's mobility minus the opponents' mean mobility.
    RewardMobility,
}

/// Minimax configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinimaxConfig {
    /// Cutoff evaluation (default: reward plus mobility difference).
    pub heuristic: Heuristic,

    /// Alpha-beta pruning. Disabling it yields plain minimax values.
    pub pruning: bool,

    /// Deepest iterative-deepening limit, in joint moves (0 = unlimited).
    pub max_depth: u32,

    /// Reuse root successor states across deepening rounds.
    pub cache_root_frontier: bool,

    /// Depth limit for single-agent search (0 = unlimited).
    pub compulsive_depth_limit: u32,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::RewardMobility,
            pruning: true,
            max_depth: 0,
            cache_root_frontier: true,
            compulsive_depth_limit: 0,
        }
    }
}

impl MinimaxConfig {
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_frontier_cache(mut self, enabled: bool) -> Self {
        self.cache_root_frontier = enabled;
        self
    }

    pub fn with_compulsive_depth_limit(mut self, depth: u32) -> Self {
        self.compulsive_depth_limit = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MinimaxConfig::default();
        assert_eq!(config.heuristic, Heuristic::RewardMobility);
        assert!(config.pruning);
        assert_eq!(config.max_depth, 0);
        assert!(config.cache_root_frontier);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MinimaxConfig::default()
            .with_heuristic(Heuristic::Reward)
            .with_pruning(false)
            .with_max_depth(4);

        assert_eq!(config.heuristic, Heuristic::Reward);
        assert!(!config.pruning);
        assert_eq!(config.max_depth, 4);
    }

    #[test]
    fn test_serialization() {
        let config = MinimaxConfig::default().with_compulsive_depth_limit(6);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MinimaxConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
