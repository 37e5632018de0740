//! Player configuration: which strategy to run and how much of each
//! deadline to keep in reserve.

use serde::{Deserialize, Serialize};

use crate::core::SearchError;
use crate::mcts::MctsConfig;
use crate::minimax::MinimaxConfig;

/// Move selection strategy, chosen once per player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StrategyConfig {
    /// Always the first legal action.
    Legal,
    /// A uniformly random legal action.
    Random,
    /// Alpha-beta with iterative deepening; compulsive search when the
    /// role has no opponents.
    Minimax(MinimaxConfig),
    /// Monte Carlo Tree Search.
    Mcts(MctsConfig),
}

impl StrategyConfig {
    /// Reserve each strategy keeps by default, in milliseconds.
    #[must_use]
    pub fn default_margin_ms(&self) -> u64 {
        match self {
            StrategyConfig::Legal | StrategyConfig::Random => 500,
            StrategyConfig::Minimax(_) => 1_000,
            StrategyConfig::Mcts(_) => 3_000,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StrategyConfig::Legal => "legal",
            StrategyConfig::Random => "random",
            StrategyConfig::Minimax(_) => "minimax",
            StrategyConfig::Mcts(_) => "mcts",
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::Mcts(MctsConfig::default())
    }
}

/// Player configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub strategy: StrategyConfig,

    /// Time kept free before each deadline (milliseconds).
    pub safety_margin_ms: u64,

    /// Seed for the random strategy.
    pub seed: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::new(StrategyConfig::default())
    }
}

impl PlayerConfig {
    /// Config for `strategy` with that strategy's default margin.
    pub fn new(strategy: StrategyConfig) -> Self {
        Self {
            safety_margin_ms: strategy.default_margin_ms(),
            strategy,
            seed: 42,
        }
    }

    pub fn with_safety_margin(mut self, margin_ms: u64) -> Self {
        self.safety_margin_ms = margin_ms;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject settings no search can run with.
    pub fn validate(&self) -> Result<(), SearchError> {
        if let StrategyConfig::Mcts(mcts) = &self.strategy {
            if !mcts.exploration_constant.is_finite() || mcts.exploration_constant < 0.0 {
                return Err(SearchError::InvalidConfig(format!(
                    "exploration constant must be finite and non-negative, got {}",
                    mcts.exploration_constant
                )));
            }
            if mcts.max_nodes == 0 {
                return Err(SearchError::InvalidConfig(
                    "max_nodes must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }
}
