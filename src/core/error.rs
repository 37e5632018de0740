//! Error types shared by the game model and the search engines.

use thiserror::Error;

use super::role::RoleId;

/// Failures reported by a game model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("{0} has no legal actions")]
    NoLegalActions(RoleId),

    #[error("Illegal joint action: {0}")]
    IllegalJointAction(String),

    #[error("Reward undefined for {0}")]
    RewardUndefined(RoleId),

    #[error("Unknown role: {0}")]
    UnknownRole(RoleId),

    #[error("Rules error: {0}")]
    Other(String),
}

/// Errors surfaced by the move selection layer.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Rules error: {0}")]
    Rules(#[from] RulesError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
