//! Move selection policy.
//!
//! - `config`: strategy choice and safety margin
//! - `strategy`: [`choose_action`], the single-move shortcut and fallback
//! - `gamer`: [`Gamer`], a stateful player exposing `select_action`

pub mod config;
pub mod gamer;
pub mod strategy;

pub use config::{PlayerConfig, StrategyConfig};
pub use gamer::Gamer;
pub use strategy::{choose_action, Decision, DecisionSource};
