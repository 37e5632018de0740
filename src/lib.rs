//! # ggp-search
//!
//! Deadline-bounded move selection for general game playing.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: Search code only sees the [`StateMachine`] trait.
//!    Games are roles, states and joint actions; nothing else is assumed.
//!
//! 2. **Always Answer**: A decision finishes before its deadline minus a
//!    safety margin and always returns a legal action, falling back to the
//!    first legal one when a search fails or produces nothing.
//!
//! 3. **Configuration Over Convention**: Strategies are chosen and tuned
//!    through serializable config structs.
//!
//! ## Modules
//!
//! - `core`: Roles, joint actions, deadline clock, RNG, errors
//! - `rules`: `StateMachine` trait for game implementations
//! - `minimax`: Iterative-deepening alpha-beta and compulsive search
//! - `mcts`: Monte Carlo Tree Search with solved-value propagation
//! - `player`: Strategy dispatch and the `Gamer` facade
//! - `games`: Bundled tic-tac-toe and buttons-and-lights models

pub mod core;
pub mod games;
pub mod mcts;
pub mod minimax;
pub mod player;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    DeadlineClock, JointAction, RoleId, RoleMap, RulesError, SearchContext, SearchError,
    SearchRng, SearchStatus,
};

pub use crate::rules::StateMachine;

pub use crate::minimax::{CompulsiveSearch, Heuristic, MinimaxConfig, MinimaxResult, MinimaxSearch};

pub use crate::mcts::{
    MctsConfig, MctsResult, MctsSearch, MctsTree, NodeId, NodeKind, PlayoutPolicy, RandomPlayout,
    SearchStats, SelectionPolicy, TreeStats, Uct,
};

pub use crate::player::{
    choose_action, Decision, DecisionSource, Gamer, PlayerConfig, StrategyConfig,
};
