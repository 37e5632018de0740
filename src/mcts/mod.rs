//! Monte Carlo Tree Search with exact-value propagation.
//!
//! ## Overview
//!
//! - **Two-ply expansion**: a max node (agent to choose) is expanded into
//!   one min node per agent action and one max grandchild per opponent
//!   joint reply
//! - **UCT selection**: unvisited grandchildren first, then UCT over open
//!   children and grandchildren
//! - **Depth charges**: random playouts averaged into one score per cycle
//! - **Solved propagation**: proven values move up the tree and solved
//!   subtrees are never selected again
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use ggp_search::core::{DeadlineClock, SearchContext};
//! use ggp_search::games::TicTacToe;
//! use ggp_search::mcts::{MctsConfig, MctsSearch};
//! use ggp_search::rules::StateMachine;
//!
//! let game = TicTacToe::new();
//! let mut search = MctsSearch::new(&game, TicTacToe::X, game.initial_state(), MctsConfig::default());
//! let mut ctx = SearchContext::new(DeadlineClock::after(Duration::from_millis(50), 0));
//!
//! let result = search.run(&mut ctx).unwrap();
//! for child in search.root_children() {
//!     println!("{:?}: {} visits, {:.1}", child.action, child.visits, child.utility);
//! }
//! # let _ = result;
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::MctsConfig;
pub use node::{NodeId, NodeKind, SearchNode};
pub use policy::{ChildView, PlayoutPolicy, RandomPlayout, SelectionPolicy, Uct, NEUTRAL_SCORE};
pub use search::{MctsResult, MctsSearch, RootChild};
pub use stats::SearchStats;
pub use tree::{MctsTree, TreeStats};
