//! Deadline-bounded minimax search.
//!
//! ## Overview
//!
//! - [`MinimaxSearch`]: alpha-beta with iterative deepening for games with
//!   opponents. Opponents act as a single minimizing coalition.
//! - [`CompulsiveSearch`]: exhaustive depth-first maximization for games
//!   where the agent plays alone.
//!
//! Both score cutoff positions with a configurable [`Heuristic`] and poll a
//! [`SearchContext`](crate::core::SearchContext) at every recursion step.
//!
//! ## Usage
//!
//! ```
//! use ggp_search::core::{DeadlineClock, SearchContext};
//! use ggp_search::games::{TicTacToe, TttAction};
//! use ggp_search::minimax::{MinimaxConfig, MinimaxSearch};
//! use ggp_search::rules::StateMachine;
//!
//! let game = TicTacToe::new();
//! let mut search = MinimaxSearch::new(&game, TicTacToe::X, MinimaxConfig::default().with_max_depth(2));
//! let mut ctx = SearchContext::new(DeadlineClock::unbounded());
//!
//! let result = search.iterative_deepening(&mut ctx, &game.initial_state()).unwrap();
//! assert!(matches!(result.action, Some(TttAction::Mark(_))));
//! ```

pub mod compulsive;
pub mod config;
pub mod eval;
pub mod search;
pub mod stats;

pub use compulsive::CompulsiveSearch;
pub use config::{Heuristic, MinimaxConfig};
pub use eval::{evaluate, mobility};
pub use search::{FrontierEntry, MinimaxResult, MinimaxSearch};
pub use stats::MinimaxStats;
