//! Core types: roles, joint actions, deadlines, RNG and errors.
//!
//! Everything here is game-agnostic; game models and both search engines
//! build on these types.

pub mod clock;
pub mod error;
pub mod rng;
pub mod role;

pub use clock::{now_epoch_ms, DeadlineClock, SearchContext};
pub use error::{RulesError, SearchError};
pub use rng::SearchRng;
pub use role::{JointAction, RoleId, RoleMap};

/// Lowest reward a role can receive.
pub const MIN_REWARD: u8 = 0;

/// Highest reward a role can receive.
pub const MAX_REWARD: u8 = 100;

/// Why a search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SearchStatus {
    /// The root value is exact.
    Solved,
    /// The search ran to its configured limit.
    Completed,
    /// The deadline cut the search short.
    TimeExpired,
    /// Nothing selectable was left to explore.
    Exhausted,
    /// The node budget was spent.
    NodeLimit,
}
