//! Game model interface.
//!
//! The search engines never parse or simulate rules themselves; they only
//! call the `StateMachine` trait defined here.

pub mod machine;

pub use machine::StateMachine;
