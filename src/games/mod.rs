//! Bundled game models used by tests, benchmarks and examples.
//!
//! - `tictactoe`: two roles, alternating control with noop moves
//! - `buttons`: single-role puzzle with graded goals

pub mod buttons;
pub mod tictactoe;

pub use buttons::{Button, ButtonsAndLights, ButtonsState};
pub use tictactoe::{Cell, TicTacToe, TttAction, TttState};
