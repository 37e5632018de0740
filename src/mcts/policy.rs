//! MCTS policies for selection and playouts.
//!
//! - `SelectionPolicy`: scores a child when descending the tree (UCT)
//! - `PlayoutPolicy`: estimates a state's value by playing it out (random
//!   depth charges)

use crate::core::{RoleId, RulesError, SearchRng};
use crate::rules::StateMachine;

use super::config::MctsConfig;
use super::node::NodeKind;

/// Neutral score for a playout cut off before the game ended.
pub const NEUTRAL_SCORE: f64 = 50.0;

// =============================================================================
// Selection Policy
// =============================================================================

/// What a selection policy may look at when scoring a child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildView {
    pub kind: NodeKind,
    pub visits: u32,
    /// Mean backed-up score in `[0, 100]`.
    pub mean: f64,
}

/// Policy for choosing which child to descend into. Higher is better.
pub trait SelectionPolicy: Send + Sync {
    fn score(&self, child: ChildView, parent_visits: u32, config: &MctsConfig) -> f64;
}

/// UCT selection.
///
/// Formula: sign * mean + c * sqrt(ln(N) / n), with sign +1 when scoring a
/// min node (the agent picks it) and -1 when scoring a max node (the
/// opponents pick it). Unvisited children score infinity.
#[derive(Clone, Debug, Default)]
pub struct Uct;

impl SelectionPolicy for Uct {
    fn score(&self, child: ChildView, parent_visits: u32, config: &MctsConfig) -> f64 {
        if child.visits == 0 {
            return f64::INFINITY;
        }

        let sign = match child.kind {
            NodeKind::Min => 1.0,
            NodeKind::Max => -1.0,
        };
        let ln_parent = (parent_visits.max(1) as f64).ln();
        sign * child.mean
            + config.exploration_constant * (ln_parent / child.visits as f64).sqrt()
    }
}

// =============================================================================
// Playout Policy
// =============================================================================

/// Policy for estimating the value of a state for `role`.
pub trait PlayoutPolicy<M: StateMachine> {
    /// Play out from `state` and return a score in `[0, 100]`.
    fn playout(
        &self,
        machine: &M,
        role: RoleId,
        state: &M::State,
        rng: &mut SearchRng,
        max_depth: u32,
    ) -> Result<f64, RulesError>;
}

/// Depth charge: uniformly random joint actions until the game ends.
///
/// Scores the terminal reward, or [`NEUTRAL_SCORE`] when `max_depth` (if
/// non-zero) is reached first.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPlayout;

impl<M: StateMachine> PlayoutPolicy<M> for RandomPlayout {
    fn playout(
        &self,
        machine: &M,
        role: RoleId,
        state: &M::State,
        rng: &mut SearchRng,
        max_depth: u32,
    ) -> Result<f64, RulesError> {
        let mut current = state.clone();
        let mut depth = 0;

        loop {
            if machine.is_terminal(&current) {
                return Ok(f64::from(machine.reward(role, &current)?));
            }
            if max_depth > 0 && depth >= max_depth {
                return Ok(NEUTRAL_SCORE);
            }

            let joint = machine.random_joint_action(&current, rng)?;
            current = machine.next_state(&current, &joint)?;
            depth += 1;
        }
    }
}
