//! Static evaluation of cutoff states.
//!
//! Estimates are clamped to `[1, 99]`: only a real terminal state may score
//! 0 or 100, so a forced-win short-circuit never fires on a guess.

use crate::core::{RoleId, RulesError, MAX_REWARD, MIN_REWARD};
use crate::rules::StateMachine;

use super::config::Heuristic;

const MIN_ESTIMATE: f64 = (MIN_REWARD + 1) as f64;
const MAX_ESTIMATE: f64 = (MAX_REWARD - 1) as f64;

/// Legal actions of `role` as a percentage of its action vocabulary.
pub fn mobility<M: StateMachine>(
    machine: &M,
    role: RoleId,
    state: &M::State,
) -> Result<f64, RulesError> {
    let feasible = machine.feasible_action_count(role);
    if feasible == 0 {
        return Ok(0.0);
    }
    let legal = machine.legal_actions(role, state)?.len();
    Ok(legal as f64 / feasible as f64 * 100.0)
}

/// Heuristic value of a non-terminal `state` for `role`.
pub fn evaluate<M: StateMachine>(
    machine: &M,
    role: RoleId,
    state: &M::State,
    heuristic: Heuristic,
) -> Result<u8, RulesError> {
    let raw = match heuristic {
        Heuristic::Reward => f64::from(machine.reward(role, state)?),
        Heuristic::Mobility => mobility(machine, role, state)?,
        Heuristic::RewardMobility => {
            let reward = f64::from(machine.reward(role, state)?);
            let own = mobility(machine, role, state)?;
            let opponents = machine.opponents(role);
            let theirs = if opponents.is_empty() {
                0.0
            } else {
                let mut sum = 0.0;
                for opp in &opponents {
                    sum += mobility(machine, *opp, state)?;
                }
                sum / opponents.len() as f64
            };
            reward + own - theirs
        }
    };

    Ok(raw.round().clamp(MIN_ESTIMATE, MAX_ESTIMATE) as u8)
}
