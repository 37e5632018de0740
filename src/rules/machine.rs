//! The game model interface consumed by every search strategy.
//!
//! A `StateMachine` describes a game as roles, states and joint actions:
//! - which actions each role may take in a state
//! - the successor state of a joint action (one action per role)
//! - terminal detection and per-role rewards in `[0, 100]`
//!
//! Turn-taking games are modelled the GGP way: the role not in control has a
//! single "noop" action.

use std::fmt::Debug;

use crate::core::{JointAction, RoleId, RoleMap, RulesError, SearchRng};

/// Game model trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: must be non-empty in every non-terminal state
/// - `next_state`: must be deterministic
/// - `reward`: required for terminal states; may also answer for
///   non-terminal states, which heuristics use as an interim goal value
pub trait StateMachine {
    type State: Clone + Debug;
    type Action: Clone + PartialEq + Debug;

    /// Number of roles in the game.
    fn role_count(&self) -> usize;

    /// The state the game starts in.
    fn initial_state(&self) -> Self::State;

    /// Legal actions of `role` in `state`, in a stable order.
    fn legal_actions(
        &self,
        role: RoleId,
        state: &Self::State,
    ) -> Result<Vec<Self::Action>, RulesError>;

    /// Successor of `state` under `joint`.
    fn next_state(
        &self,
        state: &Self::State,
        joint: &JointAction<Self::Action>,
    ) -> Result<Self::State, RulesError>;

    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Reward of `role` in `state`, within `[0, 100]`.
    fn reward(&self, role: RoleId, state: &Self::State) -> Result<u8, RulesError>;

    /// Size of `role`'s full action vocabulary, legal or not. Used as the
    /// denominator of mobility.
    fn feasible_action_count(&self, role: RoleId) -> usize;

    // === Provided Methods ===

    /// All roles in declaration order.
    fn roles(&self) -> Vec<RoleId> {
        RoleId::all(self.role_count()).collect()
    }

    /// Every role except `role`.
    fn opponents(&self, role: RoleId) -> Vec<RoleId> {
        RoleId::all(self.role_count()).filter(|r| *r != role).collect()
    }

    /// Check that `role` exists in this game.
    fn check_role(&self, role: RoleId) -> Result<(), RulesError> {
        if role.index() < self.role_count() {
            Ok(())
        } else {
            Err(RulesError::UnknownRole(role))
        }
    }

    /// Every joint action in which `role` plays `action`, with each other
    /// role ranging over its legal actions. Ordered lexicographically by
    /// role order.
    fn legal_joint_continuations(
        &self,
        role: RoleId,
        action: &Self::Action,
        state: &Self::State,
    ) -> Result<Vec<JointAction<Self::Action>>, RulesError> {
        let mut partials: Vec<Vec<Self::Action>> = vec![Vec::with_capacity(self.role_count())];

        for r in RoleId::all(self.role_count()) {
            let choices = if r == role {
                vec![action.clone()]
            } else {
                let legal = self.legal_actions(r, state)?;
                if legal.is_empty() {
                    return Err(RulesError::NoLegalActions(r));
                }
                legal
            };

            let mut extended = Vec::with_capacity(partials.len() * choices.len());
            for partial in &partials {
                for choice in &choices {
                    let mut next = partial.clone();
                    next.push(choice.clone());
                    extended.push(next);
                }
            }
            partials = extended;
        }

        Ok(partials.into_iter().map(RoleMap::from_vec).collect())
    }

    /// A uniformly random legal joint action.
    fn random_joint_action(
        &self,
        state: &Self::State,
        rng: &mut SearchRng,
    ) -> Result<JointAction<Self::Action>, RulesError> {
        let mut actions = Vec::with_capacity(self.role_count());
        for r in RoleId::all(self.role_count()) {
            let legal = self.legal_actions(r, state)?;
            let chosen = rng.choose(&legal).ok_or(RulesError::NoLegalActions(r))?;
            actions.push(chosen.clone());
        }
        Ok(RoleMap::from_vec(actions))
    }
}
