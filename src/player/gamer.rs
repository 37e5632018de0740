//! A player bound to one role of one game.
//!
//! The session layer advances the gamer with each joint action the game
//! actually took, and asks for a move with an absolute deadline.

use crate::core::{DeadlineClock, JointAction, RoleId, SearchError, SearchRng};
use crate::rules::StateMachine;

use super::config::PlayerConfig;
use super::strategy::{choose_action, Decision};

pub struct Gamer<M: StateMachine> {
    machine: M,
    role: RoleId,
    state: M::State,
    config: PlayerConfig,
    rng: SearchRng,
    last_decision: Option<Decision<M::Action>>,
}

impl<M: StateMachine> Gamer<M> {
    /// Gamer for `role`, starting from the game's initial state.
    pub fn new(machine: M, role: RoleId, config: PlayerConfig) -> Result<Self, SearchError> {
        machine.check_role(role)?;
        config.validate()?;

        let state = machine.initial_state();
        let rng = SearchRng::new(config.seed);
        Ok(Self {
            machine,
            role,
            state,
            config,
            rng,
            last_decision: None,
        })
    }

    /// Replace the current state, e.g. when joining a match in progress.
    pub fn with_state(mut self, state: M::State) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn role(&self) -> RoleId {
        self.role
    }

    #[must_use]
    pub fn state(&self) -> &M::State {
        &self.state
    }

    #[must_use]
    pub fn machine(&self) -> &M {
        &self.machine
    }

    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// The most recent decision, if any.
    #[must_use]
    pub fn last_decision(&self) -> Option<&Decision<M::Action>> {
        self.last_decision.as_ref()
    }

    /// Choose an action for the current state, finishing at least
    /// `safety_margin_ms` before `deadline_epoch_ms`.
    pub fn select_action(&mut self, deadline_epoch_ms: u64) -> Result<M::Action, SearchError> {
        let clock = DeadlineClock::new(deadline_epoch_ms, self.config.safety_margin_ms);
        let decision = choose_action(
            &self.config.strategy,
            &self.machine,
            self.role,
            &self.state,
            clock,
            &mut self.rng,
        )?;

        let action = decision.action.clone();
        self.last_decision = Some(decision);
        Ok(action)
    }

    /// Apply the joint action every role played this turn.
    pub fn advance(&mut self, joint: &JointAction<M::Action>) -> Result<(), SearchError> {
        self.state = self.machine.next_state(&self.state, joint)?;
        Ok(())
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.machine.is_terminal(&self.state)
    }
}
