//! Buttons and lights: a single-role puzzle.
//!
//! Three lights `p`, `q`, `r` start off. Button `A` toggles `p`, `B` swaps
//! `p` and `q`, `C` swaps `q` and `r`. The game ends when every light is on
//! or the step limit is reached. The goal is 100 with all lights on, else
//! 25 per lit light.

use serde::{Deserialize, Serialize};

use crate::core::{JointAction, RoleId, RulesError};
use crate::rules::StateMachine;

/// Light pattern and elapsed steps.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonsState {
    lights: [bool; 3],
    step: u32,
}

impl ButtonsState {
    #[must_use]
    pub fn lights(&self) -> [bool; 3] {
        self.lights
    }

    #[must_use]
    pub fn step(&self) -> u32 {
        self.step
    }

    fn lit(&self) -> u8 {
        self.lights.iter().filter(|l| **l).count() as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    A,
    B,
    C,
}

/// The puzzle rules, parameterised by the step limit.
#[derive(Clone, Copy, Debug)]
pub struct ButtonsAndLights {
    step_limit: u32,
}

impl Default for ButtonsAndLights {
    fn default() -> Self {
        Self { step_limit: 7 }
    }
}

impl ButtonsAndLights {
    pub const PLAYER: RoleId = RoleId(0);

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_step_limit(step_limit: u32) -> Self {
        Self { step_limit }
    }
}

impl StateMachine for ButtonsAndLights {
    type State = ButtonsState;
    type Action = Button;

    fn role_count(&self) -> usize {
        1
    }

    fn initial_state(&self) -> ButtonsState {
        ButtonsState {
            lights: [false; 3],
            step: 0,
        }
    }

    fn legal_actions(&self, role: RoleId, _state: &ButtonsState) -> Result<Vec<Button>, RulesError> {
        self.check_role(role)?;
        Ok(vec![Button::A, Button::B, Button::C])
    }

    fn next_state(
        &self,
        state: &ButtonsState,
        joint: &JointAction<Button>,
    ) -> Result<ButtonsState, RulesError> {
        if joint.role_count() != 1 {
            return Err(RulesError::IllegalJointAction(format!(
                "expected 1 action, got {}",
                joint.role_count()
            )));
        }

        let [p, q, r] = state.lights;
        let lights = match joint[Self::PLAYER] {
            Button::A => [!p, q, r],
            Button::B => [q, p, r],
            Button::C => [p, r, q],
        };

        Ok(ButtonsState {
            lights,
            step: state.step + 1,
        })
    }

    fn is_terminal(&self, state: &ButtonsState) -> bool {
        state.lit() == 3 || state.step >= self.step_limit
    }

    fn reward(&self, role: RoleId, state: &ButtonsState) -> Result<u8, RulesError> {
        self.check_role(role)?;
        Ok(if state.lit() == 3 { 100 } else { 25 * state.lit() })
    }

    fn feasible_action_count(&self, _role: RoleId) -> usize {
        3
    }
}
