//! Shared fixtures: a synthetic game over an explicit tree of leaf values.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ggp_search::core::{now_epoch_ms, JointAction, RoleId, RulesError};
use ggp_search::rules::StateMachine;
use proptest::prelude::*;

/// A fixed-depth game where roles take turns picking a branch. Role 0's
/// reward at a leaf is the leaf value; every other role gets `100 - value`.
#[derive(Clone, Debug)]
pub struct TreeGame {
    roles: usize,
    branching: u8,
    depth: usize,
    leaves: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TreeState {
    path: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeAction {
    Branch(u8),
    Noop,
}

impl TreeGame {
    pub fn new(roles: usize, branching: u8, depth: usize, leaves: Vec<u8>) -> Self {
        assert_eq!(leaves.len(), (branching as usize).pow(depth as u32));
        Self {
            roles,
            branching,
            depth,
            leaves,
        }
    }

    fn controller(&self, state: &TreeState) -> RoleId {
        controller(self.roles, state)
    }

    fn leaf_value(&self, path: &[u8]) -> u8 {
        let index = path
            .iter()
            .fold(0usize, |acc, b| acc * self.branching as usize + *b as usize);
        self.leaves[index]
    }

    /// Role 0's value with every other role minimizing it.
    pub fn minimax_value(&self) -> u8 {
        self.minimax_from(&mut Vec::new())
    }

    fn minimax_from(&self, path: &mut Vec<u8>) -> u8 {
        if path.len() == self.depth {
            return self.leaf_value(path);
        }
        let maximizing = path.len() % self.roles == 0;
        let mut values = Vec::new();
        for b in 0..self.branching {
            path.push(b);
            values.push(self.minimax_from(path));
            path.pop();
        }
        if maximizing {
            values.into_iter().max().unwrap()
        } else {
            values.into_iter().min().unwrap()
        }
    }
}

impl StateMachine for TreeGame {
    type State = TreeState;
    type Action = TreeAction;

    fn role_count(&self) -> usize {
        self.roles
    }

    fn initial_state(&self) -> TreeState {
        TreeState { path: Vec::new() }
    }

    fn legal_actions(&self, role: RoleId, state: &TreeState) -> Result<Vec<TreeAction>, RulesError> {
        self.check_role(role)?;
        if self.is_terminal(state) {
            return Ok(Vec::new());
        }
        Ok(legal_for(self.roles, self.branching, role, state))
    }

    fn next_state(
        &self,
        state: &TreeState,
        joint: &JointAction<TreeAction>,
    ) -> Result<TreeState, RulesError> {
        apply_joint(self.controller(state), self.branching, state, joint)
    }

    fn is_terminal(&self, state: &TreeState) -> bool {
        state.path.len() == self.depth
    }

    fn reward(&self, role: RoleId, state: &TreeState) -> Result<u8, RulesError> {
        self.check_role(role)?;
        if !self.is_terminal(state) {
            return Ok(50);
        }
        let value = self.leaf_value(&state.path);
        Ok(if role == RoleId::new(0) { value } else { 100 - value })
    }

    fn feasible_action_count(&self, _role: RoleId) -> usize {
        self.branching as usize + 1
    }
}

/// Small random game trees: 2-3 roles, branching 2-3, depth 1-4.
pub fn tree_games() -> impl Strategy<Value = TreeGame> {
    (2usize..=3, 2u8..=3, 1usize..=4).prop_flat_map(|(roles, branching, depth)| {
        let leaf_count = (branching as usize).pow(depth as u32);
        proptest::collection::vec(0u8..=100, leaf_count)
            .prop_map(move |leaves| TreeGame::new(roles, branching, depth, leaves))
    })
}

fn controller(roles: usize, state: &TreeState) -> RoleId {
    RoleId::new((state.path.len() % roles) as u8)
}

/// Branch for the role in control, noop for everyone else.
fn legal_for(
    roles: usize,
    branching: u8,
    role: RoleId,
    state: &TreeState,
) -> Vec<TreeAction> {
    if role == controller(roles, state) {
        (0..branching).map(TreeAction::Branch).collect()
    } else {
        vec![TreeAction::Noop]
    }
}

fn apply_joint(
    mover: RoleId,
    branching: u8,
    state: &TreeState,
    joint: &JointAction<TreeAction>,
) -> Result<TreeState, RulesError> {
    let mut next = state.clone();
    for (role, action) in joint.iter() {
        match (*action, role == mover) {
            (TreeAction::Branch(b), true) if b < branching => next.path.push(b),
            (TreeAction::Noop, false) => {}
            (other, _) => {
                return Err(RulesError::IllegalJointAction(format!(
                    "{} cannot play {:?}",
                    role, other
                )))
            }
        }
    }
    Ok(next)
}

/// A wide, deep game whose transitions each take `delay` of wall-clock
/// time. Leaf values stay below 100, so no search can stop on a proven win.
///
/// Transitions started at or after the armed expiry are counted.
#[derive(Clone, Debug)]
pub struct SlowGame {
    roles: usize,
    branching: u8,
    depth: usize,
    delay: Duration,
    expiry_ms: Arc<AtomicU64>,
    late_calls: Arc<AtomicU32>,
}

impl SlowGame {
    pub fn new(roles: usize, branching: u8, depth: usize, delay: Duration) -> Self {
        Self {
            roles,
            branching,
            depth,
            delay,
            expiry_ms: Arc::new(AtomicU64::new(u64::MAX)),
            late_calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Start counting transitions made at or after `expiry_ms`.
    pub fn arm(&self, expiry_ms: u64) {
        self.late_calls.store(0, Ordering::SeqCst);
        self.expiry_ms.store(expiry_ms, Ordering::SeqCst);
    }

    pub fn disarm(&self) {
        self.expiry_ms.store(u64::MAX, Ordering::SeqCst);
    }

    pub fn late_calls(&self) -> u32 {
        self.late_calls.load(Ordering::SeqCst)
    }

    fn leaf_value(path: &[u8]) -> u8 {
        let hash = path
            .iter()
            .fold(17u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(*b) + 1));
        (hash % 100) as u8
    }
}

impl StateMachine for SlowGame {
    type State = TreeState;
    type Action = TreeAction;

    fn role_count(&self) -> usize {
        self.roles
    }

    fn initial_state(&self) -> TreeState {
        TreeState { path: Vec::new() }
    }

    fn legal_actions(&self, role: RoleId, state: &TreeState) -> Result<Vec<TreeAction>, RulesError> {
        self.check_role(role)?;
        if self.is_terminal(state) {
            return Ok(Vec::new());
        }
        Ok(legal_for(self.roles, self.branching, role, state))
    }

    fn next_state(
        &self,
        state: &TreeState,
        joint: &JointAction<TreeAction>,
    ) -> Result<TreeState, RulesError> {
        if now_epoch_ms() >= self.expiry_ms.load(Ordering::SeqCst) {
            self.late_calls.fetch_add(1, Ordering::SeqCst);
        }
        std::thread::sleep(self.delay);
        apply_joint(controller(self.roles, state), self.branching, state, joint)
    }

    fn is_terminal(&self, state: &TreeState) -> bool {
        state.path.len() == self.depth
    }

    fn reward(&self, role: RoleId, state: &TreeState) -> Result<u8, RulesError> {
        self.check_role(role)?;
        if !self.is_terminal(state) {
            return Ok(50);
        }
        let value = Self::leaf_value(&state.path);
        Ok(if role == RoleId::new(0) { value } else { 100 - value })
    }

    fn feasible_action_count(&self, _role: RoleId) -> usize {
        self.branching as usize + 1
    }
}
