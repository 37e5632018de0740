//! Tic-tac-toe as a two-role game model.
//!
//! Role 0 plays X and moves first, role 1 plays O. Control alternates; the
//! idle role's only legal action is `Noop`. Goals are defined in every
//! state: 100 for three in a row, 0 for the opponent's three in a row, 50
//! otherwise (draws and unfinished games).

use serde::{Deserialize, Serialize};

use crate::core::{JointAction, RoleId, RulesError};
use crate::rules::StateMachine;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Contents of one square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

/// Board plus whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TttState {
    cells: [Cell; 9],
    x_to_move: bool,
}

impl TttState {
    /// Build a position from a row-major board.
    #[must_use]
    pub fn from_cells(cells: [Cell; 9], x_to_move: bool) -> Self {
        Self { cells, x_to_move }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    #[must_use]
    pub fn x_to_move(&self) -> bool {
        self.x_to_move
    }

    fn winner(&self) -> Option<Cell> {
        LINES.iter().find_map(|[a, b, c]| {
            let cell = self.cells[*a];
            (cell != Cell::Empty && cell == self.cells[*b] && cell == self.cells[*c])
                .then_some(cell)
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }
}

/// A move: mark a square, or wait while the other role moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TttAction {
    Mark(u8),
    Noop,
}

/// The tic-tac-toe rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToe;

impl TicTacToe {
    pub const X: RoleId = RoleId(0);
    pub const O: RoleId = RoleId(1);

    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn controls(role: RoleId, state: &TttState) -> bool {
        (role == Self::X) == state.x_to_move
    }

    fn mark_of(role: RoleId) -> Cell {
        if role == Self::X {
            Cell::X
        } else {
            Cell::O
        }
    }
}

impl StateMachine for TicTacToe {
    type State = TttState;
    type Action = TttAction;

    fn role_count(&self) -> usize {
        2
    }

    fn initial_state(&self) -> TttState {
        TttState::from_cells([Cell::Empty; 9], true)
    }

    fn legal_actions(&self, role: RoleId, state: &TttState) -> Result<Vec<TttAction>, RulesError> {
        self.check_role(role)?;

        if !Self::controls(role, state) {
            return Ok(vec![TttAction::Noop]);
        }

        Ok(state
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| TttAction::Mark(i as u8))
            .collect())
    }

    fn next_state(
        &self,
        state: &TttState,
        joint: &JointAction<TttAction>,
    ) -> Result<TttState, RulesError> {
        if joint.role_count() != 2 {
            return Err(RulesError::IllegalJointAction(format!(
                "expected 2 actions, got {}",
                joint.role_count()
            )));
        }

        let mover = if state.x_to_move { Self::X } else { Self::O };
        let idle = if state.x_to_move { Self::O } else { Self::X };

        if joint[idle] != TttAction::Noop {
            return Err(RulesError::IllegalJointAction(format!(
                "{} must noop, got {:?}",
                idle, joint[idle]
            )));
        }

        let cell = match joint[mover] {
            TttAction::Mark(i) if (i as usize) < 9 && state.cells[i as usize] == Cell::Empty => {
                i as usize
            }
            other => {
                return Err(RulesError::IllegalJointAction(format!(
                    "{} cannot play {:?}",
                    mover, other
                )))
            }
        };

        let mut next = state.clone();
        next.cells[cell] = Self::mark_of(mover);
        next.x_to_move = !state.x_to_move;
        Ok(next)
    }

    fn is_terminal(&self, state: &TttState) -> bool {
        state.winner().is_some() || state.is_full()
    }

    fn reward(&self, role: RoleId, state: &TttState) -> Result<u8, RulesError> {
        self.check_role(role)?;

        Ok(match state.winner() {
            Some(mark) if mark == Self::mark_of(role) => 100,
            Some(_) => 0,
            None => 50,
        })
    }

    fn feasible_action_count(&self, _role: RoleId) -> usize {
        10
    }
}
