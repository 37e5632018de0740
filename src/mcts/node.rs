//! MCTS node structures.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. The tree
//! alternates two kinds of node: at a max node the searching role chooses
//! an action; at the min node below it that action is fixed and the
//! opponents' joint reply decides which max grandchild follows.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Index into the tree's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Who decides at a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// The searching role picks an action.
    Max,
    /// The opponents pick a joint reply to the incoming action.
    Min,
}

/// A node in the MCTS tree.
#[derive(Clone, Debug)]
pub struct SearchNode<S, A> {
    /// Game state at this node. A min node repeats its parent's state.
    pub state: S,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    pub children: SmallVec<[NodeId; 8]>,

    pub kind: NodeKind,

    /// Agent action that led here; `None` at the root.
    pub incoming_action: Option<A>,

    /// Times a simulation result was backed up through this node.
    pub visits: u32,

    /// Sum of backed-up simulation scores.
    pub total: f64,

    /// Exact value once solved. Never changes afterwards.
    pub solved_value: Option<f64>,

    pub expanded: bool,

    pub terminal: bool,

    /// Depth in tree (root = 0).
    pub depth: u16,
}

impl<S, A> SearchNode<S, A> {
    pub fn root(state: S) -> Self {
        Self::new(state, NodeId::NONE, NodeKind::Max, None, 0)
    }

    pub fn new(
        state: S,
        parent: NodeId,
        kind: NodeKind,
        incoming_action: Option<A>,
        depth: u16,
    ) -> Self {
        Self {
            state,
            parent,
            children: SmallVec::new(),
            kind,
            incoming_action,
            visits: 0,
            total: 0.0,
            solved_value: None,
            expanded: false,
            terminal: false,
            depth,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solved_value.is_some()
    }

    /// Mean backed-up score, 0 before the first visit.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total / self.visits as f64
        }
    }

    /// Exact value if solved, otherwise the mean score.
    #[must_use]
    pub fn utility(&self) -> f64 {
        self.solved_value.unwrap_or_else(|| self.mean())
    }

    /// Record one simulation result.
    pub fn record(&mut self, score: f64) {
        self.visits += 1;
        self.total += score;
    }
}
