//! Arena-based MCTS tree.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references. Parents are
//! plain indices, so walking up during backpropagation needs no shared
//! ownership.

use serde::{Deserialize, Serialize};

use super::node::{NodeId, SearchNode};

/// Arena-based MCTS tree for one move decision.
#[derive(Clone, Debug)]
pub struct MctsTree<S, A> {
    nodes: Vec<SearchNode<S, A>>,
    root: NodeId,
}

impl<S, A> MctsTree<S, A> {
    /// Create a new tree whose root holds `state`.
    pub fn new(state: S) -> Self {
        Self::with_capacity(state, 1024)
    }

    pub fn with_capacity(state: S, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(SearchNode::root(state));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S, A> {
        &mut self.nodes[id.index()]
    }

    /// Allocate a node and register it with its parent.
    pub fn alloc(&mut self, node: SearchNode<S, A>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        let parent = node.parent;
        self.nodes.push(node);
        if !parent.is_none() {
            self.get_mut(parent).children.push(id);
        }
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn root_node(&self) -> &SearchNode<S, A> {
        self.get(self.root)
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode<S, A>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Children of `id` in creation order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &SearchNode<S, A>)> {
        self.get(id).children.iter().map(move |c| (*c, self.get(*c)))
    }

    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.terminal).count();
        let solved_count = self.nodes.iter().filter(|n| n.is_solved()).count();
        let expanded_count = self.nodes.iter().filter(|n| n.expanded).count();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            solved_count,
            expanded_count,
        }
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    pub node_count: usize,

    pub max_depth: u16,

    pub terminal_count: usize,

    /// Nodes with an exact value.
    pub solved_count: usize,

    pub expanded_count: usize,
}

impl TreeStats {
    /// Share of nodes whose value is exact.
    #[must_use]
    pub fn solved_ratio(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.solved_count as f64 / self.node_count as f64
        }
    }
}
