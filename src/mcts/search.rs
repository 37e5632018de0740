//! Core MCTS search algorithm.
//!
//! Each cycle selects an unvisited max node, expands it two plies at once
//! (agent actions, then the opponents' joint replies), scores it with
//! random playouts and backs the score up to the root. Exact values are
//! propagated alongside: a max node is solved once a child is proven 100
//! or every child is solved, a min node once a child is proven 0 or every
//! child is solved.

use std::time::Instant;

use tracing::{debug, trace};

use crate::core::{
    RoleId, RulesError, SearchContext, SearchRng, SearchStatus, MAX_REWARD, MIN_REWARD,
};
use crate::rules::StateMachine;

use super::config::MctsConfig;
use super::node::{NodeId, NodeKind, SearchNode};
use super::policy::{ChildView, PlayoutPolicy, RandomPlayout, SelectionPolicy, Uct};
use super::stats::SearchStats;
use super::tree::MctsTree;

/// Outcome of an MCTS decision.
#[derive(Clone, Debug, PartialEq)]
pub struct MctsResult<A> {
    /// Best root action, `None` if no root child was ever visited.
    pub action: Option<A>,

    /// Solved value or mean score of `action`.
    pub value: Option<f64>,

    pub status: SearchStatus,
}

/// Per-action summary of the root, in legal-action order.
#[derive(Clone, Debug, PartialEq)]
pub struct RootChild<A> {
    pub action: A,
    pub visits: u32,
    pub utility: f64,
    pub solved: bool,
}

/// MCTS search for one role over one move decision.
///
/// Generic over the game model and the playout policy.
pub struct MctsSearch<'m, M: StateMachine, P: PlayoutPolicy<M> = RandomPlayout> {
    machine: &'m M,
    role: RoleId,
    config: MctsConfig,
    tree: MctsTree<M::State, M::Action>,
    rng: SearchRng,
    selection: Box<dyn SelectionPolicy>,
    playout: P,
    stats: SearchStats,
}

impl<'m, M: StateMachine> MctsSearch<'m, M, RandomPlayout> {
    /// Create a search rooted at `state`.
    pub fn new(machine: &'m M, role: RoleId, state: M::State, config: MctsConfig) -> Self {
        let rng = SearchRng::new(config.seed);
        let capacity = config.max_nodes.min(4096);

        Self {
            machine,
            role,
            tree: MctsTree::with_capacity(state, capacity),
            config,
            rng,
            selection: Box::new(Uct),
            playout: RandomPlayout,
            stats: SearchStats::default(),
        }
    }
}

impl<'m, M: StateMachine, P: PlayoutPolicy<M>> MctsSearch<'m, M, P> {
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn tree(&self) -> &MctsTree<M::State, M::Action> {
        &self.tree
    }

    #[must_use]
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    fn view(&self, id: NodeId) -> ChildView {
        let node = self.tree.get(id);
        ChildView {
            kind: node.kind,
            visits: node.visits,
            mean: node.mean(),
        }
    }

    /// Highest-scoring child of `parent` that is neither solved nor
    /// terminal. Ties keep the earliest child.
    fn best_open_child(&self, parent: NodeId) -> Option<NodeId> {
        let parent_visits = self.tree.get(parent).visits;
        let mut best: Option<(NodeId, f64)> = None;

        for (id, node) in self.tree.children(parent) {
            if node.is_solved() || node.terminal {
                continue;
            }
            let score = self
                .selection
                .score(self.view(id), parent_visits, &self.config);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((id, score));
            }
        }

        best.map(|(id, _)| id)
    }

    // === Selection ===

    /// Find the next max node to expand and simulate, or `None` if nothing
    /// selectable remains.
    pub fn select(&self) -> Option<NodeId> {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if node.is_solved() {
                return None;
            }
            if node.visits == 0 || !node.expanded {
                return Some(current);
            }

            for (_, child) in self.tree.children(current) {
                if child.is_solved() {
                    continue;
                }
                if let Some(fresh) = child
                    .children
                    .iter()
                    .find(|gc| self.tree.get(**gc).visits == 0)
                {
                    return Some(*fresh);
                }
            }

            let child = self.best_open_child(current)?;
            current = self.best_open_child(child)?;
        }
    }

    // === Expansion ===

    /// Generate the two plies below a max node. Terminal nodes are marked
    /// and solved with their reward instead.
    pub fn expand(&mut self, id: NodeId) -> Result<(), RulesError> {
        let node = self.tree.get(id);
        if node.expanded {
            return Ok(());
        }

        let state = node.state.clone();
        let depth = node.depth;

        if self.machine.is_terminal(&state) {
            let reward = f64::from(self.machine.reward(self.role, &state)?);
            let node = self.tree.get_mut(id);
            node.terminal = true;
            node.expanded = true;
            node.solved_value = Some(reward);
            return Ok(());
        }

        for action in self.machine.legal_actions(self.role, &state)? {
            let joints = self
                .machine
                .legal_joint_continuations(self.role, &action, &state)?;

            let min_id = self.tree.alloc(SearchNode::new(
                state.clone(),
                id,
                NodeKind::Min,
                Some(action.clone()),
                depth + 1,
            ));
            self.tree.get_mut(min_id).expanded = true;

            for joint in &joints {
                let next = self.machine.next_state(&state, joint)?;
                self.tree.alloc(SearchNode::new(
                    next,
                    min_id,
                    NodeKind::Max,
                    Some(action.clone()),
                    depth + 2,
                ));
            }
        }

        self.tree.get_mut(id).expanded = true;
        self.stats.nodes_expanded += 1;
        Ok(())
    }

    // === Simulation ===

    /// Score a node: its exact value if terminal, else the mean of the
    /// configured number of playouts. At least one playout always runs;
    /// later ones stop at the deadline.
    pub fn simulate(&mut self, ctx: &mut SearchContext, id: NodeId) -> Result<f64, RulesError> {
        let node = self.tree.get(id);
        if node.terminal {
            if let Some(value) = node.solved_value {
                return Ok(value);
            }
            return Ok(f64::from(self.machine.reward(self.role, &node.state)?));
        }

        let state = node.state.clone();
        let count = self.config.playouts_per_simulation.max(1);
        let mut rng = self.rng.fork();
        let mut sum = 0.0;
        let mut runs = 0u32;

        for i in 0..count {
            if i > 0 && !ctx.has_time() {
                break;
            }
            sum += self.playout.playout(
                self.machine,
                self.role,
                &state,
                &mut rng,
                self.config.max_playout_depth,
            )?;
            runs += 1;
        }

        self.stats.playouts += runs;
        Ok(sum / f64::from(runs))
    }

    // === Backpropagation ===

    /// Exact value of `id` if its solved children already decide it.
    fn solved_from_children(&self, id: NodeId) -> Option<f64> {
        let node = self.tree.get(id);
        if node.children.is_empty() {
            return None;
        }

        let (decisive, pick): (f64, fn(f64, f64) -> f64) = match node.kind {
            NodeKind::Max => (f64::from(MAX_REWARD), f64::max),
            NodeKind::Min => (f64::from(MIN_REWARD), f64::min),
        };

        let mut all_solved = true;
        let mut value: Option<f64> = None;
        for (_, child) in self.tree.children(id) {
            match child.solved_value {
                Some(v) if v == decisive => return Some(v),
                Some(v) => value = Some(value.map_or(v, |acc| pick(acc, v))),
                None => all_solved = false,
            }
        }

        if all_solved {
            value
        } else {
            None
        }
    }

    /// Add `score` to every node from `id` up to the root and propagate
    /// exact values.
    pub fn backpropagate(&mut self, id: NodeId, score: f64) {
        let mut current = id;
        let mut child_solved = false;

        while !current.is_none() {
            let node = self.tree.get_mut(current);
            node.record(score);
            if node.terminal && node.solved_value.is_none() {
                node.solved_value = Some(score);
            }

            if child_solved && !self.tree.get(current).is_solved() {
                if let Some(value) = self.solved_from_children(current) {
                    self.tree.get_mut(current).solved_value = Some(value);
                }
            }

            let node = self.tree.get(current);
            child_solved = node.is_solved();
            current = node.parent;
        }
    }

    // === Driver ===

    /// One select-expand-simulate-backpropagate cycle. Returns `false` when
    /// there was nothing left to select.
    pub fn run_cycle(&mut self, ctx: &mut SearchContext) -> Result<bool, RulesError> {
        let Some(leaf) = self.select() else {
            return Ok(false);
        };

        self.expand(leaf)?;
        let score = self.simulate(ctx, leaf)?;
        self.backpropagate(leaf, score);

        let depth = self.tree.get(leaf).depth;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        self.stats.cycles += 1;

        trace!(leaf = leaf.0, depth, score, "MCTS cycle complete");
        Ok(true)
    }

    /// Run cycles until the deadline, a solved root, an exhausted tree or
    /// the node budget.
    pub fn run(&mut self, ctx: &mut SearchContext) -> Result<MctsResult<M::Action>, RulesError> {
        let start = Instant::now();
        self.stats.reset();

        let status = loop {
            if self.tree.root_node().is_solved() {
                break SearchStatus::Solved;
            }
            if !ctx.has_time() {
                break SearchStatus::TimeExpired;
            }
            if self.tree.len() >= self.config.max_nodes {
                break SearchStatus::NodeLimit;
            }
            if !self.run_cycle(ctx)? {
                break SearchStatus::Exhausted;
            }
        };

        self.stats.time_us = start.elapsed().as_micros() as u64;
        let best = self.best_action();

        let tree_stats = self.tree.stats();
        debug!(
            cycles = self.stats.cycles,
            playouts = self.stats.playouts,
            cycles_per_sec = self.stats.cycles_per_second(),
            playouts_per_sec = self.stats.playouts_per_second(),
            nodes = tree_stats.node_count,
            solved_ratio = tree_stats.solved_ratio(),
            ?status,
            value = best.as_ref().map(|(_, v)| *v),
            "MCTS search complete"
        );

        let (action, value) = match best {
            Some((action, value)) => (Some(action), Some(value)),
            None => (None, None),
        };
        Ok(MctsResult {
            action,
            value,
            status,
        })
    }

    // === Move Choice ===

    /// Best visited root action by solved value, else mean score. Ties keep
    /// the earliest action.
    #[must_use]
    pub fn best_action(&self) -> Option<(M::Action, f64)> {
        let mut best: Option<(NodeId, f64)> = None;

        for (id, child) in self.tree.children(self.tree.root()) {
            if child.visits == 0 {
                continue;
            }
            let value = child.utility();
            if best.map_or(true, |(_, b)| value > b) {
                best = Some((id, value));
            }
        }

        best.and_then(|(id, value)| {
            self.tree
                .get(id)
                .incoming_action
                .clone()
                .map(|action| (action, value))
        })
    }

    /// Visits and utilities of every root action.
    pub fn root_children(&self) -> Vec<RootChild<M::Action>> {
        self.tree
            .children(self.tree.root())
            .filter_map(|(_, child)| {
                child.incoming_action.clone().map(|action| RootChild {
                    action,
                    visits: child.visits,
                    utility: child.utility(),
                    solved: child.is_solved(),
                })
            })
            .collect()
    }
}
