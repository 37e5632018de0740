//! Depth-first maximization for games where the agent has no opponents.
//!
//! Every successor is explored until a terminal state, the optional depth
//! limit or the deadline. A reward of 100 ends the search at once.

use std::time::Instant;

use tracing::debug;

use crate::core::{RoleId, RulesError, SearchContext, SearchStatus, MAX_REWARD, MIN_REWARD};
use crate::rules::StateMachine;

use super::config::MinimaxConfig;
use super::eval::evaluate;
use super::search::MinimaxResult;
use super::stats::MinimaxStats;

pub struct CompulsiveSearch<'m, M: StateMachine> {
    machine: &'m M,
    role: RoleId,
    config: MinimaxConfig,
    stats: MinimaxStats,
}

impl<'m, M: StateMachine> CompulsiveSearch<'m, M> {
    pub fn new(machine: &'m M, role: RoleId, config: MinimaxConfig) -> Self {
        Self {
            machine,
            role,
            config,
            stats: MinimaxStats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> &MinimaxStats {
        &self.stats
    }

    /// Best value reachable from `state`.
    pub fn max_score(
        &mut self,
        ctx: &mut SearchContext,
        state: &M::State,
        depth: u32,
    ) -> Result<u8, RulesError> {
        self.stats.nodes_visited += 1;

        if self.machine.is_terminal(state) {
            return self.machine.reward(self.role, state);
        }
        if !ctx.has_time() {
            return evaluate(self.machine, self.role, state, self.config.heuristic);
        }
        let limit = self.config.compulsive_depth_limit;
        if limit != 0 && depth >= limit {
            self.stats.depth_cutoffs += 1;
            return evaluate(self.machine, self.role, state, self.config.heuristic);
        }

        let mut best = MIN_REWARD;
        for action in self.machine.legal_actions(self.role, state)? {
            let score = self.action_score(ctx, state, &action, depth)?;
            best = best.max(score);
            if best == MAX_REWARD || ctx.is_time_up() {
                break;
            }
        }
        Ok(best)
    }

    fn action_score(
        &mut self,
        ctx: &mut SearchContext,
        state: &M::State,
        action: &M::Action,
        depth: u32,
    ) -> Result<u8, RulesError> {
        let mut best = MIN_REWARD;
        for joint in self
            .machine
            .legal_joint_continuations(self.role, action, state)?
        {
            let next = self.machine.next_state(state, &joint)?;
            best = best.max(self.max_score(ctx, &next, depth + 1)?);
            if best == MAX_REWARD || ctx.is_time_up() {
                break;
            }
        }
        Ok(best)
    }

    /// Best root action. Always yields an action: the first legal one
    /// unless a later one scores strictly better.
    pub fn search(
        &mut self,
        ctx: &mut SearchContext,
        state: &M::State,
    ) -> Result<MinimaxResult<M::Action>, RulesError> {
        let start = Instant::now();
        self.stats.reset();

        let actions = self.machine.legal_actions(self.role, state)?;
        let Some(first) = actions.first().cloned() else {
            return Err(RulesError::NoLegalActions(self.role));
        };

        let mut best_action = first;
        let mut best_score = MIN_REWARD;
        let mut status = SearchStatus::Completed;

        for action in actions {
            let score = self.action_score(ctx, state, &action, 0)?;
            if score > best_score {
                best_score = score;
                best_action = action;
            }
            if best_score == MAX_REWARD {
                status = SearchStatus::Solved;
                break;
            }
            if ctx.is_time_up() {
                status = SearchStatus::TimeExpired;
                break;
            }
        }

        self.stats.rounds_completed = 1;
        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            score = best_score,
            action = ?best_action,
            nodes = self.stats.nodes_visited,
            nodes_per_sec = self.stats.nodes_per_second(),
            ?status,
            "Compulsive search complete"
        );

        Ok(MinimaxResult {
            action: Some(best_action),
            score: Some(best_score),
            depth: self.config.compulsive_depth_limit,
            status,
        })
    }
}
