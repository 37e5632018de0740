//! Iterative-deepening alpha-beta search for two-sided games.
//!
//! The agent maximizes; all other roles act together as one minimizing
//! coalition whose joint reply is enumerated with
//! [`StateMachine::legal_joint_continuations`]. With a single opponent this
//! is exact two-player minimax.
//!
//! One depth step is one joint move: the agent's action (a noop when it is
//! not in control) together with the opponents' reply. A round with depth
//! limit `d` scores positions `d` joint moves ahead with the static
//! evaluation. Rounds run with `d = 1, 2, ...` until the deadline,
//! and only fully completed rounds contribute a move.

use std::time::Instant;

use tracing::debug;

use crate::core::{RoleId, RulesError, SearchContext, SearchStatus, MAX_REWARD, MIN_REWARD};
use crate::rules::StateMachine;

use super::config::MinimaxConfig;
use super::eval::evaluate;
use super::stats::MinimaxStats;

/// Outcome of a minimax decision.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimaxResult<A> {
    /// Best root action, `None` if no round completed.
    pub action: Option<A>,

    /// Value of `action` as computed by its round.
    pub score: Option<u8>,

    /// Depth limit of the round that produced `action`.
    pub depth: u32,

    pub status: SearchStatus,
}

/// A root action with the states the opponents can answer it with.
#[derive(Clone, Debug)]
pub struct FrontierEntry<S, A> {
    pub action: A,
    pub successors: Vec<S>,
}

/// Depth-limited alpha-beta searcher for one role.
pub struct MinimaxSearch<'m, M: StateMachine> {
    machine: &'m M,
    role: RoleId,
    config: MinimaxConfig,
    stats: MinimaxStats,
    /// Set when the current round scored a position at its depth limit.
    hit_depth_limit: bool,
}

impl<'m, M: StateMachine> MinimaxSearch<'m, M> {
    pub fn new(machine: &'m M, role: RoleId, config: MinimaxConfig) -> Self {
        Self {
            machine,
            role,
            config,
            stats: MinimaxStats::default(),
            hit_depth_limit: false,
        }
    }

    #[must_use]
    pub fn stats(&self) -> &MinimaxStats {
        &self.stats
    }

    #[must_use]
    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    /// Child window: the caller's bounds with pruning, the full range without.
    fn window(&self, alpha: u8, beta: u8) -> (u8, u8) {
        if self.config.pruning {
            (alpha, beta)
        } else {
            (MIN_REWARD, MAX_REWARD)
        }
    }

    /// Value of `state` with the agent to choose.
    pub fn max_score(
        &mut self,
        ctx: &mut SearchContext,
        state: &M::State,
        depth: u32,
        max_depth: u32,
        alpha: u8,
        beta: u8,
    ) -> Result<u8, RulesError> {
        self.stats.nodes_visited += 1;

        if self.machine.is_terminal(state) {
            return self.machine.reward(self.role, state);
        }
        // Polled before the depth test so leaves latch expiry too.
        if !ctx.has_time() {
            return evaluate(self.machine, self.role, state, self.config.heuristic);
        }
        if depth >= max_depth {
            self.hit_depth_limit = true;
            self.stats.depth_cutoffs += 1;
            return evaluate(self.machine, self.role, state, self.config.heuristic);
        }

        let mut alpha = alpha;
        for action in self.machine.legal_actions(self.role, state)? {
            let (a, b) = self.window(alpha, beta);
            let result = self.min_score(ctx, state, &action, depth, max_depth, a, b)?;
            alpha = alpha.max(result);

            if self.config.pruning && alpha >= beta {
                self.stats.prunes += 1;
                return Ok(beta);
            }
            if ctx.is_time_up() {
                break;
            }
        }

        Ok(alpha)
    }

    /// Value of the agent playing `action` in `state`, with the opponents
    /// choosing their joint reply.
    #[allow(clippy::too_many_arguments)]
    pub fn min_score(
        &mut self,
        ctx: &mut SearchContext,
        state: &M::State,
        action: &M::Action,
        depth: u32,
        max_depth: u32,
        alpha: u8,
        beta: u8,
    ) -> Result<u8, RulesError> {
        self.stats.nodes_visited += 1;

        let mut beta = beta;
        for joint in self
            .machine
            .legal_joint_continuations(self.role, action, state)?
        {
            let next = self.machine.next_state(state, &joint)?;
            let (a, b) = self.window(alpha, beta);
            let result = self.max_score(ctx, &next, depth + 1, max_depth, a, b)?;
            beta = beta.min(result);

            if self.config.pruning && beta <= alpha {
                self.stats.prunes += 1;
                return Ok(alpha);
            }
            if ctx.is_time_up() {
                break;
            }
        }

        Ok(beta)
    }

    /// Root actions paired with every state the opponents can answer with.
    pub fn build_frontier(
        &mut self,
        state: &M::State,
    ) -> Result<Vec<FrontierEntry<M::State, M::Action>>, RulesError> {
        let actions = self.machine.legal_actions(self.role, state)?;
        if actions.is_empty() {
            return Err(RulesError::NoLegalActions(self.role));
        }

        let mut frontier = Vec::with_capacity(actions.len());
        for action in actions {
            let joints = self
                .machine
                .legal_joint_continuations(self.role, &action, state)?;
            let mut successors = Vec::with_capacity(joints.len());
            for joint in &joints {
                successors.push(self.machine.next_state(state, joint)?);
            }
            frontier.push(FrontierEntry { action, successors });
        }
        Ok(frontier)
    }

    /// One depth-limited pass over a root frontier. Returns the index of the
    /// best entry and its value; ties keep the earliest entry.
    pub fn search_frontier(
        &mut self,
        ctx: &mut SearchContext,
        frontier: &[FrontierEntry<M::State, M::Action>],
        max_depth: u32,
    ) -> Result<Option<(usize, u8)>, RulesError> {
        let mut best: Option<(usize, u8)> = None;

        for (index, entry) in frontier.iter().enumerate() {
            let alpha = match best {
                Some((_, score)) if self.config.pruning => score,
                _ => MIN_REWARD,
            };

            self.stats.nodes_visited += 1;
            let mut score = MAX_REWARD;
            for next in &entry.successors {
                let (a, b) = self.window(alpha, score);
                let result = self.max_score(ctx, next, 1, max_depth, a, b)?;
                score = score.min(result);

                if self.config.pruning && score <= alpha {
                    self.stats.prunes += 1;
                    break;
                }
                if ctx.is_time_up() {
                    break;
                }
            }

            if best.map_or(true, |(_, b)| score > b) {
                best = Some((index, score));
            }
            if score == MAX_REWARD || ctx.is_time_up() {
                break;
            }
        }

        Ok(best)
    }

    /// Best action from `state` found by a single round at `max_depth`.
    pub fn search_depth(
        &mut self,
        ctx: &mut SearchContext,
        state: &M::State,
        max_depth: u32,
    ) -> Result<Option<(M::Action, u8)>, RulesError> {
        let frontier = self.build_frontier(state)?;
        Ok(self
            .search_frontier(ctx, &frontier, max_depth)?
            .map(|(index, score)| (frontier[index].action.clone(), score)))
    }

    /// Deepen until the deadline, a proven win, an exhausted tree or the
    /// configured depth cap.
    pub fn iterative_deepening(
        &mut self,
        ctx: &mut SearchContext,
        state: &M::State,
    ) -> Result<MinimaxResult<M::Action>, RulesError> {
        let start = Instant::now();
        self.stats.reset();

        let mut frontier = self.build_frontier(state)?;
        let mut result = MinimaxResult {
            action: None,
            score: None,
            depth: 0,
            status: SearchStatus::TimeExpired,
        };

        let mut depth = 1;
        loop {
            if !ctx.has_time() {
                result.status = SearchStatus::TimeExpired;
                break;
            }
            if !self.config.cache_root_frontier && depth > 1 {
                frontier = self.build_frontier(state)?;
            }

            self.hit_depth_limit = false;
            let round = self.search_frontier(ctx, &frontier, depth)?;

            if ctx.is_time_up() {
                debug!(depth, "Minimax round interrupted, result discarded");
                result.status = SearchStatus::TimeExpired;
                break;
            }

            let Some((index, score)) = round else {
                break;
            };
            result.action = Some(frontier[index].action.clone());
            result.score = Some(score);
            result.depth = depth;
            self.stats.rounds_completed += 1;
            self.stats.completed_depth = depth;

            debug!(
                depth,
                score,
                action = ?frontier[index].action,
                nodes = self.stats.nodes_visited,
                "Minimax round complete"
            );

            if score == MAX_REWARD || !self.hit_depth_limit {
                result.status = SearchStatus::Solved;
                break;
            }
            if self.config.max_depth != 0 && depth >= self.config.max_depth {
                result.status = SearchStatus::Completed;
                break;
            }
            depth += 1;
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            depth = result.depth,
            rounds = self.stats.rounds_completed,
            nodes_per_sec = self.stats.nodes_per_second(),
            status = ?result.status,
            "Minimax search complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DeadlineClock;
    use crate::games::tictactoe::{Cell, TicTacToe, TttAction, TttState};
    use crate::minimax::config::Heuristic;

    fn ctx() -> SearchContext {
        SearchContext::new(DeadlineClock::unbounded())
    }

    fn forced_win_position() -> TttState {
        use Cell::{Empty as E, O, X};
        TttState::from_cells([X, E, X, O, O, E, E, E, E], true)
    }

    #[test]
    fn test_depth_one_finds_immediate_win() {
        let game = TicTacToe::new();
        let mut search = MinimaxSearch::new(&game, TicTacToe::X, MinimaxConfig::default());

        let found = search
            .search_depth(&mut ctx(), &forced_win_position(), 1)
            .unwrap();
        assert_eq!(found, Some((TttAction::Mark(1), 100)));
    }

    #[test]
    fn test_iterative_deepening_stops_on_win() {
        let game = TicTacToe::new();
        let mut search = MinimaxSearch::new(&game, TicTacToe::X, MinimaxConfig::default());

        let result = search
            .iterative_deepening(&mut ctx(), &forced_win_position())
            .unwrap();
        assert_eq!(result.action, Some(TttAction::Mark(1)));
        assert_eq!(result.score, Some(100));
        assert_eq!(result.depth, 1);
        assert_eq!(result.status, SearchStatus::Solved);
        assert_eq!(search.stats().rounds_completed, 1);
    }

    #[test]
    fn test_depth_cap() {
        let game = TicTacToe::new();
        let config = MinimaxConfig::default()
            .with_heuristic(Heuristic::Reward)
            .with_max_depth(2);
        let mut search = MinimaxSearch::new(&game, TicTacToe::X, config);

        let result = search
            .iterative_deepening(&mut ctx(), &game.initial_state())
            .unwrap();
        assert_eq!(result.status, SearchStatus::Completed);
        assert_eq!(result.depth, 2);
        assert!(search.stats().depth_cutoffs > 0);
    }

    #[test]
    fn test_expired_clock_completes_no_round() {
        let game = TicTacToe::new();
        let mut search = MinimaxSearch::new(&game, TicTacToe::X, MinimaxConfig::default());
        let mut expired = SearchContext::new(DeadlineClock::new(0, 0));

        let result = search
            .iterative_deepening(&mut expired, &game.initial_state())
            .unwrap();
        assert_eq!(result.action, None);
        assert_eq!(result.status, SearchStatus::TimeExpired);
    }

    #[test]
    fn test_frontier_cache_does_not_change_result() {
        let game = TicTacToe::new();
        use Cell::{Empty as E, O, X};
        let state = TttState::from_cells([X, O, E, E, E, E, E, E, E], true);

        let cached = MinimaxSearch::new(&game, TicTacToe::X, MinimaxConfig::default())
            .iterative_deepening(&mut ctx(), &state)
            .unwrap();
        let uncached = MinimaxSearch::new(
            &game,
            TicTacToe::X,
            MinimaxConfig::default().with_frontier_cache(false),
        )
        .iterative_deepening(&mut ctx(), &state)
        .unwrap();

        assert_eq!(cached, uncached);
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let game = TicTacToe::new();
        use Cell::{Empty as E, X};
        let state = TttState::from_cells([E, E, E, E, X, E, E, E, E], false);

        let mut pruned = MinimaxSearch::new(&game, TicTacToe::O, MinimaxConfig::default());
        let a = pruned.search_depth(&mut ctx(), &state, 4).unwrap();

        let mut plain = MinimaxSearch::new(
            &game,
            TicTacToe::O,
            MinimaxConfig::default().with_pruning(false),
        );
        let b = plain.search_depth(&mut ctx(), &state, 4).unwrap();

        assert_eq!(a, b);
        assert!(pruned.stats().nodes_visited < plain.stats().nodes_visited);
        assert!(pruned.stats().prunes > 0);
    }
}
