//! Top-level move choice: run the configured strategy against a deadline
//! and always come back with a legal action.

use std::time::Instant;

use tracing::{info, warn};

use crate::core::{
    DeadlineClock, RoleId, RulesError, SearchContext, SearchError, SearchRng, SearchStatus,
};
use crate::mcts::{MctsConfig, MctsSearch};
use crate::minimax::{CompulsiveSearch, MinimaxSearch};
use crate::rules::StateMachine;

use super::config::StrategyConfig;

/// How a decision was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionSource {
    /// The role had exactly one legal action; nothing was searched.
    OnlyMove,
    /// The strategy produced the action.
    Strategy,
    /// The strategy failed or produced nothing; first legal action used.
    Fallback,
}

/// A chosen action plus how it was chosen.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision<A> {
    pub action: A,
    pub source: DecisionSource,
    /// Why the search stopped, for searching strategies.
    pub status: Option<SearchStatus>,
    pub elapsed_us: u64,
}

/// MCTS settings for one decision: a fresh playout stream per call, still
/// reproducible from the player's seed.
fn decision_mcts_config(config: &MctsConfig, rng: &mut SearchRng) -> MctsConfig {
    config.clone().with_seed(rng.fork().seed())
}

type Outcome<A> = Result<(Option<A>, Option<SearchStatus>), RulesError>;

fn run_strategy<M: StateMachine>(
    strategy: &StrategyConfig,
    machine: &M,
    role: RoleId,
    state: &M::State,
    legal: &[M::Action],
    ctx: &mut SearchContext,
    rng: &mut SearchRng,
) -> Outcome<M::Action> {
    match strategy {
        StrategyConfig::Legal => Ok((legal.first().cloned(), None)),
        StrategyConfig::Random => Ok((rng.choose(legal).cloned(), None)),
        StrategyConfig::Minimax(config) => {
            let result = if machine.opponents(role).is_empty() {
                CompulsiveSearch::new(machine, role, config.clone()).search(ctx, state)?
            } else {
                MinimaxSearch::new(machine, role, config.clone()).iterative_deepening(ctx, state)?
            };
            Ok((result.action, Some(result.status)))
        }
        StrategyConfig::Mcts(config) => {
            let config = decision_mcts_config(config, rng);
            let result = MctsSearch::new(machine, role, state.clone(), config).run(ctx)?;
            Ok((result.action, Some(result.status)))
        }
    }
}

/// Choose an action for `role` in `state` before `clock` runs out.
///
/// Only a failure to list the role's own legal actions is an error. Any
/// failure inside the search is logged and answered with the first legal
/// action.
pub fn choose_action<M: StateMachine>(
    strategy: &StrategyConfig,
    machine: &M,
    role: RoleId,
    state: &M::State,
    clock: DeadlineClock,
    rng: &mut SearchRng,
) -> Result<Decision<M::Action>, SearchError> {
    let start = Instant::now();

    let legal = machine.legal_actions(role, state)?;
    let Some(first) = legal.first().cloned() else {
        return Err(RulesError::NoLegalActions(role).into());
    };

    if legal.len() == 1 {
        return Ok(Decision {
            action: first,
            source: DecisionSource::OnlyMove,
            status: None,
            elapsed_us: start.elapsed().as_micros() as u64,
        });
    }

    let mut ctx = SearchContext::new(clock);
    let outcome = run_strategy(strategy, machine, role, state, &legal, &mut ctx, rng);

    let (action, source, status) = match outcome {
        Ok((Some(action), status)) if legal.contains(&action) => {
            (action, DecisionSource::Strategy, status)
        }
        Ok((Some(action), status)) => {
            warn!(%role, ?action, "Strategy returned an illegal action, using first legal");
            (first, DecisionSource::Fallback, status)
        }
        Ok((None, status)) => (first, DecisionSource::Fallback, status),
        Err(err) => {
            warn!(%role, error = %err, "Search failed, using first legal action");
            (first, DecisionSource::Fallback, None)
        }
    };

    let elapsed_us = start.elapsed().as_micros() as u64;
    info!(
        %role,
        strategy = strategy.name(),
        ?action,
        ?source,
        ?status,
        elapsed_us,
        "Action selected"
    );

    Ok(Decision {
        action,
        source,
        status,
        elapsed_us,
    })
}
