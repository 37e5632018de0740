//! Minimax integration tests on tic-tac-toe, the buttons puzzle and random
//! game trees.

mod common;

use std::time::{Duration, Instant};

use common::{tree_games, SlowGame, TreeAction};
use ggp_search::core::{DeadlineClock, RoleId, SearchContext, SearchStatus};
use ggp_search::games::tictactoe::{Cell, TicTacToe, TttAction, TttState};
use ggp_search::games::{Button, ButtonsAndLights};
use ggp_search::minimax::{CompulsiveSearch, Heuristic, MinimaxConfig, MinimaxSearch};
use ggp_search::rules::StateMachine;
use proptest::prelude::*;

fn unbounded() -> SearchContext {
    SearchContext::new(DeadlineClock::unbounded())
}

// =============================================================================
// Tic-tac-toe
// =============================================================================

#[test]
fn test_opening_is_a_draw_with_perfect_play() {
    let game = TicTacToe::new();
    let mut search = MinimaxSearch::new(&game, TicTacToe::X, MinimaxConfig::default());

    let result = search
        .iterative_deepening(&mut unbounded(), &game.initial_state())
        .unwrap();

    assert_eq!(result.score, Some(50));
    assert_eq!(result.status, SearchStatus::Solved);
    assert!(matches!(result.action, Some(TttAction::Mark(_))));
}

#[test]
fn test_forced_win_scores_100() {
    use Cell::{Empty as E, O, X};
    let game = TicTacToe::new();
    let state = TttState::from_cells([X, E, X, O, O, E, E, E, E], true);
    let mut search = MinimaxSearch::new(&game, TicTacToe::X, MinimaxConfig::default());

    let result = search.iterative_deepening(&mut unbounded(), &state).unwrap();

    assert_eq!(result.action, Some(TttAction::Mark(1)));
    assert_eq!(result.score, Some(100));
}

#[test]
fn test_blocks_immediate_threat() {
    use Cell::{Empty as E, O, X};
    let game = TicTacToe::new();
    // X threatens 0-1-2; O must take square 2.
    let state = TttState::from_cells([X, X, E, E, O, E, E, E, E], false);
    let mut search = MinimaxSearch::new(&game, TicTacToe::O, MinimaxConfig::default());

    let result = search.iterative_deepening(&mut unbounded(), &state).unwrap();

    assert_eq!(result.action, Some(TttAction::Mark(2)));
    assert!(result.score.unwrap() > 0);
}

#[test]
fn test_o_perspective_of_lost_position() {
    use Cell::{Empty as E, O, X};
    let game = TicTacToe::new();
    // X to move with a win on square 1: O's value is 0 whatever it does.
    let state = TttState::from_cells([X, E, X, O, O, E, E, E, E], true);
    let mut search = MinimaxSearch::new(&game, TicTacToe::O, MinimaxConfig::default());

    let result = search.iterative_deepening(&mut unbounded(), &state).unwrap();

    assert_eq!(result.action, Some(TttAction::Noop));
    assert_eq!(result.score, Some(0));
}

#[test]
fn test_stats_are_collected() {
    let game = TicTacToe::new();
    let config = MinimaxConfig::default().with_max_depth(3);
    let mut search = MinimaxSearch::new(&game, TicTacToe::X, config);

    search
        .iterative_deepening(&mut unbounded(), &game.initial_state())
        .unwrap();

    let stats = search.stats();
    assert_eq!(stats.rounds_completed, 3);
    assert_eq!(stats.completed_depth, 3);
    assert!(stats.nodes_visited > 0);
}

// =============================================================================
// Compulsive search
// =============================================================================

#[test]
fn test_compulsive_prefers_full_reward() {
    let game = ButtonsAndLights::new();
    let mut search = CompulsiveSearch::new(
        &game,
        ButtonsAndLights::PLAYER,
        MinimaxConfig::default().with_heuristic(Heuristic::Reward),
    );

    let result = search.search(&mut unbounded(), &game.initial_state()).unwrap();

    assert_eq!(result.score, Some(100));
    assert_eq!(result.action, Some(Button::A));
}

// =============================================================================
// Deadlines that expire mid-search
// =============================================================================

// A transition already past its clock poll may begin on the expiry tick,
// so at most one late transition is tolerated.
const LATE_CALL_ALLOWANCE: u32 = 1;

#[test]
fn test_compulsive_unwinds_at_deadline() {
    let game = SlowGame::new(1, 40, 6, Duration::from_millis(1));
    let clock = DeadlineClock::after(Duration::from_millis(30), 0);
    game.arm(clock.deadline_ms());

    let mut search = CompulsiveSearch::new(&game, RoleId::new(0), MinimaxConfig::default());
    let started = Instant::now();
    let result = search
        .search(&mut SearchContext::new(clock), &game.initial_state())
        .unwrap();

    assert!(game.late_calls() <= LATE_CALL_ALLOWANCE, "late calls: {}", game.late_calls());
    assert!(started.elapsed() < Duration::from_millis(100));
    assert_eq!(result.status, SearchStatus::TimeExpired);
    assert!(matches!(result.action, Some(TreeAction::Branch(_))));
}

#[test]
fn test_interrupted_round_is_discarded() {
    let game = SlowGame::new(2, 6, 8, Duration::from_millis(1));
    let state = game.initial_state();
    let clock = DeadlineClock::after(Duration::from_millis(150), 0);
    game.arm(clock.deadline_ms());

    let mut search = MinimaxSearch::new(&game, RoleId::new(0), MinimaxConfig::default());
    let started = Instant::now();
    let result = search
        .iterative_deepening(&mut SearchContext::new(clock), &state)
        .unwrap();
    let elapsed = started.elapsed();
    let late = game.late_calls();
    game.disarm();

    assert!(late <= LATE_CALL_ALLOWANCE, "late calls: {}", late);
    assert!(elapsed < Duration::from_millis(250));
    assert_eq!(result.status, SearchStatus::TimeExpired);
    assert!(result.depth >= 1);
    assert_eq!(result.depth, search.stats().completed_depth);
    assert_eq!(search.stats().rounds_completed, result.depth);

    // The answer is exactly what the last completed round computes on its
    // own, untouched by the interrupted deeper round.
    let mut replay = MinimaxSearch::new(&game, RoleId::new(0), MinimaxConfig::default());
    let expected = replay.search_depth(&mut unbounded(), &state, result.depth).unwrap();
    assert_eq!(expected.map(|(action, _)| action), result.action);
    assert_eq!(expected.map(|(_, score)| score), result.score);
}

// =============================================================================
// Properties over random game trees
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pruning_preserves_root_value(game in tree_games()) {
        let state = game.initial_state();

        let mut pruned = MinimaxSearch::new(&game, RoleId::new(0), MinimaxConfig::default());
        let mut plain = MinimaxSearch::new(
            &game,
            RoleId::new(0),
            MinimaxConfig::default().with_pruning(false),
        );

        let a = pruned.search_depth(&mut unbounded(), &state, 16).unwrap();
        let b = plain.search_depth(&mut unbounded(), &state, 16).unwrap();

        prop_assert_eq!(a.clone(), b);
        prop_assert_eq!(a.map(|(_, score)| score), Some(game.minimax_value()));
        prop_assert!(pruned.stats().nodes_visited <= plain.stats().nodes_visited);
    }

    #[test]
    fn prop_deepening_reaches_exact_value(game in tree_games()) {
        let mut search = MinimaxSearch::new(&game, RoleId::new(0), MinimaxConfig::default());

        let result = search
            .iterative_deepening(&mut unbounded(), &game.initial_state())
            .unwrap();

        prop_assert_eq!(result.status, SearchStatus::Solved);
        prop_assert_eq!(result.score, Some(game.minimax_value()));
        prop_assert!(matches!(result.action, Some(TreeAction::Branch(_))));
    }
}
