//! Conformance between the owned state and the flat-buffer rules.
//!
//! Seeded random games are replayed through both implementations and the
//! positions, legal sets and outcomes are compared after every call.

use fastrand::Rng;

use kalah_mcts::actions::{is_legal, legal_actions};
use kalah_mcts::batched::{
    compute_outcome, is_action_legal, legal_actions_playout, take_action, take_action_playout,
};
use kalah_mcts::constants::{
    BOARD_LEN, EXTRA_DISPLAY, EXTRA_GRANTED, EXTRA_INFO_LEN, FORCED_PASS, LEGAL_BUFFER_LEN,
    MAX_ACTIONS, OUTCOME_ONGOING, PITS,
};
use kalah_mcts::outcome::{Outcome, evaluate};
use kalah_mcts::playout::{BatchPlayout, PlayoutSlot, random_playout};
use kalah_mcts::rules::RuleSet;
use kalah_mcts::sowing::play_move;
use kalah_mcts::state::{PendingBonus, State};

const RULE_SETS: [RuleSet; 2] = [RuleSet::BonusTurn, RuleSet::Classic];

// =============================================================================
// Helper functions
// =============================================================================

struct Flat {
    board: [i8; BOARD_LEN],
    extra: [i8; EXTRA_INFO_LEN],
    legal: [i16; LEGAL_BUFFER_LEN],
    turn: i8,
}

impl Flat {
    fn from_state(state: &State) -> Self {
        Flat {
            board: state.board_buffer(),
            extra: state.extra_info(),
            legal: [0; LEGAL_BUFFER_LEN],
            turn: state.turn.sign(),
        }
    }

    fn to_state(&self, rules: RuleSet) -> State {
        State::from_buffers(&self.board, &self.extra, self.turn, rules)
    }

    fn legal_list(&mut self) -> Vec<usize> {
        legal_actions_playout(&self.board, &self.extra, self.turn, &mut self.legal);
        let count = self.legal[LEGAL_BUFFER_LEN - 1] as usize;
        self.legal[..count].iter().map(|&a| a as usize).collect()
    }
}

// =============================================================================
// Move by move
// =============================================================================

#[test]
fn test_random_games_agree_move_by_move() {
    for rules in RULE_SETS {
        for seed in 0..300 {
            let mut rng = Rng::with_seed(seed);
            let mut state = State::with_rules(rules);
            let mut flat = Flat::from_state(&state);
            let mut last_action = 0;

            loop {
                let outcome = evaluate(&mut state);
                let value =
                    compute_outcome(&mut flat.board, &mut flat.extra, flat.turn, last_action);
                assert_eq!(outcome.value(), value, "{rules} seed {seed}");
                assert_eq!(flat.to_state(rules), state, "{rules} seed {seed}");
                if outcome.is_terminal() {
                    break;
                }

                let actions = legal_actions(&state);
                assert_eq!(flat.legal_list(), actions, "{rules} seed {seed}");

                let ord = rng.usize(..actions.len());
                let action = actions[ord];
                play_move(&mut state, action).unwrap();
                assert!(take_action_playout(
                    &mut flat.board,
                    &mut flat.extra,
                    flat.turn,
                    action,
                    ord,
                    &mut flat.legal,
                    rules,
                ));
                flat.turn = -flat.turn;
                last_action = action;
            }
        }
    }
}

#[test]
fn test_legality_flags_agree() {
    for seed in 0..100 {
        let mut rng = Rng::with_seed(seed);
        let mut state = State::new();
        while !evaluate(&mut state).is_terminal() {
            let board = state.board_buffer();
            let extra = state.extra_info();
            let mut flags = [false; MAX_ACTIONS];
            for action in 0..MAX_ACTIONS {
                is_action_legal(&board, &extra, state.turn.sign(), action, &mut flags);
                assert_eq!(flags[action], is_legal(&state, action), "seed {seed}\n{state}");
            }

            let actions = legal_actions(&state);
            play_move(&mut state, actions[rng.usize(..actions.len())]).unwrap();
        }
    }
}

#[test]
fn test_expansion_children_agree() {
    for rules in RULE_SETS {
        for seed in 0..100 {
            let mut rng = Rng::with_seed(seed);
            let mut state = State::with_rules(rules);
            while !evaluate(&mut state).is_terminal() {
                for action in 0..=MAX_ACTIONS {
                    let mut board = state.board_buffer();
                    let mut extra = state.extra_info();
                    let turn = state.turn.sign();
                    let taken = take_action(&mut board, &mut extra, turn, action, rules);
                    let child = state.child(action);
                    assert_eq!(is_legal(&state, action), child.is_ok(), "{rules} seed {seed}");
                    match child {
                        Ok(child) => {
                            assert!(taken, "{rules} seed {seed} action {action}");
                            let turn = child.turn.sign();
                            assert_eq!(State::from_buffers(&board, &extra, turn, rules), child);
                        }
                        Err(_) => {
                            assert!(!taken, "{rules} seed {seed} action {action}");
                            assert_eq!(board, state.board_buffer());
                            assert_eq!(extra, state.extra_info());
                        }
                    }
                }

                let actions = legal_actions(&state);
                play_move(&mut state, actions[rng.usize(..actions.len())]).unwrap();
            }
        }
    }
}

// =============================================================================
// Bonus flags
// =============================================================================

#[test]
fn test_bonus_flags_in_extra_info() {
    let mut state = State::new();
    state.board[0] = [1, 1, 3, 1, 1, 1];
    state.board[1] = [1, 1, 1, 1, 1, 1];
    let mut flat = Flat::from_state(&state);

    // Three stones from A's pit 2 end in A's store.
    assert!(take_action(&mut flat.board, &mut flat.extra, flat.turn, 2, RuleSet::BonusTurn));
    assert_eq!(flat.extra[EXTRA_GRANTED], 1);
    assert_eq!(flat.extra[EXTRA_DISPLAY], 0);
    flat.turn = -flat.turn;

    assert_eq!(flat.legal_list(), vec![FORCED_PASS]);
    let board = flat.board;
    assert!(take_action(&mut flat.board, &mut flat.extra, flat.turn, 4, RuleSet::BonusTurn));
    assert_eq!(flat.board, board);
    assert_eq!(flat.extra[EXTRA_GRANTED], 0);
    assert_eq!(flat.extra[EXTRA_DISPLAY], 1);
    flat.turn = -flat.turn;

    let restored = flat.to_state(RuleSet::BonusTurn);
    assert_eq!(restored.pending, PendingBonus::Display);
    assert_eq!(restored.turn, state.turn);
}

#[test]
fn test_granted_bonus_flags_cover_action_space() {
    let mut state = State::new();
    state.board[0] = [1, 1, 1, 4, 1, 1];
    play_move(&mut state, 3).unwrap();
    assert_eq!(state.pending, PendingBonus::Granted);
    assert_eq!(evaluate(&mut state.clone()), Outcome::Ongoing);

    let board = state.board_buffer();
    let extra = state.extra_info();
    let mut flags = [false; MAX_ACTIONS];
    for action in 0..MAX_ACTIONS {
        is_action_legal(&board, &extra, state.turn.sign(), action, &mut flags);
    }
    assert!(flags.iter().any(|&legal| legal));
    assert!(flags[FORCED_PASS]);
    for action in 0..MAX_ACTIONS {
        assert_eq!(flags[action], is_legal(&state, action));
    }
}

#[test]
fn test_ongoing_sentinel() {
    let mut flat = Flat::from_state(&State::new());
    assert_eq!(compute_outcome(&mut flat.board, &mut flat.extra, flat.turn, 0), OUTCOME_ONGOING);
    assert_eq!(Outcome::from_value(OUTCOME_ONGOING), Outcome::Ongoing);
    assert!(flat.board.iter().all(|&pit| pit > 0));
    assert_eq!(flat.legal_list().len(), PITS);
}

// =============================================================================
// Playouts
// =============================================================================

#[test]
fn test_batch_matches_sequential_playouts() {
    for rules in RULE_SETS {
        let root = State::with_rules(rules);
        let mut batch = BatchPlayout::new(&root, 128, 1000);
        let summary = batch.run();
        assert_eq!(summary.wins_a + summary.wins_b + summary.draws, 128);

        for (i, slot) in batch.slots().iter().enumerate() {
            let mut state = root.clone();
            let outcome = random_playout(&mut state, &mut Rng::with_seed(1000 + i as u64));
            assert_eq!(slot.outcome(), outcome, "{rules} slot {i}");
            assert_eq!(slot.state(), state, "{rules} slot {i}");
        }
    }
}

#[test]
fn test_slot_from_midgame_position() {
    let mut rng = Rng::with_seed(5);
    let mut root = State::new();
    for _ in 0..6 {
        let actions = legal_actions(&root);
        play_move(&mut root, actions[rng.usize(..actions.len())]).unwrap();
    }
    if evaluate(&mut root).is_terminal() {
        return;
    }

    let mut slot = PlayoutSlot::new(&root, 42);
    assert_eq!(slot.state(), root);
    while !slot.is_finished() {
        slot.step();
    }

    let mut state = root.clone();
    assert_eq!(random_playout(&mut state, &mut Rng::with_seed(42)), slot.outcome());
    assert_eq!(slot.state(), state);
}
