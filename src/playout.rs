//! Random playouts (uniform random play until the game ends).
//!
//! Two drivers share the same protocol (legal set, uniform pick, apply,
//! evaluate):
//! - [`random_playout`] walks an owned [`State`] one move at a time.
//! - [`BatchPlayout`] keeps many independent [`PlayoutSlot`]s in flat buffers
//!   and advances all unfinished slots one move per lock-step pass, with the
//!   slots of a pass spread over the rayon thread pool.
//!
//! Each game or slot carries its own seeded `fastrand::Rng`. A slot and a
//! sequential playout started from the same position with the same seed make
//! the same choices and finish in the same position.

use std::fmt;

use fastrand::Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::actions::legal_actions;
use crate::batched::{compute_outcome, legal_actions_playout, take_action_playout};
use crate::constants::{BOARD_LEN, EXTRA_INFO_LEN, LEGAL_BUFFER_LEN};
use crate::outcome::{Outcome, evaluate};
use crate::rules::RuleSet;
use crate::sowing::play_move;
use crate::state::State;

/// Play a uniformly chosen legal action. Returns the action, or `None` if
/// there was nothing to play.
pub fn play_random_move(state: &mut State, rng: &mut Rng) -> Option<usize> {
    let actions = legal_actions(state);
    if actions.is_empty() {
        return None;
    }
    let action = actions[rng.usize(..actions.len())];
    play_move(state, action).ok()?;
    Some(action)
}

/// Play random moves from `state` until the game is decided.
pub fn random_playout(state: &mut State, rng: &mut Rng) -> Outcome {
    loop {
        let outcome = evaluate(state);
        if outcome.is_terminal() || play_random_move(state, rng).is_none() {
            return outcome;
        }
    }
}

/// One independent playout in flat-buffer form.
#[derive(Clone, Debug)]
pub struct PlayoutSlot {
    board: [i8; BOARD_LEN],
    extra_info: [i8; EXTRA_INFO_LEN],
    legal: [i16; LEGAL_BUFFER_LEN],
    turn: i8,
    rules: RuleSet,
    rng: Rng,
    last_action: usize,
    moves: usize,
    outcome: i8,
}

impl PlayoutSlot {
    /// Start a playout from `root` with its own generator.
    pub fn new(root: &State, seed: u64) -> Self {
        let mut slot = PlayoutSlot {
            board: root.board_buffer(),
            extra_info: root.extra_info(),
            legal: [0; LEGAL_BUFFER_LEN],
            turn: root.turn.sign(),
            rules: root.rules,
            rng: Rng::with_seed(seed),
            last_action: 0,
            moves: 0,
            outcome: 0,
        };
        slot.outcome = compute_outcome(
            &mut slot.board,
            &mut slot.extra_info,
            slot.turn,
            slot.last_action,
        );
        slot
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        Outcome::from_value(self.outcome).is_terminal()
    }

    /// Advance by one move. Does nothing once the game is decided.
    pub fn step(&mut self) {
        if self.is_finished() {
            return;
        }
        legal_actions_playout(&self.board, &self.extra_info, self.turn, &mut self.legal);
        let count = self.legal[LEGAL_BUFFER_LEN - 1] as usize;
        if count == 0 {
            return;
        }

        let ord = self.rng.usize(..count);
        let action = self.legal[ord] as usize;
        take_action_playout(
            &mut self.board,
            &mut self.extra_info,
            self.turn,
            action,
            ord,
            &mut self.legal,
            self.rules,
        );
        self.turn = -self.turn;
        self.last_action = action;
        self.moves += 1;
        self.outcome = compute_outcome(
            &mut self.board,
            &mut self.extra_info,
            self.turn,
            self.last_action,
        );
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_value(self.outcome)
    }

    /// Moves played so far, forced passes included.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Current position as an owned state.
    pub fn state(&self) -> State {
        State::from_buffers(&self.board, &self.extra_info, self.turn, self.rules)
    }
}

/// Totals over a finished batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub wins_a: usize,
    pub wins_b: usize,
    pub draws: usize,
    /// Lock-step passes needed until every slot finished.
    pub passes: usize,
    /// Moves played over all slots.
    pub moves: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A wins {}, B wins {}, draws {} ({} moves in {} passes)",
            self.wins_a, self.wins_b, self.draws, self.moves, self.passes
        )
    }
}

/// Many playouts advanced in lock step.
pub struct BatchPlayout {
    slots: Vec<PlayoutSlot>,
}

impl BatchPlayout {
    /// `n_slots` playouts from `root`; slot `i` is seeded with `seed + i`.
    pub fn new(root: &State, n_slots: usize, seed: u64) -> Self {
        let slots = (0..n_slots)
            .map(|i| PlayoutSlot::new(root, seed.wrapping_add(i as u64)))
            .collect();
        Self { slots }
    }

    pub fn slots(&self) -> &[PlayoutSlot] {
        &self.slots
    }

    /// Run every slot to the end of its game.
    pub fn run(&mut self) -> BatchSummary {
        let mut passes = 0;
        loop {
            let active: usize = self
                .slots
                .par_iter_mut()
                .filter(|slot| !slot.is_finished())
                .map(|slot| {
                    slot.step();
                    1
                })
                .sum();
            if active == 0 {
                break;
            }
            passes += 1;
            debug!(pass = passes, active, "lock-step pass");
        }

        let mut summary = BatchSummary {
            passes,
            ..Default::default()
        };
        for slot in &self.slots {
            summary.moves += slot.moves();
            match slot.outcome() {
                Outcome::WinA => summary.wins_a += 1,
                Outcome::WinB => summary.wins_b += 1,
                Outcome::Draw => summary.draws += 1,
                Outcome::Ongoing => {}
            }
        }
        summary
    }
}
