//! Move resolution: sowing, captures and the bonus-turn protocol.
//!
//! A move empties one of the mover's pits and drops its stones one at a time
//! along the circuit of holes reachable from that pit:
//!
//! ```text
//!            <- A sows this way
//!   [A]  | a0 a1 a2 a3 a4 a5 |
//!        | b0 b1 b2 b3 b4 b5 |  [B]
//!                  B sows this way ->
//! ```
//!
//! Leaving your own row passes through your own store and continues on the
//! opponent's row; the opponent's store is never filled by your sowing.

use thiserror::Error;

use crate::constants::{MAX_ACTIONS, PITS, ROW_A, ROW_B};
use crate::state::{PendingBonus, Side, State};

/// A move that may not be played in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Action index is outside the action space.
    #[error("illegal move: pit {action} is out of range")]
    OutOfRange { action: usize },
    /// The mover's pit holds no stones.
    #[error("illegal move: pit {action} is empty")]
    EmptyPit { action: usize },
}

/// What a successful [`play_move`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Played {
    /// Plain sowing, no capture.
    Sown,
    /// The last stone captured; `stones` went to the mover's store.
    Capture { stones: u8 },
    /// The last stone landed in the mover's store; the opponent must pass next.
    BonusTurn,
    /// The opponent's forced pass after a bonus move.
    ForcedPass,
}

/// A hole on the sowing circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hole {
    Pit { row: usize, col: usize },
    /// The mover's own store.
    Store,
}

/// Endless walk over the holes a mover sows into, starting after a pit.
#[derive(Debug, Clone)]
pub struct Circuit {
    mover: Side,
    last: Hole,
}

impl Circuit {
    pub fn new(mover: Side, pit: usize) -> Self {
        Circuit {
            mover,
            last: Hole::Pit {
                row: mover.row(),
                col: pit,
            },
        }
    }
}

impl Iterator for Circuit {
    type Item = Hole;

    fn next(&mut self) -> Option<Hole> {
        let next = match self.last {
            // After the store sowing continues on the opponent's row.
            Hole::Store => match self.mover {
                Side::A => Hole::Pit { row: ROW_B, col: 0 },
                Side::B => Hole::Pit { row: ROW_A, col: PITS - 1 },
            },
            Hole::Pit { row: ROW_B, col } if col + 1 < PITS => Hole::Pit {
                row: ROW_B,
                col: col + 1,
            },
            Hole::Pit { row: ROW_B, .. } if self.mover == Side::B => Hole::Store,
            Hole::Pit { row: ROW_B, .. } => Hole::Pit { row: ROW_A, col: PITS - 1 },
            Hole::Pit { col, .. } if col > 0 => Hole::Pit { row: ROW_A, col: col - 1 },
            Hole::Pit { .. } if self.mover == Side::A => Hole::Store,
            Hole::Pit { .. } => Hole::Pit { row: ROW_B, col: 0 },
        };
        self.last = next;
        Some(next)
    }
}

/// Check an action against the current position without changing it.
///
/// Accepts exactly what [`play_move`] accepts: while a bonus is granted every
/// slot of the action space is the forced pass.
pub fn check_move(state: &State, action: usize) -> Result<(), MoveError> {
    if action >= MAX_ACTIONS {
        return Err(MoveError::OutOfRange { action });
    }
    if state.pending == PendingBonus::Granted {
        return Ok(());
    }
    if state.board[state.turn.row()][action] == 0 {
        return Err(MoveError::EmptyPit { action });
    }
    Ok(())
}

/// Play `action` for the side to move.
///
/// While a bonus is granted the call is the opponent's forced pass, whichever
/// slot of the action space `action` names. Otherwise the pit is sown, captures and bonus moves
/// are resolved according to `state.rules`, and the turn passes.
///
/// # Errors
/// - [`MoveError::OutOfRange`] if `action` is outside the action space
/// - [`MoveError::EmptyPit`] if the mover's pit is empty
///
/// The state is left untouched on error.
pub fn play_move(state: &mut State, action: usize) -> Result<Played, MoveError> {
    if action >= MAX_ACTIONS {
        return Err(MoveError::OutOfRange { action });
    }
    if state.pending == PendingBonus::Granted {
        return Ok(forced_pass(state));
    }
    let mover = state.turn;
    let own_row = mover.row();
    let stones = state.board[own_row][action];
    if stones == 0 {
        return Err(MoveError::EmptyPit { action });
    }

    state.pending = PendingBonus::None;
    state.board[own_row][action] = 0;

    let mut played = Played::Sown;
    let last = stones as usize - 1;
    for (i, hole) in Circuit::new(mover, action).take(stones as usize).enumerate() {
        match hole {
            Hole::Store => {
                state.stores[own_row] += 1;
                if i == last && state.rules.bonus_turn() {
                    state.pending = PendingBonus::Granted;
                    played = Played::BonusTurn;
                }
            }
            Hole::Pit { row, col } => {
                if i == last && row == own_row && state.board[row][col] == 0 {
                    played = capture(state, own_row, col);
                } else {
                    state.board[row][col] += 1;
                }
            }
        }
    }

    state.turn = mover.opponent();
    Ok(played)
}

/// Resolve the last stone landing in the empty own pit `col`.
fn capture(state: &mut State, own_row: usize, col: usize) -> Played {
    let mirror_row = 1 - own_row;
    let mirror = state.board[mirror_row][col];

    if state.rules.strict_capture() {
        if mirror == 0 {
            state.board[own_row][col] = 1;
            return Played::Sown;
        }
        state.stores[own_row] += mirror + 1;
        state.board[mirror_row][col] = 0;
        state.board[own_row][col] = 0;
        return Played::Capture { stones: mirror + 1 };
    }

    // Classic rules steal whatever is opposite and keep the landing stone.
    state.stores[own_row] += mirror;
    state.board[mirror_row][col] = 0;
    state.board[own_row][col] = 1;
    Played::Capture { stones: mirror }
}

/// The opponent's turn after a bonus move: no stones move.
fn forced_pass(state: &mut State) -> Played {
    state.pending = PendingBonus::Display;
    state.turn = state.turn.opponent();
    Played::ForcedPass
}
