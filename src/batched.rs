//! Flat-buffer rules for lock-step batched simulation.
//!
//! These are the five operations a batched search drives, written as free
//! functions over caller-owned buffers so that many independent slots can run
//! the same step side by side. Nothing here touches [`State`](crate::state::State);
//! the two implementations are kept in agreement by the conformance tests.
//!
//! Buffers:
//! - `board`: [`BOARD_LEN`] stone counts, row-major, row 0 = side A.
//! - `extra_info`: [`EXTRA_INFO_LEN`] bytes, store A at [`EXTRA_STORE_A`],
//!   store B at [`EXTRA_STORE_B`], bonus flags at [`EXTRA_GRANTED`] and
//!   [`EXTRA_DISPLAY`]. The rest is reserved and stays zero.
//! - `turn`: +1 for side B, -1 for side A. The caller flips it after every
//!   `take_action*` call, forced passes included.
//! - `legal_actions_with_count`: [`LEGAL_BUFFER_LEN`] entries, actions in the
//!   leading entries and their count in the last one.

use tracing::trace;

use crate::constants::*;
use crate::rules::RuleSet;

#[inline]
fn player_row(turn: i8) -> usize {
    if turn == 1 { ROW_B } else { ROW_A }
}

#[inline]
fn store_slot(row: usize) -> usize {
    if row == ROW_B { EXTRA_STORE_B } else { EXTRA_STORE_A }
}

/// Every slot of the action space is the forced pass while a bonus is granted.
#[inline]
fn playable(board: &[i8], extra_info: &[i8], turn: i8, action: usize) -> bool {
    if action >= MAX_ACTIONS {
        return false;
    }
    extra_info[EXTRA_GRANTED] != 0 || board[player_row(turn) * PITS + action] > 0
}

/// Write whether `action` is legal into `legal_actions[action]`.
///
/// `legal_actions` holds one flag per slot of the action space ([`MAX_ACTIONS`]);
/// an `action` past its end has no flag and is left alone.
pub fn is_action_legal(
    board: &[i8],
    extra_info: &[i8],
    turn: i8,
    action: usize,
    legal_actions: &mut [bool],
) {
    if let Some(flag) = legal_actions.get_mut(action) {
        *flag = playable(board, extra_info, turn, action);
    }
}

/// Apply `action` for the side `turn` (expansion step).
///
/// Returns `false` and leaves every buffer untouched if the action is illegal.
/// While a bonus is granted the call is a forced pass, whichever slot of the
/// action space `action` names.
pub fn take_action(
    board: &mut [i8],
    extra_info: &mut [i8],
    turn: i8,
    action: usize,
    rules: RuleSet,
) -> bool {
    if !playable(board, extra_info, turn, action) {
        trace!(action, turn, "rejected illegal action");
        return false;
    }
    if extra_info[EXTRA_GRANTED] != 0 {
        extra_info[EXTRA_GRANTED] = 0;
        extra_info[EXTRA_DISPLAY] = 1;
        return true;
    }

    let own_row = player_row(turn);
    extra_info[EXTRA_DISPLAY] = 0;

    let store = store_slot(own_row);
    let mut stones = board[own_row * PITS + action];
    board[own_row * PITS + action] = 0;

    let mut row = own_row;
    let mut col = action as isize;
    while stones > 0 {
        col += if row == ROW_B { 1 } else { -1 };

        // Off the end of a row: own store if it is ours, then the other row.
        if col < 0 || col == PITS as isize {
            let leaving = row;
            row = 1 - row;
            col = if row == ROW_B { -1 } else { PITS as isize };
            if leaving == own_row {
                extra_info[store] += 1;
                stones -= 1;
                if stones == 0 && rules.bonus_turn() {
                    extra_info[EXTRA_GRANTED] = 1;
                }
            }
            continue;
        }

        let idx = row * PITS + col as usize;
        if stones == 1 && row == own_row && board[idx] == 0 {
            let mirror = (1 - row) * PITS + col as usize;
            if !rules.strict_capture() {
                extra_info[store] += board[mirror];
                board[mirror] = 0;
            } else if board[mirror] > 0 {
                extra_info[store] += board[mirror] + 1;
                board[mirror] = 0;
                break;
            }
        }
        board[idx] += 1;
        stones -= 1;
    }
    true
}

/// Fill `legal_actions_with_count` for a playout step.
///
/// The buffer doubles as a cache: it is only rescanned while its count is
/// zero. [`take_action_playout`] clears the count after every move.
pub fn legal_actions_playout(
    board: &[i8],
    extra_info: &[i8],
    turn: i8,
    legal_actions_with_count: &mut [i16],
) {
    let last = legal_actions_with_count.len() - 1;
    if legal_actions_with_count[last] != 0 {
        return;
    }

    let mut count = 0;
    if extra_info[EXTRA_GRANTED] != 0 {
        legal_actions_with_count[0] = FORCED_PASS as i16;
        count = 1;
    } else {
        let row = player_row(turn) * PITS;
        for j in 0..PITS {
            if board[row + j] > 0 {
                legal_actions_with_count[count] = j as i16;
                count += 1;
            }
        }
    }
    legal_actions_with_count[last] = count as i16;
}

/// Apply `action` during a playout.
///
/// `action_ord` (the position of `action` inside `legal_actions_with_count`)
/// is unused; it only keeps the signature of the batched playout interface.
/// Sowing changes too many pits for an incremental update, so the cached set
/// is simply invalidated.
pub fn take_action_playout(
    board: &mut [i8],
    extra_info: &mut [i8],
    turn: i8,
    action: usize,
    _action_ord: usize,
    legal_actions_with_count: &mut [i16],
    rules: RuleSet,
) -> bool {
    let taken = take_action(board, extra_info, turn, action, rules);
    if taken {
        let last = legal_actions_with_count.len() - 1;
        legal_actions_with_count[last] = 0;
    }
    taken
}

/// Outcome of the position: -1 (A wins), 0 (draw), 1 (B wins), or
/// [`OUTCOME_ONGOING`].
///
/// A finished position has the surviving row swept into its owner's store;
/// calling again sweeps nothing.
pub fn compute_outcome(
    board: &mut [i8],
    extra_info: &mut [i8],
    _turn: i8,
    _last_action: usize,
) -> i8 {
    let sum_a: i32 = board[ROW_A * PITS..ROW_A * PITS + PITS].iter().map(|&s| s as i32).sum();
    let sum_b: i32 = board[ROW_B * PITS..ROW_B * PITS + PITS].iter().map(|&s| s as i32).sum();

    let row = if sum_b == 0 {
        ROW_A
    } else if sum_a == 0 {
        ROW_B
    } else {
        return OUTCOME_ONGOING;
    };

    let store = store_slot(row);
    for pit in &mut board[row * PITS..row * PITS + PITS] {
        extra_info[store] += *pit;
        *pit = 0;
    }

    let (a, b) = (extra_info[EXTRA_STORE_A], extra_info[EXTRA_STORE_B]);
    if a > b {
        -1
    } else if b > a {
        1
    } else {
        0
    }
}
