//! Legal action enumeration and action naming.
//!
//! Actions are the pit columns `0..MAX_ACTIONS`. While a bonus move is pending
//! every slot is played as the opponent's forced pass; the enumerated set lists
//! that pass once, as [`FORCED_PASS`] (the last slot).

use thiserror::Error;

use crate::constants::{FORCED_PASS, MAX_ACTIONS, PITS};
use crate::sowing::check_move;
use crate::state::{PendingBonus, State};

/// Error parsing an action name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionNameError {
    #[error("action name '{0}' is not a number")]
    NotANumber(String),
    #[error("action index {0} is out of range")]
    OutOfRange(usize),
}

/// Legal actions for the side to move, in ascending order.
pub fn legal_actions(state: &State) -> Vec<usize> {
    if state.pending == PendingBonus::Granted {
        return vec![FORCED_PASS];
    }
    let row = &state.board[state.turn.row()];
    (0..PITS).filter(|&col| row[col] != 0).collect()
}

/// Is `action` playable right now? Agrees with [`play_move`](crate::sowing::play_move).
#[inline]
pub fn is_legal(state: &State, action: usize) -> bool {
    check_move(state, action).is_ok()
}

/// Action index for a name such as `"3"`.
pub fn action_name_to_index(name: &str) -> Result<usize, ActionNameError> {
    let index: usize = name
        .trim()
        .parse()
        .map_err(|_| ActionNameError::NotANumber(name.to_string()))?;
    if index >= MAX_ACTIONS {
        return Err(ActionNameError::OutOfRange(index));
    }
    Ok(index)
}

/// Name of an action index (its decimal form).
pub fn action_index_to_name(index: usize) -> String {
    index.to_string()
}
