//! Terminal detection and final scoring.
//!
//! The game ends as soon as either row is empty. Whatever is left on the other
//! row is swept into that row owner's store, then the stores are compared.

use crate::constants::{OUTCOME_ONGOING, PITS};
use crate::state::{Side, State};

/// Result of evaluating a position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    WinA,
    WinB,
    Draw,
    Ongoing,
}

impl Outcome {
    /// Signed value from the maximizing player's (B's) perspective:
    /// -1, 0 or 1, and [`OUTCOME_ONGOING`] while the game continues.
    #[inline]
    pub fn value(self) -> i8 {
        match self {
            Outcome::WinA => -1,
            Outcome::Draw => 0,
            Outcome::WinB => 1,
            Outcome::Ongoing => OUTCOME_ONGOING,
        }
    }

    /// Inverse of [`Outcome::value`]. Anything outside {-1, 0, 1} is ongoing.
    #[inline]
    pub fn from_value(value: i8) -> Outcome {
        match value {
            -1 => Outcome::WinA,
            0 => Outcome::Draw,
            1 => Outcome::WinB,
            _ => Outcome::Ongoing,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    /// Compare final store totals.
    pub fn from_stores(stores: [u8; 2]) -> Outcome {
        match stores[0].cmp(&stores[1]) {
            std::cmp::Ordering::Greater => Outcome::WinA,
            std::cmp::Ordering::Less => Outcome::WinB,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Evaluate `state`, sweeping the remaining row into its owner's store if the
/// game is over.
///
/// Calling this again on a finished state sweeps nothing and returns the same
/// result.
pub fn evaluate(state: &mut State) -> Outcome {
    let swept = if state.row_total(Side::B) == 0 {
        Side::A
    } else if state.row_total(Side::A) == 0 {
        Side::B
    } else {
        return Outcome::Ongoing;
    };

    let row = swept.row();
    let remaining: u8 = state.board[row].iter().sum();
    state.stores[row] += remaining;
    state.board[row] = [0; PITS];

    Outcome::from_stores(state.stores)
}
