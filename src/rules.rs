//! Rule variants.
//!
//! Two rule sets are in circulation for this board and they differ in ways that
//! change game results, so the choice is always explicit. Both the owned
//! [`State`](crate::state::State) and the flat-buffer functions in
//! [`batched`](crate::batched) take a [`RuleSet`].

use std::fmt;

use clap::ValueEnum;

/// Which capture and extra-turn rules apply.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum RuleSet {
    /// Last stone in the mover's own store earns a bonus move (implemented as a
    /// forced pass by the opponent). A capture needs a non-empty mirror pit and
    /// credits the mirror stones plus the landing stone.
    #[default]
    BonusTurn,
    /// No bonus move. A capture fires on every last stone landing in an empty
    /// own pit, moves only the mirror pit's stones (possibly none), and leaves
    /// the landing stone in place.
    Classic,
}

impl RuleSet {
    /// Does a last stone in the mover's store grant a bonus move?
    #[inline]
    pub fn bonus_turn(self) -> bool {
        matches!(self, RuleSet::BonusTurn)
    }

    /// Does a capture credit the landing stone and require something to steal?
    #[inline]
    pub fn strict_capture(self) -> bool {
        matches!(self, RuleSet::BonusTurn)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSet::BonusTurn => write!(f, "bonus-turn"),
            RuleSet::Classic => write!(f, "classic"),
        }
    }
}
