//! Kalah position representation.
//!
//! A [`State`] owns its board, stores, side to move and bonus marker outright.
//! Branching a search node is copy-then-mutate: [`State::child`] clones the
//! parent and resolves the move on the clone, so siblings never observe each
//! other's updates.
//!
//! The flat snapshot helpers ([`State::board_buffer`], [`State::extra_info`],
//! [`State::from_buffers`]) translate to and from the byte layout used by
//! [`batched`](crate::batched). They only copy data; no rule logic is shared
//! between the two representations.

use std::fmt;

use crate::constants::*;
use crate::rules::RuleSet;
use crate::sowing::{MoveError, play_move};

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Owns row 0 and store 0. Minimizing player, sign -1.
    A,
    /// Owns row 1 and store 1. Maximizing player, sign +1.
    B,
}

impl Side {
    /// Board row (and store index) owned by this side.
    #[inline]
    pub fn row(self) -> usize {
        match self {
            Side::A => ROW_A,
            Side::B => ROW_B,
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Signed unit used by the flat-buffer contract: +1 for B, -1 for A.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Side::A => -1,
            Side::B => 1,
        }
    }

    /// Inverse of [`Side::sign`]. +1 maps to B, everything else to A.
    #[inline]
    pub fn from_sign(turn: i8) -> Side {
        if turn == 1 { Side::B } else { Side::A }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Progress of the extra-turn protocol.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PendingBonus {
    #[default]
    None,
    /// The last move ended in the mover's store; the next call is a forced pass.
    Granted,
    /// The forced pass was just taken; only affects rendering.
    Display,
}

/// A Kalah position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct State {
    /// Stones per pit: `board[ROW_A]` for side A, `board[ROW_B]` for side B.
    pub board: [[u8; PITS]; ROWS],
    /// Store totals, indexed by [`Side::row`].
    pub stores: [u8; 2],
    /// Side to move.
    pub turn: Side,
    /// Extra-turn protocol marker.
    pub pending: PendingBonus,
    /// Capture and bonus rules in force.
    pub rules: RuleSet,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    /// Initial position under the default rules: every pit holds [`STONES`],
    /// both stores are empty and side A moves first.
    pub fn new() -> Self {
        Self::with_rules(RuleSet::default())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        State {
            board: [[STONES; PITS]; ROWS],
            stores: [0; 2],
            turn: Side::A,
            pending: PendingBonus::None,
            rules,
        }
    }

    /// Name used to tag results for this game and board size.
    pub fn class_repr() -> String {
        format!("Kalah_{PITS}x{ROWS}")
    }

    /// Board shape as reported to a search driver: (pits, rows).
    pub fn board_shape() -> (usize, usize) {
        (PITS, ROWS)
    }

    /// Copy this state and apply `action` to the copy.
    ///
    /// # Errors
    /// Returns the [`MoveError`] from [`play_move`]; `self` is never touched.
    pub fn child(&self, action: usize) -> Result<State, MoveError> {
        let mut child = self.clone();
        play_move(&mut child, action)?;
        Ok(child)
    }

    /// Stones remaining on one side's row.
    #[inline]
    pub fn row_total(&self, side: Side) -> u32 {
        self.board[side.row()].iter().map(|&s| s as u32).sum()
    }

    /// Stones on the board plus both stores. Constant over a game.
    pub fn total_stones(&self) -> u32 {
        let stores: u32 = self.stores.iter().map(|&s| s as u32).sum();
        self.row_total(Side::A) + self.row_total(Side::B) + stores
    }

    /// Row-major copy of the board in the flat-buffer layout.
    pub fn board_buffer(&self) -> [i8; BOARD_LEN] {
        std::array::from_fn(|i| self.board[i / PITS][i % PITS] as i8)
    }

    /// Auxiliary buffer: both stores and the bonus flags at their fixed offsets.
    pub fn extra_info(&self) -> [i8; EXTRA_INFO_LEN] {
        let mut extra = [0i8; EXTRA_INFO_LEN];
        extra[EXTRA_STORE_A] = self.stores[ROW_A] as i8;
        extra[EXTRA_STORE_B] = self.stores[ROW_B] as i8;
        extra[EXTRA_GRANTED] = (self.pending == PendingBonus::Granted) as i8;
        extra[EXTRA_DISPLAY] = (self.pending == PendingBonus::Display) as i8;
        extra
    }

    /// Rebuild a state from flat buffers and a signed turn.
    pub fn from_buffers(
        board: &[i8; BOARD_LEN],
        extra_info: &[i8; EXTRA_INFO_LEN],
        turn: i8,
        rules: RuleSet,
    ) -> Self {
        let pending = if extra_info[EXTRA_GRANTED] != 0 {
            PendingBonus::Granted
        } else if extra_info[EXTRA_DISPLAY] != 0 {
            PendingBonus::Display
        } else {
            PendingBonus::None
        };
        State {
            board: std::array::from_fn(|r| std::array::from_fn(|c| board[r * PITS + c] as u8)),
            stores: [
                extra_info[EXTRA_STORE_A] as u8,
                extra_info[EXTRA_STORE_B] as u8,
            ],
            turn: Side::from_sign(turn),
            pending,
            rules,
        }
    }
}

impl fmt::Display for State {
    /// Two lines: row A with store A on its left, row B with store B on its
    /// right. While a forced pass is being displayed only a notice is printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pending == PendingBonus::Display {
            return writeln!(
                f,
                "{} holds a bonus move ({} passes)",
                self.turn,
                self.turn.opponent()
            );
        }

        write!(f, "{:>2} |", self.stores[ROW_A])?;
        for pit in &self.board[ROW_A] {
            write!(f, "{pit:>3}")?;
        }
        writeln!(f, " |")?;

        write!(f, "   |")?;
        for pit in &self.board[ROW_B] {
            write!(f, "{pit:>3}")?;
        }
        writeln!(f, " | {}", self.stores[ROW_B])
    }
}
