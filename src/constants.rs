//! Constants for board geometry, buffer layout, and action sentinels.
//!
//! The board is two rows of [`PITS`] pits. Row 0 belongs to side A and is sown
//! toward column 0, row 1 belongs to side B and is sown toward column
//! `PITS - 1`. Each side's store sits just past the end of its own row.
//!
//! # Stone Count Configuration
//!
//! The number of stones initially placed in every pit is controlled by Cargo
//! features:
//! - `stones3`: 3 stones per pit
//! - `stones4` (default): 4 stones per pit
//! - `stones6`: 6 stones per pit
//!
//! ```sh
//! cargo build                                            # 4 stones (default)
//! cargo build --no-default-features --features stones6   # 6 stones
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Pits per side.
pub const PITS: usize = 6;

/// Number of rows (one per side).
pub const ROWS: usize = 2;

/// Row owned by side A (the minimizing player, turn sign -1).
pub const ROW_A: usize = 0;

/// Row owned by side B (the maximizing player, turn sign +1).
pub const ROW_B: usize = 1;

/// Stones initially placed in every pit.
#[cfg(feature = "stones3")]
pub const STONES: u8 = 3;

#[cfg(feature = "stones4")]
pub const STONES: u8 = 4;

#[cfg(feature = "stones6")]
pub const STONES: u8 = 6;

#[cfg(any(
    all(feature = "stones3", feature = "stones4"),
    all(feature = "stones3", feature = "stones6"),
    all(feature = "stones4", feature = "stones6"),
))]
compile_error!("Enable only one of the 'stones3', 'stones4' and 'stones6' features");

#[cfg(not(any(feature = "stones3", feature = "stones4", feature = "stones6")))]
compile_error!("Must enable exactly one stone count feature: 'stones3', 'stones4' or 'stones6'");

/// Stones in play for the whole game (board plus both stores).
pub const TOTAL_STONES: u32 = (ROWS * PITS) as u32 * STONES as u32;

// =============================================================================
// Flat Buffer Layout
// =============================================================================

/// Length of the flat, row-major board buffer.
pub const BOARD_LEN: usize = ROWS * PITS;

/// Length of the auxiliary buffer carrying stores and bonus flags.
pub const EXTRA_INFO_LEN: usize = 2 * PITS + 2;

/// Offset of side A's store in the auxiliary buffer.
pub const EXTRA_STORE_A: usize = 0;

/// Offset of side B's store in the auxiliary buffer.
pub const EXTRA_STORE_B: usize = 1;

/// Offset of the "bonus granted" flag (next call is a forced pass).
pub const EXTRA_GRANTED: usize = 2;

/// Offset of the "bonus displayed" flag (a forced pass was just taken).
pub const EXTRA_DISPLAY: usize = 3;

// =============================================================================
// Actions and Outcomes
// =============================================================================

/// Size of the action space (one slot per pit column).
pub const MAX_ACTIONS: usize = PITS;

/// Action slot listed for the forced pass that hands a bonus move back: the
/// last slot of the action space. While a bonus is granted every slot is
/// played as the pass, so sharing an index with pit 5 is harmless.
pub const FORCED_PASS: usize = MAX_ACTIONS - 1;

/// Length of a playout legal-action buffer: room for every pit action, then
/// the count in the last entry. A forced pass only ever occupies entry 0.
pub const LEGAL_BUFFER_LEN: usize = MAX_ACTIONS + 1;

/// Outcome value returned while the game is still running.
/// Anything outside `{-1, 0, 1}` means ongoing; this is the value produced.
pub const OUTCOME_ONGOING: i8 = -2;

/// Default number of lock-step playout slots for the CLI.
pub const N_SLOTS: usize = 4096;
