//! Kalah-MCTS: a Kalah rules engine for Monte Carlo tree search.
//!
//! The rules are implemented twice. An owned [`state::State`] is used when a
//! search expands its tree, and the flat-buffer functions in [`batched`] are
//! used for lock-step random playouts over many slots at once. The two are
//! independent implementations kept identical by conformance tests.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, buffer offsets and sentinels
//! - [`state`] - Position representation, branching and rendering
//! - [`rules`] - Rule variants (bonus-turn or classic)
//! - [`sowing`] - Move resolution: sowing, capture and bonus turns
//! - [`outcome`] - Terminal detection and scoring
//! - [`actions`] - Legal action enumeration and action names
//! - [`batched`] - The same rules over flat buffers
//! - [`playout`] - Sequential and lock-step batched random playouts
//!
//! ## Example
//!
//! ```
//! use kalah_mcts::actions::legal_actions;
//! use kalah_mcts::outcome::{evaluate, Outcome};
//! use kalah_mcts::state::State;
//!
//! let root = State::new();
//! let children: Vec<State> = legal_actions(&root)
//!     .into_iter()
//!     .map(|action| root.child(action).unwrap())
//!     .collect();
//! assert_eq!(children.len(), 6);
//!
//! let mut first = children[0].clone();
//! assert_eq!(evaluate(&mut first), Outcome::Ongoing);
//! ```

pub mod actions;
pub mod batched;
pub mod constants;
pub mod outcome;
pub mod playout;
pub mod rules;
pub mod sowing;
pub mod state;
