//! Core finite-state machine types and logic.
//!
//! This module contains the pure model of the automaton:
//! - Canonical names for symbols and states
//! - The [`Fsm`] aggregate with its declaration rules
//! - Deterministic execution producing a [`Trace`]
//!
//! Nothing in this module performs I/O; the interpreter renders results.

mod error;
mod machine;
mod state;
mod symbol;
mod trace;

pub use error::FsmError;
pub use machine::{Checked, Fsm, Registration, Transition};
pub use state::StateName;
pub use symbol::Symbol;
pub use trace::{Trace, Verdict};
