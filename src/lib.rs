//! FSM Designer: declare and simulate deterministic finite-state machines.
//!
//! The crate follows a "pure core, imperative shell" layout. The core
//! model validates declarations and executes input deterministically with
//! no side effects; the interpreter around it parses the command language,
//! talks to files and renders results.
//!
//! # Core Concepts
//!
//! - **Fsm**: alphabet, states, initial and final states, transition table
//! - **Trace**: the states visited by one execution plus `YES`/`NO`
//! - **Session**: one live machine driven by textual commands
//! - **Checkpoint**: binary snapshot written by `COMPILE`, read by `LOAD`
//!
//! # Example
//!
//! ```rust
//! use fsm_designer::core::Fsm;
//!
//! let mut fsm = Fsm::new();
//! assert!(fsm.declare_symbols(["0", "1"]).is_success());
//! assert!(fsm.declare_states(["s0", "s1"]).is_success());
//! fsm.set_initial_state("s0").unwrap();
//! fsm.add_final_state("s1").unwrap();
//! fsm.add_transition("1", "s0", "s1").unwrap();
//! fsm.add_transition("1", "s1", "s1").unwrap();
//!
//! assert_eq!(fsm.execute("11").unwrap().to_string(), "s0 s1 s1 YES");
//! assert_eq!(fsm.execute("0").unwrap().to_string(), "s0 NO");
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod interpreter;
pub mod render;
pub mod script;

// Re-export commonly used types
pub use crate::core::{Fsm, FsmError, StateName, Symbol, Trace, Verdict};
pub use interpreter::{Command, CommandError, Outcome, Session};
