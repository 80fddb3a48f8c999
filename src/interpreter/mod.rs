//! The command interpreter.
//!
//! Raw input flows through three stages:
//! - [`LineBuffer`] joins lines and splits them into `;`-terminated commands
//! - [`Command`] parses one command and checks its argument shape
//! - [`Session`] dispatches it against the live machine and renders the result
//!
//! File loading is delegated to [`crate::script`].

mod command;
mod error;
mod log;
mod reader;
mod repl;
mod session;

pub use command::{Command, TransitionSpec};
pub use error::CommandError;
pub use log::CommandLog;
pub use reader::{LineBuffer, COMMENT_MARKER, TERMINATOR};
pub use repl::{run_interactive, CONTINUATION_PROMPT};
pub use session::{Outcome, Session, MAX_SCRIPT_DEPTH};
