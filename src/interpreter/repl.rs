//! Interactive read-eval-print loop.

use crate::interpreter::reader::LineBuffer;
use crate::interpreter::session::{Outcome, Session};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use tracing::debug;

/// Prompt shown while a command spans several lines.
pub const CONTINUATION_PROMPT: &str = "... ";

/// Read commands from the terminal until `EXIT` or end of input.
///
/// Ctrl-C discards a partially typed command. At end of input a pending
/// unterminated command is dropped.
pub fn run_interactive<W: Write>(
    session: &mut Session<W>,
    prompt: &str,
) -> rustyline::Result<Outcome> {
    let mut editor = DefaultEditor::new()?;
    let mut buffer = LineBuffer::new();

    loop {
        let shown = if buffer.is_idle() {
            prompt
        } else {
            CONTINUATION_PROMPT
        };
        match editor.readline(shown) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                }
                for command in buffer.push_line(&line) {
                    if session.process(&command) == Outcome::Exit {
                        return Ok(Outcome::Exit);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                debug!("interrupted, discarding pending input");
                buffer.clear();
            }
            Err(ReadlineError::Eof) => return Ok(Outcome::Continue),
            Err(err) => return Err(err),
        }
    }
}
