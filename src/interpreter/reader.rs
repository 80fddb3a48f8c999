//! Splitting raw input lines into commands.

use std::mem;

/// Character that ends a command.
pub const TERMINATOR: char = ';';

/// Character that, at the start of a line, marks the whole line as a comment.
pub const COMMENT_MARKER: char = ';';

/// Accumulates input lines until a terminator completes a command.
///
/// The buffer is either idle (nothing pending) or buffering a command that
/// spans several lines. A line beginning with [`COMMENT_MARKER`] is dropped
/// in either state and leaves any pending text untouched. Several commands
/// may share one line.
///
/// # Example
///
/// ```rust
/// use fsm_designer::interpreter::LineBuffer;
///
/// let mut buffer = LineBuffer::new();
/// assert!(buffer.push_line("SYMBOLS a").is_empty());
/// assert_eq!(buffer.push_line("b; STATES p;"), vec!["SYMBOLS a b", "STATES p"]);
/// assert!(buffer.is_idle());
/// ```
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no partial command is pending.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Feed one line, returning every command it completes, in order.
    pub fn push_line(&mut self, line: &str) -> Vec<String> {
        let line = line.trim();
        if line.starts_with(COMMENT_MARKER) {
            return Vec::new();
        }

        let mut segments: Vec<&str> = line.split(TERMINATOR).collect();
        let rest = segments.pop().unwrap_or_default();

        let mut commands = Vec::new();
        for segment in segments {
            self.append(segment);
            commands.extend(self.take());
        }
        self.append(rest);
        commands
    }

    /// Hand out the unterminated command left at end of input, if any.
    pub fn finish(&mut self) -> Option<String> {
        self.take()
    }

    /// Drop any pending partial command.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn append(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if !self.pending.is_empty() {
            self.pending.push(' ');
        }
        self.pending.push_str(text);
    }

    fn take(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(mem::take(&mut self.pending))
        }
    }
}
