//! The `LOG` command transcript.

use crate::interpreter::error::CommandError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

struct LogTarget {
    path: PathBuf,
    writer: BufWriter<File>,
}

/// Optional transcript file receiving every raw command.
///
/// At most one target is open. Opening a new target flushes and closes the
/// previous one first. Each recorded command is flushed immediately.
#[derive(Default)]
pub struct CommandLog {
    target: Option<LogTarget>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Path of the open target, if logging.
    pub fn path(&self) -> Option<&Path> {
        self.target.as_ref().map(|target| target.path.as_path())
    }

    /// Start logging to `path`, truncating it, and replacing any open target.
    pub fn open(&mut self, path: &Path) -> Result<(), CommandError> {
        self.close()?;
        let file = File::create(path).map_err(CommandError::io(path))?;
        self.target = Some(LogTarget {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        });
        info!(path = %path.display(), "command log opened");
        Ok(())
    }

    /// Stop logging. Returns the path of the closed target, if there was one.
    pub fn close(&mut self) -> Result<Option<PathBuf>, CommandError> {
        let Some(mut target) = self.target.take() else {
            return Ok(None);
        };
        target
            .writer
            .flush()
            .map_err(CommandError::io(&target.path))?;
        info!(path = %target.path.display(), "command log closed");
        Ok(Some(target.path))
    }

    /// Append one raw command. Does nothing while logging is off.
    pub fn record(&mut self, raw: &str) -> Result<(), CommandError> {
        let Some(target) = self.target.as_mut() else {
            return Ok(());
        };
        writeln!(target.writer, "> {raw}")
            .and_then(|_| target.writer.flush())
            .map_err(CommandError::io(&target.path))
    }
}
