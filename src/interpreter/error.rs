//! Command errors.

use crate::checkpoint::CheckpointError;
use crate::core::FsmError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing or running one command.
///
/// None of these end a session; the session renders them and moves on to
/// the next command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Wrong number or shape of arguments
    #[error("{0}")]
    Usage(String),

    #[error("Unknown command {0}")]
    UnknownCommand(String),

    /// A file named by the command could not be opened, read or written
    #[error("Cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to the session output failed
    #[error("Cannot write output: {0}")]
    Output(#[from] io::Error),

    #[error(transparent)]
    Model(#[from] FsmError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),

    #[error("LOAD nested deeper than {limit} scripts")]
    NestingTooDeep { limit: usize },
}

impl CommandError {
    pub(crate) fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// Unknown commands are reported as warnings, everything else as errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::UnknownCommand(_))
    }
}
