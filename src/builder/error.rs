//! Build errors for the machine builder.

use crate::core::FsmError;
use thiserror::Error;

/// Errors that can occur when building a machine with [`FsmBuilder`](super::FsmBuilder).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    Model(#[from] FsmError),

    #[error("Transition for <{symbol},{from}> defined more than once")]
    DuplicateTransition { symbol: String, from: String },
}
