//! Model errors.

use thiserror::Error;

/// Errors raised by declaration, transition and execution operations on
/// [`Fsm`](super::Fsm).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("invalid name '{value}': expected {expected}")]
    InvalidFormat {
        value: String,
        expected: &'static str,
    },

    #[error("'{0}' has already been declared")]
    AlreadyDeclared(String),

    #[error("Symbol not declared: {0}")]
    UndeclaredSymbol(String),

    #[error("State not declared: {0}")]
    UndeclaredState(String),

    #[error("Initial state not set")]
    NoInitialState,
}
