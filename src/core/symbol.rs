//! Alphabet symbols.

use super::error::FsmError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One canonical (lowercased) alphabet character.
///
/// # Example
///
/// ```rust
/// use fsm_designer::core::Symbol;
///
/// assert_eq!(Symbol::parse("A").unwrap(), Symbol::parse("a").unwrap());
/// assert!(Symbol::parse("ab").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(char);

impl Symbol {
    /// Validate and canonicalize a raw symbol.
    ///
    /// Fails with [`FsmError::InvalidFormat`] unless `raw` is exactly one
    /// ASCII letter or digit.
    pub fn parse(raw: &str) -> Result<Self, FsmError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphanumeric() => Ok(Self(c.to_ascii_lowercase())),
            _ => Err(FsmError::InvalidFormat {
                value: raw.to_string(),
                expected: "a single alphanumeric character",
            }),
        }
    }

    /// Canonicalize one character of an input word.
    ///
    /// Input characters are not validated here; the caller checks membership
    /// in the alphabet, which only ever holds valid symbols.
    pub fn from_input(c: char) -> Self {
        Self(c.to_ascii_lowercase())
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub(crate) fn is_canonical(self) -> bool {
        self.0.is_ascii_digit() || self.0.is_ascii_lowercase()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
