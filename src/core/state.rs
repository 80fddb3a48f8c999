//! State identifiers.
//!
//! A state name is one or more ASCII alphanumeric characters. Names are
//! case-insensitive and stored lowercased, so `S0` and `s0` denote the same
//! state.

use super::error::FsmError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical (lowercased) name of an automaton state.
///
/// # Example
///
/// ```rust
/// use fsm_designer::core::StateName;
///
/// let state = StateName::parse("Q1").unwrap();
/// assert_eq!(state.as_str(), "q1");
/// assert!(StateName::parse("q-1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateName(String);

impl StateName {
    /// Validate and canonicalize a raw state name.
    ///
    /// Fails with [`FsmError::InvalidFormat`] unless `raw` is non-empty and
    /// made only of ASCII letters and digits.
    pub fn parse(raw: &str) -> Result<Self, FsmError> {
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(FsmError::InvalidFormat {
                value: raw.to_string(),
                expected: "one or more alphanumeric characters",
            });
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Get the canonical name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that a deserialized name still satisfies the syntax rules.
    pub(crate) fn is_canonical(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lowercases_name() {
        let state = StateName::parse("Start1").unwrap();
        assert_eq!(state.as_str(), "start1");
        assert_eq!(state.to_string(), "start1");
    }

    #[test]
    fn parse_treats_case_variants_as_equal() {
        assert_eq!(StateName::parse("ABC").unwrap(), StateName::parse("abc").unwrap());
    }

    #[test]
    fn parse_rejects_empty_name() {
        assert!(matches!(
            StateName::parse(""),
            Err(FsmError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn parse_rejects_punctuation_and_spaces() {
        for raw in ["s-1", "s 1", "s_1", "s;", "é"] {
            assert!(
                matches!(StateName::parse(raw), Err(FsmError::InvalidFormat { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn canonical_check_detects_uppercase() {
        assert!(StateName::parse("Q0").unwrap().is_canonical());
        assert!(!StateName("Q0".to_string()).is_canonical());
        assert!(!StateName(String::new()).is_canonical());
    }

    #[test]
    fn state_name_serializes_as_plain_string() {
        let state = StateName::parse("s1").unwrap();
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "\"s1\"");
        let deserialized: StateName = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
