//! Execution traces.
//!
//! A trace records the states visited while running one input word, in
//! order, followed by the verdict for that word.

use super::state::StateName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal marker of an execution.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Verdict {
    /// The whole input was consumed and the machine stopped in a final state.
    Accept,
    /// The machine stopped in a non-final state or had no transition to take.
    Reject,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept => f.write_str("YES"),
            Self::Reject => f.write_str("NO"),
        }
    }
}

/// Ordered record of one execution.
///
/// `path` starts with the initial state and holds one successor per symbol
/// consumed. If the machine had no transition for some symbol, the path ends
/// at the state where it got stuck and `halted` is set.
///
/// # Example
///
/// ```rust
/// use fsm_designer::builder::FsmBuilder;
///
/// let fsm = FsmBuilder::new()
///     .symbols(["a"])
///     .states(["p", "q"])
///     .initial("p")
///     .finals(["q"])
///     .transition("a", "p", "q")
///     .build()
///     .unwrap();
///
/// let trace = fsm.execute("a").unwrap();
/// assert_eq!(trace.to_string(), "p q YES");
/// assert!(trace.is_accepted());
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Trace {
    path: Vec<StateName>,
    verdict: Verdict,
    halted: bool,
}

impl Trace {
    pub(crate) fn completed(path: Vec<StateName>, verdict: Verdict) -> Self {
        Self {
            path,
            verdict,
            halted: false,
        }
    }

    pub(crate) fn halted(path: Vec<StateName>) -> Self {
        Self {
            path,
            verdict: Verdict::Reject,
            halted: true,
        }
    }

    /// States visited, initial state first.
    pub fn path(&self) -> &[StateName] {
        &self.path
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accept
    }

    /// True when execution stopped before the input was fully consumed.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// State the machine was in when execution ended.
    pub fn last_state(&self) -> Option<&StateName> {
        self.path.last()
    }

    /// The trace as display tokens: every state, then `YES` or `NO`.
    pub fn tokens(&self) -> Vec<String> {
        self.path
            .iter()
            .map(ToString::to_string)
            .chain(std::iter::once(self.verdict.to_string()))
            .collect()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<StateName> {
        raw.iter().map(|s| StateName::parse(s).unwrap()).collect()
    }

    #[test]
    fn completed_trace_renders_states_then_verdict() {
        let trace = Trace::completed(names(&["s0", "s1", "s1"]), Verdict::Accept);
        assert_eq!(trace.to_string(), "s0 s1 s1 YES");
        assert!(trace.is_accepted());
        assert!(!trace.is_halted());
    }

    #[test]
    fn halted_trace_always_rejects() {
        let trace = Trace::halted(names(&["s0"]));
        assert_eq!(trace.verdict(), Verdict::Reject);
        assert!(trace.is_halted());
        assert_eq!(trace.to_string(), "s0 NO");
    }

    #[test]
    fn tokens_end_with_marker() {
        let trace = Trace::completed(names(&["a", "b"]), Verdict::Reject);
        assert_eq!(trace.tokens(), vec!["a", "b", "NO"]);
        assert_eq!(trace.last_state().map(StateName::as_str), Some("b"));
    }
}
