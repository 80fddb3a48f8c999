//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::Fsm;

/// Builder for constructing an [`Fsm`] with a fluent API.
///
/// Declarations are replayed in a fixed order on [`build`](Self::build):
/// symbols, states, initial state, final states, transitions. Unlike the
/// command language, the builder treats a repeated transition as an error.
#[derive(Clone, Debug, Default)]
pub struct FsmBuilder {
    symbols: Vec<String>,
    states: Vec<String>,
    initial: Option<String>,
    finals: Vec<String>,
    transitions: Vec<(String, String, String)>,
}

impl FsmBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add alphabet symbols.
    pub fn symbols<I, T>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Add states.
    pub fn states<I, T>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Set the initial state. A later call replaces an earlier one.
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Add final states.
    pub fn finals<I, T>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.finals.extend(states.into_iter().map(Into::into));
        self
    }

    /// Add a transition `(symbol, from, to)`.
    pub fn transition(
        mut self,
        symbol: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.transitions.push((symbol.into(), from.into(), to.into()));
        self
    }

    /// Build the machine, stopping at the first failing declaration.
    pub fn build(self) -> Result<Fsm, BuildError> {
        let mut fsm = Fsm::new();

        for symbol in &self.symbols {
            fsm.declare_symbol(symbol)?;
        }
        for state in &self.states {
            fsm.declare_state(state)?;
        }
        if let Some(initial) = &self.initial {
            fsm.set_initial_state(initial)?;
        }
        for state in &self.finals {
            fsm.add_final_state(state)?;
        }
        for (symbol, from, to) in &self.transitions {
            if fsm.add_transition(symbol, from, to)? {
                return Err(BuildError::DuplicateTransition {
                    symbol: symbol.to_ascii_lowercase(),
                    from: from.to_ascii_lowercase(),
                });
            }
        }

        Ok(fsm)
    }
}
