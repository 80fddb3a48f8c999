//! The finite-state machine model.
//!
//! [`Fsm`] owns the alphabet, the state set, the initial and final states
//! and the transition table. Every operation takes raw user text, validates
//! it and canonicalizes it before touching the model, so the model never
//! holds a name that could not have been declared.

use super::error::FsmError;
use super::state::StateName;
use super::symbol::Symbol;
use super::trace::{Trace, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a batch operation: success, or every error that occurred.
pub type Checked = Validation<(), NonEmptyVec<FsmError>>;

/// How a state named by `INITIAL-STATE` or `FINAL-STATES` entered the model.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Registration {
    /// The state had been declared before.
    Existing,
    /// The state was unknown and has been added to the state set.
    AutoRegistered,
}

/// One row of the transition table.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Transition {
    pub symbol: Symbol,
    pub from: StateName,
    pub to: StateName,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.symbol, self.from, self.to)
    }
}

/// Deterministic finite-state machine built up by incremental declarations.
///
/// Symbols, states and final states keep their declaration order. The
/// transition table is keyed by source state, then symbol, so iteration
/// order is sorted and stable.
///
/// Note the asymmetry between operations: [`set_initial_state`] and
/// [`add_final_state`] register unknown states on the fly, while
/// [`add_transition`] requires every name to be declared first.
///
/// [`set_initial_state`]: Fsm::set_initial_state
/// [`add_final_state`]: Fsm::add_final_state
/// [`add_transition`]: Fsm::add_transition
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fsm {
    symbols: Vec<Symbol>,
    states: Vec<StateName>,
    initial: Option<StateName>,
    finals: Vec<StateName>,
    transitions: BTreeMap<StateName, BTreeMap<Symbol, StateName>>,
}

impl Fsm {
    /// Create an empty machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one symbol to the alphabet.
    pub fn declare_symbol(&mut self, raw: &str) -> Result<Symbol, FsmError> {
        let symbol = Symbol::parse(raw)?;
        if self.symbols.contains(&symbol) {
            return Err(FsmError::AlreadyDeclared(symbol.to_string()));
        }
        self.symbols.push(symbol);
        Ok(symbol)
    }

    /// Add one state to the state set.
    pub fn declare_state(&mut self, raw: &str) -> Result<StateName, FsmError> {
        let state = StateName::parse(raw)?;
        if self.states.contains(&state) {
            return Err(FsmError::AlreadyDeclared(state.to_string()));
        }
        self.states.push(state.clone());
        Ok(state)
    }

    /// Declare every symbol in `raw`, continuing past failures.
    ///
    /// Valid symbols are added even when others fail; the result carries
    /// every failure in input order.
    pub fn declare_symbols<I, T>(&mut self, raw: I) -> Checked
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let checks: Vec<Checked> = raw
            .into_iter()
            .map(|item| into_check(self.declare_symbol(item.as_ref())))
            .collect();
        Validation::all_vec(checks).map(|_| ())
    }

    /// Declare every state in `raw`, continuing past failures.
    pub fn declare_states<I, T>(&mut self, raw: I) -> Checked
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let checks: Vec<Checked> = raw
            .into_iter()
            .map(|item| into_check(self.declare_state(item.as_ref())))
            .collect();
        Validation::all_vec(checks).map(|_| ())
    }

    /// Set (or replace) the initial state, registering it if unknown.
    pub fn set_initial_state(&mut self, raw: &str) -> Result<Registration, FsmError> {
        let state = StateName::parse(raw)?;
        let registration = self.register(&state);
        self.initial = Some(state);
        Ok(registration)
    }

    /// Mark a state as final, registering it if unknown.
    ///
    /// Marking the same state twice fails with [`FsmError::AlreadyDeclared`];
    /// the state stays final.
    pub fn add_final_state(&mut self, raw: &str) -> Result<Registration, FsmError> {
        let state = StateName::parse(raw)?;
        let registration = self.register(&state);
        if self.finals.contains(&state) {
            return Err(FsmError::AlreadyDeclared(state.to_string()));
        }
        self.finals.push(state);
        Ok(registration)
    }

    /// Define the successor of `from` on `symbol`.
    ///
    /// Returns `true` when an existing transition for the same
    /// `(from, symbol)` pair was overwritten.
    pub fn add_transition(&mut self, symbol: &str, from: &str, to: &str) -> Result<bool, FsmError> {
        let symbol = self.lookup_symbol(symbol)?;
        let from = self.lookup_state(from)?;
        let to = self.lookup_state(to)?;

        let previous = self.transitions.entry(from).or_default().insert(symbol, to);
        Ok(previous.is_some())
    }

    /// Run `input` from the initial state.
    ///
    /// Each character is one symbol. An undeclared character fails the whole
    /// run; a missing transition ends it early with a rejecting trace.
    pub fn execute(&self, input: &str) -> Result<Trace, FsmError> {
        let mut current = self.initial.clone().ok_or(FsmError::NoInitialState)?;
        let mut path = vec![current.clone()];

        for c in input.chars() {
            let symbol = Symbol::from_input(c);
            if !self.symbols.contains(&symbol) {
                return Err(FsmError::UndeclaredSymbol(symbol.to_string()));
            }
            match self.successor(&current, symbol) {
                Some(next) => {
                    current = next.clone();
                    path.push(current.clone());
                }
                None => return Ok(Trace::halted(path)),
            }
        }

        let verdict = if self.finals.contains(&current) {
            Verdict::Accept
        } else {
            Verdict::Reject
        };
        Ok(Trace::completed(path, verdict))
    }

    /// Reset the machine to empty.
    pub fn clear(&mut self) {
        self.symbols.clear();
        self.states.clear();
        self.initial = None;
        self.finals.clear();
        self.transitions.clear();
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn states(&self) -> &[StateName] {
        &self.states
    }

    pub fn initial_state(&self) -> Option<&StateName> {
        self.initial.as_ref()
    }

    pub fn final_states(&self) -> &[StateName] {
        &self.finals
    }

    /// Snapshot of the transition table, sorted by source state then symbol.
    pub fn transitions(&self) -> Vec<Transition> {
        self.transitions
            .iter()
            .flat_map(|(from, row)| {
                row.iter().map(move |(symbol, to)| Transition {
                    symbol: *symbol,
                    from: from.clone(),
                    to: to.clone(),
                })
            })
            .collect()
    }

    /// Successor of `state` on `symbol`, if a transition is defined.
    pub fn successor(&self, state: &StateName, symbol: Symbol) -> Option<&StateName> {
        self.transitions.get(state)?.get(&symbol)
    }

    /// Check whether a transition exists for raw `symbol` out of raw `from`.
    pub fn has_transition(&self, symbol: &str, from: &str) -> bool {
        match (Symbol::parse(symbol), StateName::parse(from)) {
            (Ok(symbol), Ok(from)) => self.successor(&from, symbol).is_some(),
            _ => false,
        }
    }

    /// True when nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
            && self.states.is_empty()
            && self.initial.is_none()
            && self.finals.is_empty()
            && self.transitions.is_empty()
    }

    /// Check every structural invariant, accumulating all violations.
    ///
    /// Machines built through the declaration operations always pass; this
    /// guards machines restored from outside sources.
    pub fn validate(&self) -> Checked {
        let mut checks: Vec<Checked> = Vec::new();

        for (i, symbol) in self.symbols.iter().enumerate() {
            if !symbol.is_canonical() {
                checks.push(Validation::fail(FsmError::InvalidFormat {
                    value: symbol.to_string(),
                    expected: "a single lowercase alphanumeric character",
                }));
            }
            if self.symbols[..i].contains(symbol) {
                checks.push(Validation::fail(FsmError::AlreadyDeclared(symbol.to_string())));
            }
        }

        for (i, state) in self.states.iter().enumerate() {
            if !state.is_canonical() {
                checks.push(Validation::fail(FsmError::InvalidFormat {
                    value: state.to_string(),
                    expected: "one or more lowercase alphanumeric characters",
                }));
            }
            if self.states[..i].contains(state) {
                checks.push(Validation::fail(FsmError::AlreadyDeclared(state.to_string())));
            }
        }

        for (i, state) in self.finals.iter().enumerate() {
            if self.finals[..i].contains(state) {
                checks.push(Validation::fail(FsmError::AlreadyDeclared(state.to_string())));
            }
        }

        let referenced = self
            .initial
            .iter()
            .chain(self.finals.iter())
            .chain(self.transitions.keys())
            .chain(self.transitions.values().flat_map(|row| row.values()));
        for state in referenced {
            if !self.states.contains(state) {
                checks.push(Validation::fail(FsmError::UndeclaredState(state.to_string())));
            }
        }

        for symbol in self.transitions.values().flat_map(|row| row.keys()) {
            if !self.symbols.contains(symbol) {
                checks.push(Validation::fail(FsmError::UndeclaredSymbol(symbol.to_string())));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    fn register(&mut self, state: &StateName) -> Registration {
        if self.states.contains(state) {
            Registration::Existing
        } else {
            self.states.push(state.clone());
            Registration::AutoRegistered
        }
    }

    fn lookup_symbol(&self, raw: &str) -> Result<Symbol, FsmError> {
        Symbol::parse(raw)
            .ok()
            .filter(|symbol| self.symbols.contains(symbol))
            .ok_or_else(|| FsmError::UndeclaredSymbol(raw.to_ascii_lowercase()))
    }

    fn lookup_state(&self, raw: &str) -> Result<StateName, FsmError> {
        StateName::parse(raw)
            .ok()
            .filter(|state| self.states.contains(state))
            .ok_or_else(|| FsmError::UndeclaredState(raw.to_ascii_lowercase()))
    }
}

fn into_check<T>(result: Result<T, FsmError>) -> Checked {
    match result {
        Ok(_) => Validation::success(()),
        Err(err) => Validation::fail(err),
    }
}
