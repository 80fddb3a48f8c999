//! Builder API for programmatic machine construction.
//!
//! The command language builds machines one declaration at a time and
//! reports problems as it goes. Code that knows the whole machine up front
//! can use [`FsmBuilder`] instead and get a single `Result`.

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::FsmBuilder;

use crate::core::Fsm;

/// Build the machine described by `(symbols, states, initial, finals,
/// transitions)` in one call.
///
/// # Example
///
/// ```
/// use fsm_designer::builder::machine_from_parts;
///
/// let fsm = machine_from_parts("ab", &["p", "q"], "p", &["q"], &[("a", "p", "q")]).unwrap();
/// assert_eq!(fsm.execute("a").unwrap().to_string(), "p q YES");
/// ```
pub fn machine_from_parts(
    alphabet: &str,
    states: &[&str],
    initial: &str,
    finals: &[&str],
    transitions: &[(&str, &str, &str)],
) -> Result<Fsm, BuildError> {
    let builder = FsmBuilder::new()
        .symbols(alphabet.chars().map(String::from))
        .states(states.iter().copied())
        .initial(initial)
        .finals(finals.iter().copied());

    transitions
        .iter()
        .fold(builder, |builder, (symbol, from, to)| {
            builder.transition(*symbol, *from, *to)
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_from_parts_splits_alphabet_into_symbols() {
        let fsm = machine_from_parts("xy", &["s"], "s", &[], &[("x", "s", "s")]).unwrap();
        assert_eq!(fsm.symbols().len(), 2);
        assert_eq!(fsm.execute("xx").unwrap().to_string(), "s s s NO");
    }

    #[test]
    fn machine_from_parts_reports_bad_state() {
        assert!(machine_from_parts("a", &["bad name"], "p", &[], &[]).is_err());
    }
}
