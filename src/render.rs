//! Text renderings of a machine.
//!
//! [`dump`] is the console view printed by `PRINT`. [`export`] is the file
//! format written by `PRINT <file>`: a script in the command language that
//! rebuilds the machine when loaded into an empty session.

use crate::core::Fsm;
use std::fmt::Display;
use std::io::{self, Write};

/// Bracketed, comma-separated list, e.g. `[s0, s1]`.
pub fn list<T: Display>(items: &[T]) -> String {
    let items: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Write one transition per line as `symbol from to`.
pub fn transitions(fsm: &Fsm, out: &mut impl Write) -> io::Result<()> {
    for transition in fsm.transitions() {
        writeln!(out, "{transition}")?;
    }
    Ok(())
}

/// Write the console view of every entity category.
pub fn dump(fsm: &Fsm, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "SYMBOLS: {}", list(fsm.symbols()))?;
    writeln!(out, "STATES: {}", list(fsm.states()))?;
    match fsm.initial_state() {
        Some(state) => writeln!(out, "INITIAL STATE: {state}")?,
        None => writeln!(out, "INITIAL STATE: (none)")?,
    }
    writeln!(out, "FINAL STATES: {}", list(fsm.final_states()))?;
    writeln!(out, "TRANSITIONS:")?;
    transitions(fsm, out)
}

/// Write the machine as a loadable script.
pub fn export(fsm: &Fsm, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "SYMBOLS{};", spaced(fsm.symbols()))?;
    writeln!(out, "STATES{};", spaced(fsm.states()))?;
    match fsm.initial_state() {
        Some(state) => writeln!(out, "INITIAL-STATE {state};")?,
        None => writeln!(out, "; INITIAL-STATE not set")?,
    }
    writeln!(out, "FINAL-STATES{};", spaced(fsm.final_states()))?;

    let rows: Vec<String> = fsm.transitions().iter().map(ToString::to_string).collect();
    if rows.is_empty() {
        writeln!(out, "TRANSITIONS;")
    } else {
        writeln!(out, "TRANSITIONS {};", rows.join(", "))
    }
}

fn spaced<T: Display>(items: &[T]) -> String {
    items.iter().map(|item| format!(" {item}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FsmBuilder;

    fn sample() -> Fsm {
        FsmBuilder::new()
            .symbols(["a", "b"])
            .states(["p", "q"])
            .initial("p")
            .finals(["q"])
            .transition("a", "p", "q")
            .transition("b", "q", "p")
            .build()
            .unwrap()
    }

    fn render(f: impl Fn(&Fsm, &mut Vec<u8>) -> io::Result<()>, fsm: &Fsm) -> String {
        let mut out = Vec::new();
        f(fsm, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn list_brackets_items() {
        assert_eq!(list::<String>(&[]), "[]");
        assert_eq!(list(&["x", "y"]), "[x, y]");
    }

    #[test]
    fn dump_shows_every_category() {
        let text = render(|fsm, out| dump(fsm, out), &sample());
        assert_eq!(
            text,
            "SYMBOLS: [a, b]\n\
             STATES: [p, q]\n\
             INITIAL STATE: p\n\
             FINAL STATES: [q]\n\
             TRANSITIONS:\n\
             a p q\n\
             b q p\n"
        );
    }

    #[test]
    fn dump_of_empty_machine() {
        let text = render(|fsm, out| dump(fsm, out), &Fsm::new());
        assert!(text.contains("INITIAL STATE: (none)"));
        assert!(text.ends_with("TRANSITIONS:\n"));
    }

    #[test]
    fn export_writes_script() {
        let text = render(|fsm, out| export(fsm, out), &sample());
        assert_eq!(
            text,
            "SYMBOLS a b;\n\
             STATES p q;\n\
             INITIAL-STATE p;\n\
             FINAL-STATES q;\n\
             TRANSITIONS a p q, b q p;\n"
        );
    }

    #[test]
    fn export_comments_out_missing_initial_state() {
        let text = render(|fsm, out| export(fsm, out), &Fsm::new());
        assert_eq!(
            text,
            "SYMBOLS;\nSTATES;\n; INITIAL-STATE not set\nFINAL-STATES;\nTRANSITIONS;\n"
        );
    }
}
