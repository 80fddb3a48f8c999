//! Running files through a session.
//!
//! `LOAD` accepts two kinds of file, told apart by extension:
//! - `.fs` or `.json`: a checkpoint that replaces the live machine
//! - `.txt`: a script of commands, dispatched exactly as if typed
//!
//! Scripts keep going after a failing command, including one holding bytes
//! that are not UTF-8. An unterminated command at the end of a script is
//! still dispatched.

use crate::checkpoint::{self, Checkpoint};
use crate::interpreter::{CommandError, LineBuffer, Outcome, Session};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::info;

/// File extension of command scripts.
pub const SCRIPT_EXTENSION: &str = "txt";

/// Load `path` into `session`, dispatching on its extension.
pub fn load<W: Write>(session: &mut Session<W>, path: &Path) -> Result<Outcome, CommandError> {
    if checkpoint::is_checkpoint_path(path) {
        let machine = Checkpoint::load(path)?.into_machine();
        session.replace_machine(machine);
        writeln!(session.out(), "FSM loaded from {}", path.display())?;
        return Ok(Outcome::Continue);
    }

    if path.extension().is_some_and(|ext| ext == SCRIPT_EXTENSION) {
        let file = File::open(path).map_err(CommandError::io(path))?;
        info!(path = %path.display(), "running script");
        let outcome = run_script(session, BufReader::new(file), path)?;
        if outcome == Outcome::Continue {
            writeln!(session.out(), "Script {} finished", path.display())?;
        }
        return Ok(outcome);
    }

    Err(CommandError::usage(format!(
        "LOAD expects a .{SCRIPT_EXTENSION} script or a .{} or .{} machine",
        checkpoint::BINARY_EXTENSION,
        checkpoint::JSON_EXTENSION
    )))
}

/// Feed every line of `reader` to `session`.
///
/// `origin` names the source in error messages. Stops early, returning
/// [`Outcome::Exit`], when a command in the script exits the session.
pub fn run_script<W: Write, R: BufRead>(
    session: &mut Session<W>,
    reader: R,
    origin: &Path,
) -> Result<Outcome, CommandError> {
    session.enter_script()?;
    let outcome = feed(session, reader, origin);
    session.leave_script();
    outcome
}

fn feed<W: Write, R: BufRead>(
    session: &mut Session<W>,
    mut reader: R,
    origin: &Path,
) -> Result<Outcome, CommandError> {
    let mut buffer = LineBuffer::new();
    let mut bytes = Vec::new();
    loop {
        bytes.clear();
        let read = reader
            .read_until(b'\n', &mut bytes)
            .map_err(CommandError::io(origin))?;
        if read == 0 {
            break;
        }
        // Invalid UTF-8 becomes U+FFFD and fails only the command it lands in.
        let line = String::from_utf8_lossy(&bytes);
        for command in buffer.push_line(&line) {
            if session.process(&command) == Outcome::Exit {
                return Ok(Outcome::Exit);
            }
        }
    }
    match buffer.finish() {
        Some(command) => Ok(session.process(&command)),
        None => Ok(Outcome::Continue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    fn run(text: &str) -> (Outcome, String, Session<Vec<u8>>) {
        let mut session = Session::new(Vec::new());
        let outcome = run_script(&mut session, Cursor::new(text), Path::new("<memory>")).unwrap();
        let output = String::from_utf8(session.output().clone()).unwrap();
        (outcome, output, session)
    }

    #[test]
    fn script_commands_run_in_order() {
        let (outcome, output, session) = run(
            "; binary machine\n\
             SYMBOLS 0 1;\n\
             STATES s0 s1; INITIAL-STATE s0;\n\
             FINAL-STATES s1;\n\
             TRANSITIONS 0 s0 s0, 1 s0 s1,\n\
             1 s1 s1, 0 s1 s0;\n\
             EXECUTE 11;\n",
        );
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(output, "s0 s1 s1 YES\n");
        assert_eq!(session.machine().transitions().len(), 4);
    }

    #[test]
    fn unterminated_final_command_is_dispatched() {
        let (_, output, _) = run("SYMBOLS a;\nSYMBOLS");
        assert_eq!(output, "SYMBOLS: [a]\n");
    }

    #[test]
    fn failing_command_does_not_stop_script() {
        let (_, output, session) = run("STATES bad-name;\nSTATES good;\nFROB;\n");
        assert!(output.contains("Error: invalid name 'bad-name'"));
        assert!(output.contains("Warning: Unknown command FROB"));
        assert_eq!(session.machine().states().len(), 1);
    }

    #[test]
    fn invalid_utf8_line_does_not_stop_script() {
        let mut session = Session::new(Vec::new());
        let text: &[u8] = b"STATES a;\nSTATES \xff\xfe;\r\nSTATES b;\nSTATES";
        let outcome = run_script(&mut session, text, Path::new("<memory>")).unwrap();
        let output = String::from_utf8(session.output().clone()).unwrap();

        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(output.matches("Error: invalid name").count(), 1);
        assert!(output.ends_with("STATES: [a, b]\n"));
    }

    #[test]
    fn comment_inside_multiline_command_is_skipped() {
        let (_, output, session) = run(
            "SYMBOLS a b;\n\
             STATES p q;\n\
             TRANSITIONS a p q,\n\
             ; second row\n\
             b q p;\n",
        );
        assert_eq!(output, "");
        assert_eq!(session.machine().transitions().len(), 2);
    }

    #[test]
    fn exit_stops_script() {
        let (outcome, output, session) = run("STATES a;\nEXIT;\nSTATES b;\n");
        assert_eq!(outcome, Outcome::Exit);
        assert!(output.ends_with("TERMINATED BY USER\n"));
        assert_eq!(session.machine().states().len(), 1);
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let mut session = Session::new(Vec::new());
        let result = load(&mut session, Path::new("machine.json"));
        assert!(matches!(result, Err(CommandError::Usage(_))));
    }

    #[test]
    fn load_missing_script_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(Vec::new());
        let result = load(&mut session, &dir.path().join("absent.txt"));
        assert!(matches!(result, Err(CommandError::Io { .. })));
    }

    #[test]
    fn self_loading_script_hits_depth_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loop.txt");
        fs::write(&path, format!("LOAD {};\n", path.display())).unwrap();

        let mut session = Session::new(Vec::new());
        let outcome = load(&mut session, &path).unwrap();
        let output = String::from_utf8(session.into_output()).unwrap();

        assert_eq!(outcome, Outcome::Continue);
        assert!(output.contains("LOAD nested deeper than 16 scripts"));
    }
}
