//! Command dispatch against one live machine.

use crate::checkpoint::Checkpoint;
use crate::core::{Fsm, FsmError, Registration};
use crate::interpreter::command::{Command, TransitionSpec};
use crate::interpreter::error::CommandError;
use crate::interpreter::log::CommandLog;
use crate::render;
use crate::script;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, warn};

/// Deepest chain of scripts loading scripts.
pub const MAX_SCRIPT_DEPTH: usize = 16;

/// Whether the session should keep reading commands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Continue,
    Exit,
}

/// An interpreter session: the live machine, the command log and the
/// output every response is written to.
///
/// The session exclusively owns its machine; `LOAD *.fs` replaces it
/// wholesale. Failures of a single command are written to the output and
/// never end the session; only `EXIT` does.
///
/// # Example
///
/// ```rust
/// use fsm_designer::interpreter::Session;
///
/// let mut session = Session::new(Vec::new());
/// session.process("SYMBOLS 0 1");
/// session.process("INITIAL-STATE s0");
/// session.process("FINAL-STATES s0");
/// session.process("TRANSITIONS 0 s0 s0");
/// session.process("EXECUTE 00");
///
/// let output = String::from_utf8(session.into_output()).unwrap();
/// assert!(output.ends_with("s0 s0 s0 YES\n"));
/// ```
pub struct Session<W: Write> {
    fsm: Fsm,
    log: CommandLog,
    out: W,
    depth: usize,
}

impl<W: Write> Session<W> {
    /// Create a session with an empty machine, writing responses to `out`.
    pub fn new(out: W) -> Self {
        Self {
            fsm: Fsm::new(),
            log: CommandLog::new(),
            out,
            depth: 0,
        }
    }

    pub fn machine(&self) -> &Fsm {
        &self.fsm
    }

    /// Install `fsm` as the live machine, returning the previous one.
    pub fn replace_machine(&mut self, fsm: Fsm) -> Fsm {
        std::mem::replace(&mut self.fsm, fsm)
    }

    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Handle one raw command, without its terminator.
    ///
    /// The command is appended to the command log (when active) before it
    /// is parsed, so malformed and unknown commands are logged as well.
    pub fn process(&mut self, raw: &str) -> Outcome {
        let raw = raw.trim();
        if raw.is_empty() {
            return Outcome::Continue;
        }

        if let Err(err) = self.log.record(raw) {
            warn!(error = %err, "failed to write command log");
            self.report(&err);
        }

        match raw.parse::<Command>() {
            Ok(command) => self.run(command),
            Err(err) => {
                self.report(&err);
                self.flush();
                Outcome::Continue
            }
        }
    }

    /// Run a parsed command, rendering any failure to the output.
    pub fn run(&mut self, command: Command) -> Outcome {
        let outcome = self.dispatch(command).unwrap_or_else(|err| {
            self.report(&err);
            Outcome::Continue
        });
        self.flush();
        outcome
    }

    /// Run a parsed command, returning its failure to the caller.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, CommandError> {
        debug!(command = command.name(), depth = self.depth, "dispatching command");
        match command {
            Command::Symbols(args) if args.is_empty() => {
                writeln!(self.out, "SYMBOLS: {}", render::list(self.fsm.symbols()))?;
            }
            Command::Symbols(args) => {
                let checked = self.fsm.declare_symbols(&args);
                self.report_all(checked)?;
            }
            Command::States(args) if args.is_empty() => {
                writeln!(self.out, "STATES: {}", render::list(self.fsm.states()))?;
            }
            Command::States(args) => {
                let checked = self.fsm.declare_states(&args);
                self.report_all(checked)?;
            }
            Command::InitialState(state) => {
                let registration = self.fsm.set_initial_state(&state)?;
                self.note_registration(&state, registration)?;
            }
            Command::FinalStates(args) if args.is_empty() => {
                writeln!(self.out, "FINAL STATES: {}", render::list(self.fsm.final_states()))?;
            }
            Command::FinalStates(args) => {
                for state in &args {
                    match self.fsm.add_final_state(state) {
                        Ok(registration) => self.note_registration(state, registration)?,
                        Err(err) => writeln!(self.out, "Error: {err}")?,
                    }
                }
            }
            Command::Transitions(text) => self.transitions(&text)?,
            Command::Print(None) => render::dump(&self.fsm, &mut self.out)?,
            Command::Print(Some(path)) => {
                self.export(&path)?;
                writeln!(self.out, "FSM printed to file: {}", path.display())?;
            }
            Command::Compile(path) => {
                Checkpoint::new(self.fsm.clone()).save(&path)?;
                writeln!(self.out, "Compile successful to {}", path.display())?;
            }
            Command::Load(path) => return script::load(self, &path),
            Command::Clear => {
                self.fsm.clear();
                writeln!(self.out, "FSM cleared.")?;
            }
            Command::Execute(input) => {
                let trace = self.fsm.execute(&input)?;
                writeln!(self.out, "{trace}")?;
            }
            Command::Log(None) => match self.log.close()? {
                Some(_) => writeln!(self.out, "STOPPED LOGGING")?,
                None => writeln!(self.out, "LOGGING was not enabled")?,
            },
            Command::Log(Some(path)) => {
                self.log.open(&path)?;
                writeln!(self.out, "Logging to {}", path.display())?;
            }
            Command::Exit => {
                writeln!(self.out, "TERMINATED BY USER")?;
                return Ok(Outcome::Exit);
            }
        }
        Ok(Outcome::Continue)
    }

    /// Mutable access to the output, for collaborators reporting progress.
    pub(crate) fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// Track entry into a nested script.
    pub(crate) fn enter_script(&mut self) -> Result<(), CommandError> {
        if self.depth >= MAX_SCRIPT_DEPTH {
            return Err(CommandError::NestingTooDeep {
                limit: MAX_SCRIPT_DEPTH,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_script(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn transitions(&mut self, text: &str) -> Result<(), CommandError> {
        let specs = TransitionSpec::parse_list(text);
        if specs.is_empty() {
            writeln!(self.out, "TRANSITIONS:")?;
            return Ok(render::transitions(&self.fsm, &mut self.out)?);
        }

        for spec in specs {
            let applied = spec.and_then(|spec| {
                let overwritten = self.fsm.add_transition(&spec.symbol, &spec.from, &spec.to)?;
                Ok((spec, overwritten))
            });
            match applied {
                Ok((spec, true)) => writeln!(
                    self.out,
                    "Warning: transition overridden for <{},{}>",
                    spec.symbol.to_ascii_lowercase(),
                    spec.from.to_ascii_lowercase()
                )?,
                Ok((_, false)) => {}
                Err(err) => writeln!(self.out, "Error: {err}")?,
            }
        }
        Ok(())
    }

    fn export(&self, path: &Path) -> Result<(), CommandError> {
        let file = File::create(path).map_err(CommandError::io(path))?;
        let mut writer = BufWriter::new(file);
        render::export(&self.fsm, &mut writer)
            .and_then(|_| writer.flush())
            .map_err(CommandError::io(path))
    }

    fn note_registration(&mut self, raw: &str, registration: Registration) -> Result<(), CommandError> {
        if registration == Registration::AutoRegistered {
            writeln!(
                self.out,
                "Warning: state '{}' was not declared before; added to STATES",
                raw.to_ascii_lowercase()
            )?;
        }
        Ok(())
    }

    fn report_all(&mut self, checked: Validation<(), NonEmptyVec<FsmError>>) -> Result<(), CommandError> {
        if let Validation::Failure(errors) = checked {
            for err in errors.iter() {
                writeln!(self.out, "Error: {err}")?;
            }
        }
        Ok(())
    }

    fn report(&mut self, err: &CommandError) {
        let written = if err.is_warning() {
            writeln!(self.out, "Warning: {err}")
        } else {
            writeln!(self.out, "Error: {err}")
        };
        if let Err(io_err) = written {
            warn!(error = %io_err, "failed to write command response");
        }
    }

    fn flush(&mut self) {
        if let Err(err) = self.out.flush() {
            warn!(error = %err, "failed to flush command output");
        }
    }
}
