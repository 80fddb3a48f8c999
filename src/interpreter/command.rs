//! Parsing command text into [`Command`] values.

use crate::checkpoint::{self, BINARY_EXTENSION, JSON_EXTENSION};
use crate::interpreter::error::CommandError;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One command of the language, with its arguments checked for shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the alphabet, or declare every argument as a symbol
    Symbols(Vec<String>),
    /// Print the state set, or declare every argument as a state
    States(Vec<String>),
    InitialState(String),
    /// Print the final states, or mark every argument as final
    FinalStates(Vec<String>),
    /// Comma-separated transition specs; empty text prints the table
    Transitions(String),
    Print(Option<PathBuf>),
    Compile(PathBuf),
    Load(PathBuf),
    Clear,
    Execute(String),
    /// Start logging to a file, or stop logging
    Log(Option<PathBuf>),
    Exit,
}

impl Command {
    /// Canonical command word.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Symbols(_) => "SYMBOLS",
            Self::States(_) => "STATES",
            Self::InitialState(_) => "INITIAL-STATE",
            Self::FinalStates(_) => "FINAL-STATES",
            Self::Transitions(_) => "TRANSITIONS",
            Self::Print(_) => "PRINT",
            Self::Compile(_) => "COMPILE",
            Self::Load(_) => "LOAD",
            Self::Clear => "CLEAR",
            Self::Execute(_) => "EXECUTE",
            Self::Log(_) => "LOG",
            Self::Exit => "EXIT",
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parse one command, without its terminator.
    ///
    /// The command word is case-insensitive; arguments are whitespace
    /// separated and passed through untouched.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let mut tokens = raw.split_whitespace();
        let word = tokens.next().unwrap_or_default().to_ascii_uppercase();
        let args: Vec<String> = tokens.map(String::from).collect();

        let command = match word.as_str() {
            "SYMBOLS" => Self::Symbols(args),
            "STATES" => Self::States(args),
            "INITIAL-STATE" => match <[String; 1]>::try_from(args) {
                Ok([state]) => Self::InitialState(state),
                Err(_) => {
                    return Err(CommandError::usage(
                        "invalid initial state declaration: INITIAL-STATE takes exactly one state",
                    ))
                }
            },
            "FINAL-STATES" => Self::FinalStates(args),
            "TRANSITIONS" => Self::Transitions(rest_of(raw).to_string()),
            "PRINT" => Self::Print(at_most_one(args, "PRINT takes at most one file name")?),
            "COMPILE" => match args.as_slice() {
                [path] if checkpoint::is_checkpoint_path(Path::new(path)) => {
                    Self::Compile(PathBuf::from(path))
                }
                _ => {
                    return Err(CommandError::usage(format!(
                        "COMPILE requires one file name ending with .{BINARY_EXTENSION} or .{JSON_EXTENSION}"
                    )))
                }
            },
            "LOAD" => match args.as_slice() {
                [path] => Self::Load(PathBuf::from(path)),
                _ => return Err(CommandError::usage("LOAD requires one file name")),
            },
            "CLEAR" => Self::Clear,
            "EXECUTE" => match <[String; 1]>::try_from(args) {
                Ok([input]) => Self::Execute(input),
                Err(_) => {
                    return Err(CommandError::usage(
                        "EXECUTE requires exactly one input string",
                    ))
                }
            },
            "LOG" => Self::Log(at_most_one(args, "LOG takes at most one file name")?),
            "EXIT" => Self::Exit,
            _ => return Err(CommandError::UnknownCommand(word)),
        };
        Ok(command)
    }
}

/// One `symbol from to` triple from a `TRANSITIONS` command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionSpec {
    pub symbol: String,
    pub from: String,
    pub to: String,
}

impl TransitionSpec {
    /// Split `TRANSITIONS` argument text on commas and parse each spec.
    ///
    /// Every spec is parsed independently so one malformed entry does not
    /// hide the others. Empty text yields no specs.
    pub fn parse_list(text: &str) -> Vec<Result<Self, CommandError>> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        text.split(',').map(Self::parse).collect()
    }

    fn parse(spec: &str) -> Result<Self, CommandError> {
        match spec.split_whitespace().collect::<Vec<_>>().as_slice() {
            [symbol, from, to] => Ok(Self {
                symbol: symbol.to_string(),
                from: from.to_string(),
                to: to.to_string(),
            }),
            _ => Err(CommandError::usage(format!(
                "invalid transition format '{}'",
                spec.trim()
            ))),
        }
    }
}

/// Text following the command word.
fn rest_of(raw: &str) -> &str {
    raw.split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default()
}

fn at_most_one(args: Vec<String>, message: &str) -> Result<Option<PathBuf>, CommandError> {
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (first, None) => Ok(first.map(PathBuf::from)),
        _ => Err(CommandError::usage(message)),
    }
}
