//! Interactive manual entry session
//!
//! Reads one command per line; errors are reported and the loop continues
//! with the list unchanged.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::OnceLock;

use colored::Colorize;
use regex::Regex;
use tracing::{debug, instrument};

use crate::application::services::SessionService;
use crate::application::ApplicationError;
use crate::domain::{DomainError, InsertMode};

const HELP: &str = "\
commands:
  add <name> <laptime> [stack|queue]   insert an entry (quote names with spaces)
  pull                                 remove the first entry
  clear                                remove all entries
  list                                 show entries
  help                                 show this help
  quit                                 leave the session";

/// A parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Add {
        name: String,
        laptime: String,
        mode: InsertMode,
    },
    Pull,
    Clear,
    List,
    Help,
    Quit,
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]*)"|(\S+)"#).expect("valid token regex"))
}

/// Split a line on whitespace, keeping double-quoted runs together.
pub fn tokenize(line: &str) -> Vec<String> {
    token_regex()
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

impl FromStr for SessionCommand {
    type Err = DomainError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(line);
        let Some((verb, args)) = tokens.split_first() else {
            return Err(DomainError::MissingField("command"));
        };
        match verb.to_lowercase().as_str() {
            "add" => {
                let name = args.first().cloned().unwrap_or_default();
                let laptime = args.get(1).cloned().unwrap_or_default();
                let mode = match args.get(2) {
                    Some(mode) => mode.parse()?,
                    None => InsertMode::default(),
                };
                Ok(SessionCommand::Add {
                    name,
                    laptime,
                    mode,
                })
            }
            "pull" => Ok(SessionCommand::Pull),
            "clear" => Ok(SessionCommand::Clear),
            "list" | "ls" => Ok(SessionCommand::List),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" => Ok(SessionCommand::Quit),
            _ => Err(DomainError::UnknownVariant {
                kind: "command",
                value: verb.clone(),
            }),
        }
    }
}

/// Run the loop until `quit` or end of input.
#[instrument(level = "debug", skip_all)]
pub fn run_session<R: BufRead, W: Write>(
    session: &mut SessionService,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{}", "Manual entries (type 'help')".cyan().bold())?;
    write!(out, "{} ", "f1dash>".cyan())?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match line.parse::<SessionCommand>() {
                Ok(SessionCommand::Quit) => break,
                Ok(command) => {
                    if let Err(e) = apply(session, command, out)? {
                        writeln!(out, "{}: {}", "error".red().bold(), e)?;
                    }
                }
                Err(e) => writeln!(out, "{}: {}", "error".red().bold(), e)?,
            }
        }
        write!(out, "{} ", "f1dash>".cyan())?;
        out.flush()?;
    }
    writeln!(out)?;
    debug!("session closed with {} entries", session.entries().len());
    Ok(())
}

/// Outer result is the terminal, inner result the command.
fn apply<W: Write>(
    session: &mut SessionService,
    command: SessionCommand,
    out: &mut W,
) -> io::Result<Result<(), ApplicationError>> {
    match command {
        SessionCommand::Add {
            name,
            laptime,
            mode,
        } => match session.add(&name, &laptime, mode) {
            Ok(entry) => writeln!(out, "{} added ({mode}): {entry}", "✓".green())?,
            Err(e) => return Ok(Err(e)),
        },
        SessionCommand::Pull => match session.pull() {
            Ok(entry) => writeln!(out, "{} pulled: {entry}", "✓".green())?,
            Err(e) => return Ok(Err(e)),
        },
        SessionCommand::Clear => {
            let removed = session.clear();
            writeln!(out, "{} cleared {removed} entries", "✓".green())?;
        }
        SessionCommand::List => {
            if session.entries().is_empty() {
                writeln!(out, "  (empty)")?;
            }
            for (i, entry) in session.entries().iter().enumerate() {
                writeln!(out, "  {:>3}. {entry}", i + 1)?;
            }
        }
        SessionCommand::Help => writeln!(out, "{HELP}")?,
        SessionCommand::Quit => {}
    }
    Ok(Ok(()))
}
