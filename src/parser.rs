//! Turns one input line into a [`ParsedCommand`].
//!
//! Parsing never fails: a line with an unterminated quote keeps its command name
//! (when one was completed before the quote opened) and loses all of its arguments.

use crate::lexer::{self, LexingError};
use tracing::debug;

/// Tokens that redirect a command's standard output to a file.
const REDIRECT_OPERATORS: [&str; 2] = [">", "1>"];

/// A command line split into its name, arguments and optional output redirection target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Command name; empty when there is nothing to run.
    pub name: String,
    /// Arguments in the order they were typed, redirection tokens removed.
    pub args: Vec<String>,
    /// File that receives the command's output instead of the terminal.
    pub redirect: Option<String>,
}

impl ParsedCommand {
    /// Returns true when dispatching this command is a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Parses a raw input line.
pub fn parse_line(line: &str) -> ParsedCommand {
    let line = line.trim();
    if line.is_empty() {
        return ParsedCommand::default();
    }

    match lexer::split_into_words(line) {
        Ok(words) => {
            let mut words = words.into_iter();
            let name = words.next().unwrap_or_default();
            let mut args: Vec<String> = words.collect();
            let redirect = extract_redirect(&mut args);
            ParsedCommand {
                name,
                args,
                redirect,
            }
        }
        Err(LexingError::UnfinishedQuote { completed }) => {
            debug!(line, "unterminated quote, dropping arguments");
            ParsedCommand {
                name: completed.into_iter().next().unwrap_or_default(),
                args: Vec::new(),
                redirect: None,
            }
        }
    }
}

/// Removes the first `>`/`1>` operator that has a target after it, together with the target.
///
/// An operator in last position has no target and stays an ordinary argument.
fn extract_redirect(args: &mut Vec<String>) -> Option<String> {
    let pos = args
        .iter()
        .enumerate()
        .position(|(i, arg)| REDIRECT_OPERATORS.contains(&arg.as_str()) && i + 1 < args.len())?;
    let target = args.remove(pos + 1);
    args.remove(pos);
    Some(target)
}
