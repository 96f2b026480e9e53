//! A minimal interactive command shell.
//!
//! A line is split into words by a quoting-aware lexer ([`parse_line`]), then the
//! [`Interpreter`] either runs one of the builtins (`exit`, `echo`, `type`, `pwd`,
//! `cd`, `cat`) or looks the command up on `PATH` and runs it as a child process.
//! A single `>` or `1>` redirects the command's output to a file.
//!
//! The public modules [`command`] and [`env`] expose the types the interpreter is
//! built from, including the [`ProcessRunner`] seam used to run external programs.

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
mod io_adapters;
mod lexer;
mod parser;

#[cfg(test)]
mod test_support;

pub use builtin::{Builtin, Registry};
pub use command::{Control, ExitCode, ProcessRunner};
pub use external::SystemRunner;
pub use interpreter::Interpreter;
pub use io_adapters::{Editor, LineSource, PlainLines};
pub use parser::{ParsedCommand, parse_line};
