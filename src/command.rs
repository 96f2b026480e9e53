use anyhow::Result;
use std::path::Path;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// What a builtin produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Bytes routed to standard output or the redirection target.
    Output(Vec<u8>),
    /// The builtin acted by side effect only; nothing is printed.
    Silent,
    /// The shell must terminate with this status.
    Exit(ExitCode),
}

/// What the read-eval-print loop does after a line has been dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit(ExitCode),
}

/// Output of an external program that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    /// Everything the program wrote to its standard output.
    pub stdout: Vec<u8>,
    /// Exit status; `128 + n` when killed by signal `n`.
    pub status: ExitCode,
}

/// Capability to run an external program and wait for it.
///
/// The dispatcher only talks to programs through this trait, so tests can
/// substitute a recording implementation for real process spawning.
pub trait ProcessRunner {
    /// Runs `program` with `args`, presenting `name` as its `argv[0]`.
    ///
    /// Standard input and standard error are shared with the shell; standard output is captured.
    fn run(&mut self, program: &Path, name: &str, args: &[String]) -> Result<Captured>;
}
