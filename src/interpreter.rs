use crate::builtin::Registry;
use crate::command::{Control, ExitCode, Outcome, ProcessRunner};
use crate::env::Environment;
use crate::external::{SystemRunner, find_command_path};
use crate::io_adapters::LineSource;
use crate::parser::{ParsedCommand, parse_line};
use anyhow::{Result, anyhow};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// A minimal shell-like interpreter that can execute built-in and external commands.
///
/// The interpreter owns an [`Environment`], the builtin [`Registry`] and the
/// [`ProcessRunner`] used for everything that is not a builtin. Output and
/// diagnostics go to the writers passed in, so the whole dispatch path can be
/// driven from memory.
///
/// Example
/// ```
/// use minish::{Control, Interpreter};
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let control = sh.run_line("echo 'hello   world'", &mut out, &mut err).unwrap();
/// assert_eq!(control, Control::Continue);
/// assert_eq!(out, b"hello   world\n");
/// ```
pub struct Interpreter {
    env: Environment,
    registry: Registry,
    runner: Box<dyn ProcessRunner>,
}

impl Interpreter {
    /// Create a new interpreter from its collaborators.
    pub fn new(env: Environment, registry: Registry, runner: Box<dyn ProcessRunner>) -> Self {
        Self {
            env,
            registry,
            runner,
        }
    }

    /// Parse and dispatch a single input line.
    pub fn run_line(
        &mut self,
        line: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Control> {
        let parsed = parse_line(line);
        self.dispatch(&parsed, out, err)
    }

    /// Runs one parsed command and routes its result.
    ///
    /// Every recoverable failure is written to `err` as one line and the call still
    /// returns [`Control::Continue`]. An `Err` means the terminal itself could not be written.
    pub fn dispatch(
        &mut self,
        parsed: &ParsedCommand,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Control> {
        if parsed.is_empty() {
            return Ok(Control::Continue);
        }
        debug!(name = %parsed.name, args = ?parsed.args, redirect = ?parsed.redirect, "dispatching");

        let result = match self.registry.get(&parsed.name) {
            Some(builtin) => match builtin.execute(&parsed.args, &self.env, &self.registry) {
                Ok(Outcome::Output(bytes)) => bytes,
                Ok(Outcome::Silent) => return Ok(Control::Continue),
                Ok(Outcome::Exit(code)) => return Ok(Control::Exit(code)),
                Err(e) => {
                    writeln!(err, "{e}")?;
                    // The target is still created or truncated, as if the command printed nothing.
                    if let Some(target) = parsed.redirect.as_deref() {
                        if let Err(e) = open_redirect(Path::new(target)) {
                            writeln!(err, "{e}")?;
                        }
                    }
                    return Ok(Control::Continue);
                }
            },
            None => match self.run_external(parsed, err)? {
                Some(stdout) => stdout,
                None => return Ok(Control::Continue),
            },
        };

        match parsed.redirect.as_deref() {
            Some(target) => {
                if let Err(e) = write_redirect(Path::new(target), &result) {
                    writeln!(err, "{e}")?;
                }
            }
            None => {
                out.write_all(&result)?;
                out.write_all(b"\n")?;
                out.flush()?;
            }
        }
        Ok(Control::Continue)
    }

    /// Resolves `parsed.name` on PATH and runs it, returning the captured stdout.
    ///
    /// Returns `None` after writing a diagnostic when the command cannot be found or started.
    fn run_external(
        &mut self,
        parsed: &ParsedCommand,
        err: &mut dyn Write,
    ) -> Result<Option<Vec<u8>>> {
        let Some(program) = find_command_path(&self.env.search_path(), &parsed.name) else {
            writeln!(err, "{}: command not found", parsed.name)?;
            return Ok(None);
        };
        debug!(name = %parsed.name, program = %program.display(), "resolved on PATH");

        match self.runner.run(&program, &parsed.name, &parsed.args) {
            Ok(captured) => {
                if captured.status != 0 {
                    debug!(name = %parsed.name, status = captured.status, "non-zero exit status");
                }
                Ok(Some(captured.stdout))
            }
            Err(e) => {
                writeln!(err, "{}: {e}", parsed.name)?;
                Ok(None)
            }
        }
    }

    /// The read-eval-print loop.
    ///
    /// Returns the status the process should exit with: the one requested by `exit`,
    /// or 1 when the next line cannot be read.
    pub fn repl(
        &mut self,
        lines: &mut dyn LineSource,
        prompt: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<ExitCode> {
        loop {
            let line = match lines.read_line(prompt) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    writeln!(err, "error reading from stdin: EOF")?;
                    return Ok(1);
                }
                Err(e) => {
                    writeln!(err, "error reading from stdin: {e}")?;
                    return Ok(1);
                }
            };
            if let Control::Exit(code) = self.run_line(&line, out, err)? {
                debug!(code, "exit requested");
                return Ok(code);
            }
        }
    }
}

impl Default for Interpreter {
    /// Create an interpreter over the process environment that spawns real programs.
    fn default() -> Self {
        Self::new(
            Environment::new(),
            Registry::new(),
            Box::new(SystemRunner),
        )
    }
}

/// Creates or truncates `target`, creating missing parent directories first.
fn open_redirect(target: &Path) -> Result<File> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow!("error creating directory {}: {e}", parent.display()))?;
    }
    File::create(target).map_err(|e| anyhow!("error creating file: {e}"))
}

/// Creates or truncates `target` and writes `result` followed by one newline.
fn write_redirect(target: &Path, result: &[u8]) -> Result<()> {
    let mut file = open_redirect(target)?;
    file.write_all(result)
        .and_then(|()| file.write_all(b"\n"))
        .map_err(|e| anyhow!("error writing file {}: {e}", target.display()))?;
    debug!(target = %target.display(), bytes = result.len() + 1, "redirected output");
    Ok(())
}
