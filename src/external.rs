use crate::command::{Captured, ExitCode, ProcessRunner};
use anyhow::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Spawns real child processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&mut self, program: &Path, name: &str, args: &[String]) -> Result<Captured> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(name);
        }
        #[cfg(not(unix))]
        let _ = name;

        debug!(program = %program.display(), ?args, "spawning");
        let output = cmd.output()?;
        let status = match output.status.code() {
            Some(code) => code,
            None => terminated_by_signal(output.status),
        };
        debug!(program = %program.display(), status, "child exited");
        Ok(Captured {
            stdout: output.stdout,
            status,
        })
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}

/// Resolve a command name to an executable file.
///
/// Behavior:
/// - Empty name: returns `None`.
/// - Name containing a path separator (e.g. `/bin/sh`, `./run`, `bin/tool`): the name itself is
///   the candidate, absolute or relative to the current directory.
/// - Bare name: each directory in `search_paths` (PATH) is tried in order and the first
///   executable match wins. Empty PATH entries are skipped.
///
/// Matches are returned as absolute paths.
pub fn find_command_path(search_paths: &OsStr, name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    if name.contains(std::path::MAIN_SEPARATOR) {
        let path = Path::new(name);
        return is_executable(path).then(|| absolute_or_same(path.to_path_buf()));
    }
    find_in_path(search_paths, name)
}

fn find_in_path(search_paths: &OsStr, name: &str) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
        .map(absolute_or_same)
}

fn absolute_or_same(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match path.metadata() {
        Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
