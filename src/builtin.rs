use crate::command::{ExitCode, Outcome};
use crate::env::Environment;
use crate::external::find_command_path;
use anyhow::{Result, anyhow, bail};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use tracing::debug;

/// Built-in commands known to the shell at compile time.
///
/// Builtins run in-process. A failing builtin returns an error whose message is
/// the exact diagnostic line shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Exit,
    Echo,
    Type,
    Pwd,
    Cd,
    Cat,
}

impl Builtin {
    pub const ALL: [Builtin; 6] = [
        Builtin::Exit,
        Builtin::Echo,
        Builtin::Type,
        Builtin::Pwd,
        Builtin::Cd,
        Builtin::Cat,
    ];

    /// Canonical name of the command, e.g. "echo" or "cd".
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
            Builtin::Echo => "echo",
            Builtin::Type => "type",
            Builtin::Pwd => "pwd",
            Builtin::Cd => "cd",
            Builtin::Cat => "cat",
        }
    }

    /// Executes the builtin with the given arguments.
    pub fn execute(self, args: &[String], env: &Environment, registry: &Registry) -> Result<Outcome> {
        match self {
            Builtin::Exit => Ok(exit(args)),
            Builtin::Echo => Ok(Outcome::Output(args.join(" ").into_bytes())),
            Builtin::Type => type_of(args, env, registry),
            Builtin::Pwd => pwd(),
            Builtin::Cd => cd(args, env),
            Builtin::Cat => cat(args),
        }
    }
}

/// Immutable name-to-builtin table, built once at startup.
#[derive(Debug, Clone)]
pub struct Registry {
    builtins: HashMap<&'static str, Builtin>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            builtins: Builtin::ALL.iter().map(|b| (b.name(), *b)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Builtin> {
        self.builtins.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// `exit [status]`: status 1 without an operand, no-op for a non-numeric one.
fn exit(args: &[String]) -> Outcome {
    match args.first() {
        None => Outcome::Exit(1),
        Some(arg) => match arg.parse::<ExitCode>() {
            Ok(code) => Outcome::Exit(code),
            Err(_) => {
                debug!(arg = %arg, "ignoring non-numeric exit status");
                Outcome::Silent
            }
        },
    }
}

/// `type <command>`: builtin, PATH location, or not found.
fn type_of(args: &[String], env: &Environment, registry: &Registry) -> Result<Outcome> {
    let Some(name) = args.first() else {
        bail!("type: usage: type <command>");
    };
    if registry.contains(name) {
        return Ok(Outcome::Output(
            format!("{name} is a shell builtin").into_bytes(),
        ));
    }
    match find_command_path(&env.search_path(), name) {
        Some(path) => Ok(Outcome::Output(
            format!("{name} is {}", path.display()).into_bytes(),
        )),
        None => bail!("{name}: not found"),
    }
}

/// `pwd`: the process working directory.
fn pwd() -> Result<Outcome> {
    let dir = std::env::current_dir()
        .map_err(|e| anyhow!("error getting current directory: {e}"))?;
    Ok(Outcome::Output(dir.display().to_string().into_bytes()))
}

/// `cd <directory>`: `~` is the home directory, anything else is taken literally.
fn cd(args: &[String], env: &Environment) -> Result<Outcome> {
    let Some(target) = args.first() else {
        bail!("cd: usage: cd <directory>");
    };
    let dir = if target == "~" {
        env.home_dir().ok_or_else(|| anyhow!("cd: HOME not set"))?
    } else {
        target.into()
    };
    std::env::set_current_dir(&dir)
        .map_err(|_| anyhow!("cd: {}: No such file or directory", dir.to_string_lossy()))?;
    Ok(Outcome::Silent)
}

/// `cat <file>...`: the files' bytes back to back, without any separator.
///
/// One final newline is trimmed because output routing adds its own. The first
/// file that cannot be opened or read aborts the whole invocation.
fn cat(args: &[String]) -> Result<Outcome> {
    if args.is_empty() {
        bail!("cat: usage: cat <file1> <file2> ...");
    }
    let mut content = Vec::new();
    for path in args {
        let mut file =
            File::open(path).map_err(|_| anyhow!("cat: {path}: No such file or directory"))?;
        file.read_to_end(&mut content)
            .map_err(|e| anyhow!("cat: {path}: {e}"))?;
    }
    if content.last() == Some(&b'\n') {
        content.pop();
    }
    Ok(Outcome::Output(content))
}
