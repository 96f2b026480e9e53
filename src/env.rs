use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::OsString;

/// User-level view of the process environment used by the interpreter.
///
/// Variables set here shadow the process environment, which lets callers point
/// `PATH` or `HOME` somewhere else without touching global process state.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Overrides consulted before the process environment.
    pub vars: HashMap<String, String>,
}

impl Environment {
    /// Create an environment with no overrides; every lookup reaches the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of an environment variable.
    ///
    /// Looks up the key in `self.vars` first, falling back to `std::env::var_os`.
    pub fn get_var(&self, key: &str) -> Option<OsString> {
        self.vars
            .get(key)
            .map(OsString::from)
            .or_else(|| stdenv::var_os(key))
    }

    /// Set or override an environment variable in `self.vars`.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Colon-separated list of directories searched for executables.
    pub fn search_path(&self) -> OsString {
        self.get_var("PATH").unwrap_or_default()
    }

    /// Directory `~` expands to.
    pub fn home_dir(&self) -> Option<OsString> {
        self.get_var("HOME").filter(|home| !home.is_empty())
    }
}
