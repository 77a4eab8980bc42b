//! Subprocess adapters.
//!
//! [`SystemCommandRunner`] spawns real processes with the parent's stdio so
//! installer and git output streams straight to the user's terminal.
//! [`RecordingCommandRunner`] is a test double that records what would have
//! run.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
    sync::{Arc, Mutex},
};

use tracing::debug;

use pupstart_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::CommandSpec,
    error::PupstartResult,
};

/// Production runner backed by `std::process::Command`.
///
/// Blocks until the child exits. No timeout is applied; an interrupt
/// reaches the child through the shared process group.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &CommandSpec, cwd: &Path) -> PupstartResult<()> {
        debug!(command = %command, cwd = %cwd.display(), "Spawning subprocess");

        let status = Command::new(resolve_program(&command.program))
            .args(&command.args)
            .envs(command.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(cwd)
            .status()
            .map_err(|e| ApplicationError::CommandFailed {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ApplicationError::CommandFailed {
                command: command.to_string(),
                reason: status.to_string(),
            }
            .into())
        }
    }
}

/// The program to hand to `Command::new`.
///
/// Unix finds scripts on `PATH` through their shebang, so the name is used
/// as is.
#[cfg(not(windows))]
fn resolve_program(program: &str) -> OsString {
    OsString::from(program)
}

/// The program to hand to `Command::new`.
///
/// `CreateProcess` does not apply `PATHEXT`, so `pnpm` has to become the
/// full path of `pnpm.cmd`. Falls back to the bare name and lets the spawn
/// report the error.
#[cfg(windows)]
fn resolve_program(program: &str) -> OsString {
    match which::which(program) {
        Ok(resolved) => {
            debug!(program, resolved = %resolved.display(), "Resolved program");
            resolved.into_os_string()
        }
        Err(e) => {
            debug!(program, error = %e, "Could not resolve program, using bare name");
            OsString::from(program)
        }
    }
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub command: CommandSpec,
    pub cwd: PathBuf,
}

/// Test runner that records invocations instead of spawning.
///
/// Clones share the same log. Programs registered with
/// [`RecordingCommandRunner::failing`] return `CommandFailed`.
#[derive(Debug, Clone, Default)]
pub struct RecordingCommandRunner {
    log: Arc<Mutex<Vec<RecordedCommand>>>,
    failing: Arc<Vec<String>>,
}

impl RecordingCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `program` fail.
    pub fn failing(mut self, program: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.failing).push(program.into());
        self
    }

    /// Everything run so far, in order.
    pub fn recorded(&self) -> Vec<RecordedCommand> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Recorded command lines, e.g. `git init`.
    pub fn command_lines(&self) -> Vec<String> {
        self.recorded()
            .iter()
            .map(|r| r.command.to_string())
            .collect()
    }
}

impl CommandRunner for RecordingCommandRunner {
    fn run(&self, command: &CommandSpec, cwd: &Path) -> PupstartResult<()> {
        self.log
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned {
                name: "RecordingCommandRunner",
            })?
            .push(RecordedCommand {
                command: command.clone(),
                cwd: cwd.to_path_buf(),
            });

        if self.failing.iter().any(|p| p == &command.program) {
            return Err(ApplicationError::CommandFailed {
                command: command.to_string(),
                reason: "exit status: 1".into(),
            }
            .into());
        }
        Ok(())
    }
}
