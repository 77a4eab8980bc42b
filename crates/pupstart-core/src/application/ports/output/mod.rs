//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `pupstart-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::CommandSpec;
use crate::error::PupstartResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `pupstart_adapters::filesystem::LocalFilesystem` (production)
/// - `pupstart_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PupstartResult<()>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> PupstartResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> PupstartResult<()>;
}

/// Port for running subprocesses.
///
/// Implemented by:
/// - `pupstart_adapters::process::SystemCommandRunner` (production)
/// - `pupstart_adapters::process::RecordingCommandRunner` (testing)
///
/// Implementations block until the child exits. A non-zero exit status is
/// an error.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `command` with `cwd` as its working directory.
    fn run(&self, command: &CommandSpec, cwd: &Path) -> PupstartResult<()>;
}
