//! Application layer errors.
//!
//! These errors represent failures in orchestration, not planning.
//! Planning errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving a scaffold.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A project marker is already present at the target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// A subprocess could not be started or exited unsuccessfully.
    #[error("Command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// Adapter state was poisoned by a panic in another thread.
    #[error("Adapter lock poisoned: {name}")]
    LockPoisoned { name: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("{} already contains a package.json", path.display()),
                "Choose a different project name".into(),
                "Or remove the existing project first".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("`{}` did not complete", command),
                "Ensure the tool is installed and on your PATH".into(),
                "Check the command output above for details".into(),
            ],
            Self::LockPoisoned { .. } => vec!["This is a bug, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::LockPoisoned { .. } => ErrorCategory::Internal,
            Self::CommandFailed { .. } => ErrorCategory::External,
        }
    }
}
