// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (cheap to carry into reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid package name '{name}': {reason}")]
    InvalidPackageName { name: String, reason: String },

    #[error("Generated path must be relative and stay inside the project: {path}")]
    InvalidPath { path: String },

    #[error("Unknown package manager: {0}")]
    UnknownPackageManager(String),

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use a plain directory name, e.g. my-scraper".into(),
            ],
            Self::InvalidPackageName { name, .. } => vec![
                format!("'{}' cannot be used as a package name", name),
                "Use lowercase letters, digits, '-', '_', '~' and '.'".into(),
                "Scoped names look like @scope/name".into(),
                "Or drop --package-name to derive one from the project name".into(),
            ],
            Self::UnknownPackageManager(name) => vec![
                format!("'{}' is not a supported package manager", name),
                "Supported: npm, pnpm, yarn".into(),
            ],
            Self::MissingRequiredField { field } => vec![format!("Provide a value for {field}")],
            Self::InvalidPath { .. } => vec![
                "This is a bug in pupstart's file layout, please report it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidPackageName { .. }
            | Self::UnknownPackageManager(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::InvalidPath { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
