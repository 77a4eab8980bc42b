//! Application layer for pupstart.
//!
//! This layer contains:
//! - **Services**: the scaffold driver (`ScaffoldService`)
//! - **Ports**: Interface definitions (traits) for the filesystem and subprocesses
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences side effects around the pure plan but
//! makes no planning decisions itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{PostActionFailure, ScaffoldReport, ScaffoldService};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, Filesystem};

pub use error::ApplicationError;
