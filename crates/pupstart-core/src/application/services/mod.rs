//! Application services - orchestrate use cases.
//!
//! The scaffold service turns a resolved plan into files on disk and runs
//! the follow-up subprocesses.

pub mod scaffold_service;

pub use scaffold_service::{PostActionFailure, ScaffoldReport, ScaffoldService};
