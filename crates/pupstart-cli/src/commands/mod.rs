//! Command handlers.
//!
//! `pupstart` has no subcommands: `--completions` short-circuits, everything
//! else is a scaffold run.

pub mod completions;
pub mod scaffold;
