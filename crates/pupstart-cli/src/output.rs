//! Output management and formatting.
//!
//! Everything the user is meant to read goes through [`OutputManager`] on
//! stdout. Diagnostics go through `tracing` on stderr.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            // Only the human format is coloured.
            no_color: resolved_format != OutputFormat::Human
                || args.color_disabled()
                || config.output.no_color,
            term: Term::stdout(),
        }
    }
    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Aligned `label: value` line used by the summary.
    pub fn field(&self, label: &str, value: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let label = format!("{label}:");
        let line = if self.no_color {
            format!("  {label:<18}{value}")
        } else {
            format!("  {:<18}{}", label.dimmed(), value.bold())
        };
        self.term.write_line(&line)
    }

    /// An indented shell command for the user to copy.
    pub fn command(&self, cmd: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("  {cmd}")
        } else {
            format!("  {}", cmd.cyan())
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout. Written even in quiet mode since the caller
    /// asked for machine output.
    pub fn json<T: Serialize>(&self, value: &T) -> Result<(), serde_json::Error> {
        let rendered = serde_json::to_string_pretty(value)?;
        self.term
            .write_line(&rendered)
            .map_err(serde_json::Error::io)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::AppConfig;

    fn args(format: OutputFormat, quiet: bool, no_color: bool) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
        }
    }

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        // Plain avoids TTY detection in tests.
        OutputManager::new(&args(OutputFormat::Plain, quiet, no_color), &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.field("Package manager", "npm").is_ok());
    }

    #[test]
    fn warnings_suppressed_in_quiet_mode() {
        let out = make_manager(true, true);
        assert!(out.warning("install failed").is_ok());
    }

    #[test]
    fn plain_and_json_are_never_coloured() {
        for format in [OutputFormat::Plain, OutputFormat::Json] {
            let out = OutputManager::new(&args(format, false, false), &AppConfig::default());
            assert!(out.no_color, "{format:?} should not be coloured");
        }
    }

    #[test]
    fn no_color_flag_disables_human_colour() {
        let out = OutputManager::new(&args(OutputFormat::Human, false, true), &AppConfig::default());
        assert!(out.no_color);
    }

    #[test]
    fn config_no_color_is_honoured() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        let out = OutputManager::new(&args(OutputFormat::Human, false, false), &config);
        assert!(out.no_color);
    }

    #[test]
    fn json_writes_serializable_values() {
        let out = make_manager(true, true);
        assert!(out.json(&serde_json::json!({ "files": [] })).is_ok());
    }

    #[test]
    fn format_accessor_returns_resolved() {
        let out = make_manager(false, false);
        assert_eq!(out.format(), OutputFormat::Plain);
    }
}
