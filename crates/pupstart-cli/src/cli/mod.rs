//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{ArgGroup, Parser, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

use pupstart_core::domain::PackageManager;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "pupstart",
    bin_name = "pupstart",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Scaffold a Puppeteer automation project",
    long_about = "pupstart creates a ready-to-run Puppeteer project: a package.json, \
                  an entry script that opens a page and prints its title, and \
                  optionally a TypeScript setup, a git repository and installed \
                  dependencies.",
    after_help = "EXAMPLES:\n\
        \x20 pupstart my-scraper\n\
        \x20 pupstart my-scraper --ts --use-pnpm --git\n\
        \x20 pupstart my-scraper --core --no-install\n\
        \x20 pupstart --completions bash > ~/.local/share/bash-completion/completions/pupstart",
    group(
        ArgGroup::new("package_manager")
            .args(["use_npm", "use_pnpm", "use_yarn"])
            .multiple(false)
    ),
)]
pub struct Cli {
    /// Flags shared by every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Project directory.  A plain name creates `./name`; a path like
    /// `../foo` places the project elsewhere.  Prompted for when omitted.
    #[arg(value_name = "NAME", help = "Project directory name or path")]
    pub name: Option<String>,

    #[arg(long = "use-npm", help = "Install dependencies with npm")]
    pub use_npm: bool,

    #[arg(long = "use-pnpm", help = "Install dependencies with pnpm")]
    pub use_pnpm: bool,

    #[arg(long = "use-yarn", help = "Install dependencies with yarn")]
    pub use_yarn: bool,

    #[arg(long = "ts", help = "Generate a TypeScript project")]
    pub typescript: bool,

    /// Depend on `puppeteer-core` and read the browser path from
    /// `CHROME_PATH` at run time.
    #[arg(long = "core", help = "Use puppeteer-core (bring your own browser)")]
    pub core: bool,

    #[arg(
        long = "skip-chromium",
        help = "Skip the browser download during install"
    )]
    pub skip_chromium: bool,

    #[arg(long = "git", help = "Initialise a git repository with a first commit")]
    pub git: bool,

    #[arg(long = "no-install", help = "Do not install dependencies")]
    pub no_install: bool,

    #[arg(long = "no-example", help = "Write an empty entry file")]
    pub no_example: bool,

    /// Override the package name derived from the directory name.
    #[arg(
        long = "package-name",
        value_name = "NAME",
        value_parser = parse_package_name_flag,
        help = "Package name to write into package.json"
    )]
    pub package_name: Option<String>,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Print a shell completion script and exit.
    #[arg(
        long = "completions",
        value_name = "SHELL",
        value_enum,
        help = "Generate shell completions"
    )]
    pub completions: Option<Shell>,
}

impl Cli {
    /// The package manager forced by a `--use-*` flag, if any.
    pub fn forced_package_manager(&self) -> Option<PackageManager> {
        if self.use_pnpm {
            Some(PackageManager::Pnpm)
        } else if self.use_yarn {
            Some(PackageManager::Yarn)
        } else if self.use_npm {
            Some(PackageManager::Npm)
        } else {
            None
        }
    }
}

/// A value that looks like another flag was almost certainly a mistake.
fn parse_package_name_flag(value: &str) -> Result<String, String> {
    if value.starts_with("--") {
        return Err(format!("'{value}' looks like a flag, not a package name"));
    }
    Ok(value.to_string())
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
