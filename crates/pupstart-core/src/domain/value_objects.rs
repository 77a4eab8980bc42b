//! Domain value objects: PackageManager, BrowserLibrary, ScriptFlavor.
//!
//! # Design
//!
//! These are plain `Copy` value types compared by value.
//! Each one owns the handful of constants that depend on it (package
//! names, file extensions, command lines) so the resolver can stay a
//! table of choices rather than a pile of string branches.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── PackageManager ───────────────────────────────────────────────────────────

/// The package manager used to install dependencies in the generated project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
        }
    }

    /// Detect the package manager that launched us from an
    /// `npm_config_user_agent` value such as `pnpm/9.1.0 npm/? node/v20.11.0`.
    ///
    /// Returns `None` when the agent is empty or names an unknown tool.
    pub fn from_user_agent(agent: &str) -> Option<Self> {
        let name = agent.split_whitespace().next()?.split('/').next()?;
        name.parse().ok()
    }

    /// Arguments for the install subprocess (program is [`Self::as_str`]).
    pub const fn install_args(&self) -> &'static [&'static str] {
        &["install"]
    }

    /// Human-readable install command, e.g. `pnpm install`.
    pub fn install_command(&self) -> String {
        format!("{} install", self.as_str())
    }

    /// Human-readable command to run a manifest script.
    ///
    /// `npm` needs the explicit `run`; `pnpm` and `yarn` accept the bare
    /// script name.
    pub fn run_command(&self, script: &str) -> String {
        match self {
            Self::Npm => format!("npm run {script}"),
            Self::Pnpm | Self::Yarn => format!("{} {script}", self.as_str()),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "pnpm" => Ok(Self::Pnpm),
            "yarn" => Ok(Self::Yarn),
            other => Err(DomainError::UnknownPackageManager(other.to_string())),
        }
    }
}

// ── BrowserLibrary ───────────────────────────────────────────────────────────

/// Which flavour of the browser-automation dependency the project uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserLibrary {
    /// Downloads its own browser binary on install.
    #[default]
    Bundled,
    /// Expects the user to point at an installed browser executable.
    Core,
}

impl BrowserLibrary {
    /// Environment variable the generated core-variant script reads at run
    /// time to locate the browser executable.
    pub const EXECUTABLE_PATH_ENV: &'static str = "CHROME_PATH";

    /// Environment variable that tells the bundled package to skip its
    /// browser download during install.
    pub const SKIP_DOWNLOAD_ENV: &'static str = "PUPPETEER_SKIP_DOWNLOAD";

    pub const fn package_name(&self) -> &'static str {
        match self {
            Self::Bundled => "puppeteer",
            Self::Core => "puppeteer-core",
        }
    }

    pub const fn requires_executable_path(&self) -> bool {
        matches!(self, Self::Core)
    }
}

impl fmt::Display for BrowserLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package_name())
    }
}

// ── ScriptFlavor ─────────────────────────────────────────────────────────────

/// Language of the generated entry script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFlavor {
    TypeScript,
    #[default]
    JavaScript,
}

impl ScriptFlavor {
    pub const ENTRY_STEM: &'static str = "index";

    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::JavaScript => "mjs",
        }
    }

    /// Entry script path relative to the project root.
    pub fn entry_path(&self) -> String {
        format!("src/{}.{}", Self::ENTRY_STEM, self.file_extension())
    }

    /// Command bound to both the `start` and `dev` manifest scripts.
    pub fn run_command(&self) -> String {
        match self {
            Self::TypeScript => format!("tsx {}", self.entry_path()),
            Self::JavaScript => format!("node {}", self.entry_path()),
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::JavaScript => "JavaScript",
        }
    }
}

impl fmt::Display for ScriptFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
