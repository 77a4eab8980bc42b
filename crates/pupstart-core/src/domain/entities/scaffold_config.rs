//! The `ScaffoldConfig` value and its typestate builder.
//!
//! A `ScaffoldConfig` is the fully-resolved description of one invocation.
//! It is assembled once at the CLI boundary (flags, detected package
//! manager, config-file defaults) and then handed by value to the resolver
//! and the driver. Nothing downstream reads process state.
//!
//! # Typestate builder
//!
//! The builder uses two phantom marker types (`NoName` / `HasName`) to
//! enforce at *compile time* that a project name is supplied before
//! `build()` is reachable. Runtime validation still rejects an empty name.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

use crate::domain::{
    entities::package_name::PackageName,
    error::DomainError,
    value_objects::{BrowserLibrary, PackageManager, ScriptFlavor},
};

/// Default first-commit message when version control is initialised.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Initial commit from pupstart";

/// Immutable input to the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldConfig {
    project_name: String,
    package_name: PackageName,
    package_manager: PackageManager,
    flavor: ScriptFlavor,
    library: BrowserLibrary,
    skip_binary_download: bool,
    init_version_control: bool,
    install_dependencies: bool,
    include_example: bool,
    commit_message: String,
}

impl ScaffoldConfig {
    /// Start building a new `ScaffoldConfig`.
    pub fn builder() -> ScaffoldConfigBuilder<NoName> {
        ScaffoldConfigBuilder::new()
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }
    pub fn package_name(&self) -> &PackageName {
        &self.package_name
    }
    pub const fn package_manager(&self) -> PackageManager {
        self.package_manager
    }
    pub const fn flavor(&self) -> ScriptFlavor {
        self.flavor
    }
    pub const fn library(&self) -> BrowserLibrary {
        self.library
    }
    pub const fn use_typescript(&self) -> bool {
        matches!(self.flavor, ScriptFlavor::TypeScript)
    }
    pub const fn use_core_variant(&self) -> bool {
        matches!(self.library, BrowserLibrary::Core)
    }
    pub const fn skip_binary_download(&self) -> bool {
        self.skip_binary_download
    }
    pub const fn init_version_control(&self) -> bool {
        self.init_version_control
    }
    pub const fn install_dependencies(&self) -> bool {
        self.install_dependencies
    }
    pub const fn include_example(&self) -> bool {
        self.include_example
    }
    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }
}

impl fmt::Display for ScaffoldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} + {}, {})",
            self.package_name, self.flavor, self.library, self.package_manager
        )
    }
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: project name has not yet been set.
pub struct NoName;
/// Marker: project name has been set; the config may now be built.
pub struct HasName;

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`ScaffoldConfig`].
pub struct ScaffoldConfigBuilder<N> {
    project_name: Option<String>,
    package_name: Option<String>,
    package_manager: PackageManager,
    flavor: ScriptFlavor,
    library: BrowserLibrary,
    skip_binary_download: bool,
    init_version_control: bool,
    install_dependencies: bool,
    include_example: bool,
    commit_message: Option<String>,
    _marker: PhantomData<N>,
}

impl ScaffoldConfigBuilder<NoName> {
    pub fn new() -> Self {
        Self {
            project_name: None,
            package_name: None,
            package_manager: PackageManager::default(),
            flavor: ScriptFlavor::default(),
            library: BrowserLibrary::default(),
            skip_binary_download: false,
            init_version_control: false,
            install_dependencies: true,
            include_example: true,
            commit_message: None,
            _marker: PhantomData,
        }
    }

    /// Set the project name. This transitions the builder to `HasName`.
    pub fn project_name(self, name: impl Into<String>) -> ScaffoldConfigBuilder<HasName> {
        ScaffoldConfigBuilder {
            project_name: Some(name.into()),
            package_name: self.package_name,
            package_manager: self.package_manager,
            flavor: self.flavor,
            library: self.library,
            skip_binary_download: self.skip_binary_download,
            init_version_control: self.init_version_control,
            install_dependencies: self.install_dependencies,
            include_example: self.include_example,
            commit_message: self.commit_message,
            _marker: PhantomData,
        }
    }
}

impl Default for ScaffoldConfigBuilder<NoName> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> ScaffoldConfigBuilder<N> {
    /// Override the derived package name. Validated at `build()`.
    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    pub fn package_manager(mut self, manager: PackageManager) -> Self {
        self.package_manager = manager;
        self
    }

    pub fn typescript(mut self, enabled: bool) -> Self {
        self.flavor = if enabled {
            ScriptFlavor::TypeScript
        } else {
            ScriptFlavor::JavaScript
        };
        self
    }

    pub fn core_variant(mut self, enabled: bool) -> Self {
        self.library = if enabled {
            BrowserLibrary::Core
        } else {
            BrowserLibrary::Bundled
        };
        self
    }

    pub fn skip_binary_download(mut self, skip: bool) -> Self {
        self.skip_binary_download = skip;
        self
    }

    pub fn init_version_control(mut self, enabled: bool) -> Self {
        self.init_version_control = enabled;
        self
    }

    pub fn install_dependencies(mut self, enabled: bool) -> Self {
        self.install_dependencies = enabled;
        self
    }

    pub fn include_example(mut self, enabled: bool) -> Self {
        self.include_example = enabled;
        self
    }

    pub fn commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = Some(message.into());
        self
    }
}

impl ScaffoldConfigBuilder<HasName> {
    /// Validate and build the config.
    ///
    /// # Errors
    ///
    /// - `InvalidProjectName` when the name is empty or whitespace.
    /// - `InvalidPackageName` when an explicit override is not a valid name.
    pub fn build(self) -> Result<ScaffoldConfig, DomainError> {
        let project_name = self
            .project_name
            .ok_or(DomainError::MissingRequiredField {
                field: "project_name",
            })?;

        if project_name.trim().is_empty() {
            return Err(DomainError::InvalidProjectName {
                name: project_name,
                reason: "name cannot be empty".into(),
            });
        }

        let package_name = match self.package_name {
            Some(explicit) => PackageName::parse(&explicit)?,
            None => PackageName::derive(&project_name),
        };

        let commit_message = self
            .commit_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_string());

        Ok(ScaffoldConfig {
            project_name,
            package_name,
            package_manager: self.package_manager,
            flavor: self.flavor,
            library: self.library,
            skip_binary_download: self.skip_binary_download,
            init_version_control: self.init_version_control,
            install_dependencies: self.install_dependencies,
            include_example: self.include_example,
            commit_message,
        })
    }
}
