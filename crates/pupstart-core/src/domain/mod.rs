// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for pupstart.
//!
//! This module contains pure planning logic. All I/O (writing files,
//! spawning `git` or a package manager) is handled via ports defined in
//! the application layer.
//!
//! - **No I/O**: No filesystem, environment or process access
//! - **No tracing**: observability belongs to the outer layers
//! - **Immutable values**: `ScaffoldConfig` and `ProjectPlan` are built
//!   once and consumed
pub mod entities;
pub mod error;
pub mod resolver;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    manifest::{Manifest, Scripts, TsConfig},
    package_name::PackageName,
    project_plan::{CommandSpec, PostAction, ProjectPlan},
    scaffold_config::{
        DEFAULT_COMMIT_MESSAGE, HasName, NoName, ScaffoldConfig, ScaffoldConfigBuilder,
    },
    script_template::{EXAMPLE_URL, ExampleScript},
};

pub use error::{DomainError, ErrorCategory};

pub use resolver::{IGNORE_FILE, MANIFEST_FILE, TSCONFIG_FILE, resolve};

pub use value_objects::{BrowserLibrary, PackageManager, ScriptFlavor};
