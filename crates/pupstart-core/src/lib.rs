//! pupstart core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for the pupstart
//! project scaffolder.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           pupstart-cli (CLI)            │
//! │  flags + env + config → ScaffoldConfig  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (ScaffoldService: the driver)        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │      (Filesystem, CommandRunner)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   pupstart-adapters (Infrastructure)    │
//! │ (LocalFilesystem, SystemCommandRunner)  │
//! └─────────────────────────────────────────┘
//!
//!        domain::resolve(&ScaffoldConfig) → ProjectPlan
//!        (pure, no I/O, used by the service)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pupstart_core::domain::{ScaffoldConfig, resolve};
//!
//! let config = ScaffoldConfig::builder()
//!     .project_name("My Scraper")
//!     .typescript(true)
//!     .build()
//!     .unwrap();
//!
//! let plan = resolve(&config);
//! assert!(plan.contains("src/index.ts"));
//! assert!(plan.contains("tsconfig.json"));
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CommandRunner, Filesystem, PostActionFailure, ScaffoldReport, ScaffoldService,
    };
    pub use crate::domain::{
        BrowserLibrary, CommandSpec, PackageManager, PackageName, PostAction, ProjectPlan,
        ScaffoldConfig, ScriptFlavor, resolve,
    };
    pub use crate::error::{PupstartError, PupstartResult};
}
