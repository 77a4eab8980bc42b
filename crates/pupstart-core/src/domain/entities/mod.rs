pub mod common;
pub mod manifest;
pub mod package_name;
pub mod project_plan;
pub mod scaffold_config;
pub mod script_template;

pub use crate::domain::DomainError;
pub use package_name::PackageName;
pub use project_plan::ProjectPlan;
pub use scaffold_config::ScaffoldConfig;
