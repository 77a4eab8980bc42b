//! The scaffold resolver: `ScaffoldConfig` in, `ProjectPlan` out.
//!
//! Pure and deterministic. Identical input yields a byte-identical plan;
//! nothing here touches the filesystem, the environment or a clock.

use std::collections::BTreeMap;

use crate::domain::{
    entities::{
        manifest::{INITIAL_VERSION, LATEST, Manifest, Scripts, TsConfig, to_json},
        project_plan::{PostAction, ProjectPlan},
        scaffold_config::ScaffoldConfig,
        script_template::ExampleScript,
    },
    value_objects::ScriptFlavor,
};

pub const MANIFEST_FILE: &str = "package.json";
pub const IGNORE_FILE: &str = ".gitignore";
pub const TSCONFIG_FILE: &str = "tsconfig.json";

/// Dev-dependencies added in TypeScript mode: a direct TS runner, runtime
/// type declarations and the compiler itself.
pub const TYPESCRIPT_DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("@types/node", "^22.0.0"),
    ("tsx", "^4.19.0"),
    ("typescript", "^5.6.0"),
];

const IGNORE_ENTRIES: &[&str] = &["node_modules/", "dist/", ".env", "*.log", ".DS_Store"];

/// Compute the full project plan for a config.
pub fn resolve(config: &ScaffoldConfig) -> ProjectPlan {
    let mut plan = ProjectPlan::new();

    plan.add_file(MANIFEST_FILE, to_json(&manifest(config)));
    plan.add_file(IGNORE_FILE, ignore_file());

    if config.use_typescript() {
        plan.add_file(TSCONFIG_FILE, to_json(&TsConfig::default()));
    }

    plan.add_file(config.flavor().entry_path().as_str(), entry_content(config));

    if config.init_version_control() {
        plan.add_post_action(PostAction::InitVersionControl {
            commit_message: config.commit_message().to_string(),
        });
    }
    if config.install_dependencies() {
        plan.add_post_action(PostAction::InstallDependencies {
            manager: config.package_manager(),
            skip_binary_download: config.skip_binary_download(),
        });
    }

    plan
}

/// Assemble the manifest record.
pub fn manifest(config: &ScaffoldConfig) -> Manifest {
    let dependencies = BTreeMap::from([(
        config.library().package_name().to_string(),
        LATEST.to_string(),
    )]);

    let dev_dependencies = match config.flavor() {
        ScriptFlavor::TypeScript => TYPESCRIPT_DEV_DEPENDENCIES
            .iter()
            .map(|(name, version)| (name.to_string(), version.to_string()))
            .collect(),
        ScriptFlavor::JavaScript => BTreeMap::new(),
    };

    Manifest {
        name: config.package_name().clone(),
        version: INITIAL_VERSION,
        private: true,
        module_type: "module",
        scripts: Scripts::same(config.flavor().run_command()),
        dependencies,
        dev_dependencies,
    }
}

fn entry_content(config: &ScaffoldConfig) -> String {
    if !config.include_example() {
        return String::new();
    }
    ExampleScript::for_variant(config.flavor(), config.library()).render()
}

fn ignore_file() -> String {
    let mut out = IGNORE_ENTRIES.join("\n");
    out.push('\n');
    out
}
