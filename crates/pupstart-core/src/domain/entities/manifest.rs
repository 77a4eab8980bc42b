//! `package.json` and `tsconfig.json` records.
//!
//! Both are plain serializable structs. Field order is the emitted key
//! order and dependency maps are `BTreeMap`s, so serialization is
//! byte-for-byte deterministic.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::entities::package_name::PackageName;

/// Version string used for every generated dependency.
pub const LATEST: &str = "latest";

/// Initial version written into a fresh manifest.
pub const INITIAL_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: PackageName,
    pub version: &'static str,
    pub private: bool,
    #[serde(rename = "type")]
    pub module_type: &'static str,
    pub scripts: Scripts,
    pub dependencies: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dev_dependencies: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scripts {
    pub start: String,
    pub dev: String,
}

impl Scripts {
    /// `start` and `dev` intentionally run the same command.
    pub fn same(command: impl Into<String>) -> Self {
        let command = command.into();
        Self {
            start: command.clone(),
            dev: command,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TsConfig {
    #[serde(rename = "compilerOptions")]
    pub compiler_options: CompilerOptions,
    pub include: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub target: &'static str,
    pub module: &'static str,
    pub module_resolution: &'static str,
    pub strict: bool,
    pub es_module_interop: bool,
    pub skip_lib_check: bool,
    pub root_dir: &'static str,
    pub out_dir: &'static str,
}

impl Default for TsConfig {
    fn default() -> Self {
        Self {
            compiler_options: CompilerOptions {
                target: "ES2022",
                module: "NodeNext",
                module_resolution: "NodeNext",
                strict: true,
                es_module_interop: true,
                skip_lib_check: true,
                root_dir: "src",
                out_dir: "dist",
            },
            include: vec!["src"],
        }
    }
}

/// Pretty-print a record as JSON with a trailing newline.
pub(crate) fn to_json<T: Serialize>(value: &T) -> String {
    // Every record here is a tree of strings, bools and string maps, which
    // `serde_json` cannot fail to serialize.
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}
