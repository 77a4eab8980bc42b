use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::{
    entities::common::RelativePath,
    value_objects::{BrowserLibrary, PackageManager},
};

/// The resolver's output: every file to write plus the ordered follow-up
/// actions.
///
/// This is the output of the planning step.
/// It contains no business logic, only data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPlan {
    pub(crate) files: BTreeMap<RelativePath, String>,
    pub(crate) post_actions: Vec<PostAction>,
}

impl ProjectPlan {
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            post_actions: Vec::new(),
        }
    }

    pub fn add_file(&mut self, path: impl Into<RelativePath>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn add_post_action(&mut self, action: PostAction) {
        self.post_actions.push(action);
    }

    pub fn with_file(mut self, path: impl Into<RelativePath>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn files(&self) -> impl Iterator<Item = (&RelativePath, &str)> {
        self.files.iter().map(|(p, c)| (p, c.as_str()))
    }

    /// Planned content of `path`, or `None` if it is not in the plan.
    pub fn file(&self, path: &str) -> Option<&str> {
        let key = RelativePath::try_new(path).ok()?;
        self.files.get(&key).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.file(path).is_some()
    }

    /// Distinct parent directories of every file, shallowest first.
    pub fn directories(&self) -> Vec<&std::path::Path> {
        let mut dirs: Vec<_> = self.files.keys().filter_map(RelativePath::parent).collect();
        dirs.sort();
        dirs.dedup();
        dirs
    }

    pub fn post_actions(&self) -> &[PostAction] {
        &self.post_actions
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl Default for ProjectPlan {
    fn default() -> Self {
        Self::new()
    }
}

/// A side effect to run after the files are written, in plan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PostAction {
    InitVersionControl {
        commit_message: String,
    },
    InstallDependencies {
        manager: PackageManager,
        skip_binary_download: bool,
    },
}

impl PostAction {
    /// The subprocesses this action runs, in order. Any failure stops the
    /// remaining steps of the same action.
    pub fn commands(&self) -> Vec<CommandSpec> {
        match self {
            Self::InitVersionControl { commit_message } => vec![
                CommandSpec::new("git", ["init"]),
                CommandSpec::new("git", ["add", "-A"]),
                CommandSpec::new("git", ["commit", "-m", commit_message.as_str()]),
            ],
            Self::InstallDependencies {
                manager,
                skip_binary_download,
            } => {
                let mut cmd = CommandSpec::new(manager.as_str(), manager.install_args().iter().copied());
                if *skip_binary_download {
                    cmd = cmd.env(BrowserLibrary::SKIP_DOWNLOAD_ENV, "1");
                }
                vec![cmd]
            }
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::InitVersionControl { .. } => "git init",
            Self::InstallDependencies { .. } => "dependency install",
        }
    }
}

/// A subprocess invocation described as data.
///
/// `env` entries are applied to the child only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: Vec::new(),
        }
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in &self.env {
            write!(f, "{k}={v} ")?;
        }
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}
