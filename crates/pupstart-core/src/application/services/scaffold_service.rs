//! Scaffold Service - the driver around the pure resolver.
//!
//! This service coordinates one scaffolding run:
//! 1. Refuse if the target already holds a `package.json`
//! 2. Resolve the plan
//! 3. Write every planned file
//! 4. Run post actions (git, then install), downgrading failures to warnings
//!
//! Steps 1-3 are fatal on error. Step 4 never fails the run.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Filesystem},
    },
    domain::{MANIFEST_FILE, PostAction, ProjectPlan, ScaffoldConfig, resolve},
    error::{PupstartError, PupstartResult},
};

/// A post action that did not complete.
#[derive(Debug, Clone)]
pub struct PostActionFailure {
    pub action: PostAction,
    /// The command line that failed.
    pub command: String,
    pub error: PupstartError,
}

/// Outcome of a successful scaffold.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub target_dir: PathBuf,
    pub plan: ProjectPlan,
    pub completed: Vec<PostAction>,
    pub failures: Vec<PostActionFailure>,
}

impl ScaffoldReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// `true` if dependencies were installed during this run.
    pub fn dependencies_installed(&self) -> bool {
        self.completed
            .iter()
            .any(|a| matches!(a, PostAction::InstallDependencies { .. }))
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use pupstart_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     filesystem, // impl Filesystem
    ///     runner,     // impl CommandRunner
    /// );
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, runner: Box<dyn CommandRunner>) -> Self {
        Self { filesystem, runner }
    }

    /// Resolve the plan without touching anything.
    pub fn plan(&self, config: &ScaffoldConfig) -> ProjectPlan {
        resolve(config)
    }

    /// Scaffold a new project into `target_dir`.
    #[instrument(
        skip_all,
        fields(
            package = %config.package_name(),
            target_dir = %target_dir.as_ref().display()
        )
    )]
    pub fn scaffold(
        &self,
        config: &ScaffoldConfig,
        target_dir: impl AsRef<Path>,
    ) -> PupstartResult<ScaffoldReport> {
        let target_dir = target_dir.as_ref();

        // 1. Existence gate
        if self.filesystem.exists(&target_dir.join(MANIFEST_FILE)) {
            return Err(ApplicationError::ProjectExists {
                path: target_dir.to_path_buf(),
            }
            .into());
        }

        // 2. Plan
        let plan = resolve(config);
        info!(files = plan.file_count(), "Plan resolved");

        // 3. Write
        self.write_plan(&plan, target_dir)?;

        // 4. Post actions
        let mut completed = Vec::new();
        let mut failures = Vec::new();
        for action in plan.post_actions() {
            match self.run_action(action, target_dir) {
                Ok(()) => completed.push(action.clone()),
                Err(failure) => failures.push(failure),
            }
        }

        info!(
            completed = completed.len(),
            failed = failures.len(),
            "Scaffold completed"
        );

        Ok(ScaffoldReport {
            target_dir: target_dir.to_path_buf(),
            plan,
            completed,
            failures,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Write the plan. On failure, remove every directory this run created.
    fn write_plan(&self, plan: &ProjectPlan, root: &Path) -> PupstartResult<()> {
        let created = self.outermost_missing(root);

        match self.write_all(plan, root) {
            Ok(()) => {
                info!("Successfully wrote all files");
                Ok(())
            }
            Err(e) => {
                if let Some(created) = created {
                    warn!("Write failed, attempting rollback");
                    self.rollback(&created);
                }
                Err(e)
            }
        }
    }

    /// The highest ancestor of `root` (itself included) that does not exist yet.
    fn outermost_missing(&self, root: &Path) -> Option<PathBuf> {
        root.ancestors()
            .take_while(|dir| !dir.as_os_str().is_empty() && !self.filesystem.exists(dir))
            .last()
            .map(Path::to_path_buf)
    }

    fn write_all(&self, plan: &ProjectPlan, root: &Path) -> PupstartResult<()> {
        self.filesystem.create_dir_all(root)?;

        for dir in plan.directories() {
            self.filesystem.create_dir_all(&root.join(dir))?;
        }

        for (path, content) in plan.files() {
            debug!(path = %path, bytes = content.len(), "Writing file");
            self.filesystem.write_file(&root.join(path), content)?;
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }

    /// Run each command of an action in order, stopping at the first failure.
    fn run_action(&self, action: &PostAction, cwd: &Path) -> Result<(), PostActionFailure> {
        info!(action = action.label(), "Running post action");

        for command in action.commands() {
            debug!(command = %command, "Spawning");
            if let Err(error) = self.runner.run(&command, cwd) {
                info!(action = action.label(), error = %error, "Post action failed");
                return Err(PostActionFailure {
                    action: action.clone(),
                    command: command.to_string(),
                    error,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockCommandRunner, MockFilesystem};
    use mockall::{Sequence, predicate::*};

    fn config(install: bool, git: bool) -> ScaffoldConfig {
        ScaffoldConfig::builder()
            .project_name("demo")
            .install_dependencies(install)
            .init_version_control(git)
            .build()
            .unwrap()
    }

    fn permissive_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs
    }

    fn failing(program: &str) -> PupstartError {
        ApplicationError::CommandFailed {
            command: program.into(),
            reason: "exit status: 1".into(),
        }
        .into()
    }

    #[test]
    fn existing_manifest_aborts_before_any_write() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(PathBuf::from("/work/demo/package.json")))
            .returning(|_| true);
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(runner));
        let err = service.scaffold(&config(true, true), "/work/demo").unwrap_err();

        assert!(matches!(
            err,
            PupstartError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn writes_every_planned_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .with(eq(PathBuf::from("/work/demo/package.json")), always())
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .with(eq(PathBuf::from("/work/demo/.gitignore")), always())
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .with(eq(PathBuf::from("/work/demo/src/index.mjs")), always())
            .times(1)
            .returning(|_, _| Ok(()));

        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(runner));
        let report = service.scaffold(&config(false, false), "/work/demo").unwrap();

        assert!(report.is_clean());
        assert!(report.completed.is_empty());
        assert_eq!(report.plan.file_count(), 3);
    }

    #[test]
    fn no_install_means_no_subprocess() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let service = ScaffoldService::new(Box::new(permissive_fs()), Box::new(runner));
        let report = service.scaffold(&config(false, false), "/work/demo").unwrap();

        assert!(!report.dependencies_installed());
    }

    #[test]
    fn git_runs_before_install() {
        let mut seq = Sequence::new();
        let mut runner = MockCommandRunner::new();
        for expected in [
            ("git", "init"),
            ("git", "add"),
            ("git", "commit"),
            ("npm", "install"),
        ] {
            runner
                .expect_run()
                .withf(move |cmd, cwd| {
                    cmd.program == expected.0
                        && cmd.args.first().map(String::as_str) == Some(expected.1)
                        && cwd == Path::new("/work/demo")
                })
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _| Ok(()));
        }

        let service = ScaffoldService::new(Box::new(permissive_fs()), Box::new(runner));
        let report = service.scaffold(&config(true, true), "/work/demo").unwrap();

        assert!(report.is_clean());
        assert_eq!(report.completed.len(), 2);
        assert!(report.dependencies_installed());
    }

    #[test]
    fn git_failure_is_a_warning_and_install_still_runs() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|cmd, _| cmd.program == "git")
            .times(1)
            .returning(|_, _| Err(failing("git")));
        runner
            .expect_run()
            .withf(|cmd, _| cmd.program == "npm")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ScaffoldService::new(Box::new(permissive_fs()), Box::new(runner));
        let report = service.scaffold(&config(true, true), "/work/demo").unwrap();

        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].action,
            PostAction::InitVersionControl { .. }
        ));
        assert_eq!(report.failures[0].command, "git init");
        assert!(report.dependencies_installed());
    }

    #[test]
    fn install_failure_is_a_warning() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|_, _| Err(failing("npm")));

        let service = ScaffoldService::new(Box::new(permissive_fs()), Box::new(runner));
        let report = service.scaffold(&config(true, false), "/work/demo").unwrap();

        assert!(!report.is_clean());
        assert!(!report.dependencies_installed());
    }

    #[test]
    fn write_failure_propagates_and_rolls_back_new_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(PathBuf::from("/work")))
            .returning(|_| true);
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|p, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .with(eq(PathBuf::from("/work/demo")))
            .times(1)
            .returning(|_| Ok(()));

        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(runner));
        let err = service.scaffold(&config(true, true), "/work/demo").unwrap_err();

        assert!(matches!(
            err,
            PupstartError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn write_failure_keeps_preexisting_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(PathBuf::from("/work/demo")))
            .returning(|_| true);
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|p, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(MockCommandRunner::new()));
        assert!(service.scaffold(&config(false, false), "/work/demo").is_err());
    }

    #[test]
    fn write_failure_rolls_back_created_parents() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(PathBuf::from("/work")))
            .returning(|_| true);
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|p, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .with(eq(PathBuf::from("/work/a")))
            .times(1)
            .returning(|_| Ok(()));

        let service = ScaffoldService::new(Box::new(fs), Box::new(MockCommandRunner::new()));
        assert!(service.scaffold(&config(false, false), "/work/a/b/c").is_err());
    }

    #[test]
    fn relative_target_rolls_back_its_first_component() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|p, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .with(eq(PathBuf::from("a")))
            .times(1)
            .returning(|_| Ok(()));

        let service = ScaffoldService::new(Box::new(fs), Box::new(MockCommandRunner::new()));
        assert!(service.scaffold(&config(false, false), "a/b").is_err());
    }
}
