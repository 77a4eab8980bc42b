//! Infrastructure adapters for pupstart.
//!
//! This crate implements the ports defined in `pupstart-core::application::ports`.
//! It contains all filesystem and subprocess I/O.

pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{RecordingCommandRunner, SystemCommandRunner};

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pupstart_core::prelude::*;

    use super::*;

    fn service(fs: &MemoryFilesystem, runner: &RecordingCommandRunner) -> ScaffoldService {
        ScaffoldService::new(Box::new(fs.clone()), Box::new(runner.clone()))
    }

    #[test]
    fn scaffold_into_memory_runs_git_then_install() {
        let fs = MemoryFilesystem::new();
        let runner = RecordingCommandRunner::new();
        let config = ScaffoldConfig::builder()
            .project_name("bot")
            .package_manager(PackageManager::Pnpm)
            .init_version_control(true)
            .skip_binary_download(true)
            .build()
            .unwrap();

        let report = service(&fs, &runner).scaffold(&config, "/work/bot").unwrap();

        assert!(report.is_clean());
        assert!(report.dependencies_installed());
        assert!(fs.read_file(Path::new("/work/bot/package.json")).is_some());
        assert!(fs.read_file(Path::new("/work/bot/src/index.mjs")).is_some());
        assert_eq!(
            runner.command_lines(),
            vec![
                "git init",
                "git add -A",
                "git commit -m \"Initial commit from pupstart\"",
                "PUPPETEER_SKIP_DOWNLOAD=1 pnpm install",
            ]
        );
        assert!(runner
            .recorded()
            .iter()
            .all(|r| r.cwd == Path::new("/work/bot")));
    }

    #[test]
    fn failed_install_keeps_files_and_reports_warning() {
        let fs = MemoryFilesystem::new();
        let runner = RecordingCommandRunner::new().failing("npm");
        let config = ScaffoldConfig::builder().project_name("bot").build().unwrap();

        let report = service(&fs, &runner).scaffold(&config, "/work/bot").unwrap();

        assert!(!report.is_clean());
        assert!(!report.dependencies_installed());
        assert_eq!(report.failures[0].command, "npm install");
        assert_eq!(fs.list_files().len(), 3);
    }

    #[test]
    fn existing_manifest_is_left_alone() {
        let fs = MemoryFilesystem::new().with_file("/work/bot/package.json", "{}");
        let runner = RecordingCommandRunner::new();
        let config = ScaffoldConfig::builder().project_name("bot").build().unwrap();

        assert!(service(&fs, &runner).scaffold(&config, "/work/bot").is_err());
        assert_eq!(
            fs.read_file(Path::new("/work/bot/package.json")).as_deref(),
            Some("{}")
        );
        assert!(runner.recorded().is_empty());
    }
}
