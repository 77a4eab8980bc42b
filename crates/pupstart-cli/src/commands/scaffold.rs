//! The scaffold command: the default (and only) action of `pupstart`.
//!
//! Responsibility: turn flags, environment and config into a
//! `ScaffoldConfig`, hand it to the core service, and report the outcome.
//! No planning logic lives here.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use pupstart_adapters::{LocalFilesystem, SystemCommandRunner};
use pupstart_core::{
    application::{ScaffoldReport, ScaffoldService},
    domain::{BrowserLibrary, MANIFEST_FILE, PackageManager, PostAction, ProjectPlan, ScaffoldConfig},
};

use crate::{
    cli::{Cli, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Set by npm, pnpm and yarn for every process they launch.
const USER_AGENT_ENV: &str = "npm_config_user_agent";

/// Execute a scaffold run.
///
/// Sequence:
/// 1. Obtain the project name (positional or prompt)
/// 2. Resolve the target path and package manager
/// 3. Build the `ScaffoldConfig`
/// 4. Early-exit with a preview if `--dry-run`
/// 5. Scaffold via `ScaffoldService`
/// 6. Print warnings, summary and next steps
#[instrument(skip_all)]
pub fn execute(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // 1. Name
    let raw_name = match cli.name.as_deref() {
        Some(name) => name.to_string(),
        None => prompt_project_name()?,
    };
    let raw_name = raw_name.trim();
    if raw_name.is_empty() {
        return Err(CliError::MissingProjectName);
    }

    // 2. Path and package manager
    let (project_name, project_path) = resolve_project_path(raw_name)?;
    let user_agent = std::env::var(USER_AGENT_ENV).ok();
    let package_manager = resolve_package_manager(
        cli.forced_package_manager(),
        user_agent.as_deref(),
        config.defaults.package_manager,
    );

    // 3. Config
    let scaffold_config = build_config(&cli, &config, &project_name, package_manager)?;
    debug!(
        config = %scaffold_config,
        path = %project_path.display(),
        "Scaffold config resolved"
    );

    let service = ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(SystemCommandRunner::new()),
    );

    // 4. Dry run
    if cli.dry_run {
        let plan = service.plan(&scaffold_config);
        return show_dry_run(&scaffold_config, &plan, &project_path, &output);
    }

    // 5. Scaffold
    output.header(&format!(
        "Creating '{}' in {}...",
        project_name,
        project_path.display()
    ))?;
    info!(project = %project_name, path = %project_path.display(), "Scaffold started");

    let report = service
        .scaffold(&scaffold_config, &project_path)
        .with_cli_context(|| "scaffolding project")?;

    output.success(&format!(
        "Wrote {} files to {}",
        report.plan.file_count(),
        project_path.display()
    ))?;

    // 6. Report
    show_failures(&report, &output)?;
    show_summary(&scaffold_config, &output)?;
    show_next_steps(&scaffold_config, &report, &output)?;

    Ok(())
}

// ── Input resolution ──────────────────────────────────────────────────────────

/// Split the positional argument into the project name (the final path
/// component) and the full target directory.
///
/// `.` and `..` resolve to the name of the directory they point at.
pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let leaf = match path.file_name() {
        Some(leaf) => leaf.to_os_string(),
        None => path
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_os_string()))
            .ok_or_else(|| CliError::InvalidProjectName {
                name: name.into(),
                reason: "cannot extract a directory name".into(),
            })?,
    };

    let project_name = leaf
        .to_str()
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "name is not valid UTF-8".into(),
        })?
        .to_string();

    Ok((project_name, path.to_path_buf()))
}

/// Flag, then the invoking package manager, then config, then npm.
pub fn resolve_package_manager(
    forced: Option<PackageManager>,
    user_agent: Option<&str>,
    configured: Option<PackageManager>,
) -> PackageManager {
    forced
        .or_else(|| user_agent.and_then(PackageManager::from_user_agent))
        .or(configured)
        .unwrap_or_default()
}

fn build_config(
    cli: &Cli,
    config: &AppConfig,
    project_name: &str,
    package_manager: PackageManager,
) -> CliResult<ScaffoldConfig> {
    let mut builder = ScaffoldConfig::builder()
        .project_name(project_name)
        .package_manager(package_manager)
        .typescript(cli.typescript)
        .core_variant(cli.core)
        .skip_binary_download(cli.skip_chromium)
        .init_version_control(cli.git)
        .install_dependencies(!cli.no_install)
        .include_example(!cli.no_example)
        .commit_message(config.git.commit_message.as_str());

    if let Some(name) = &cli.package_name {
        builder = builder.package_name(name.as_str());
    }

    builder.build().map_err(|e| CliError::Core(e.into()))
}

// ── Prompt ────────────────────────────────────────────────────────────────────

/// Ask for the project name. Returns whatever was typed, possibly empty.
fn prompt_project_name() -> CliResult<String> {
    #[cfg(feature = "interactive")]
    if io::stdin().is_terminal() {
        return dialoguer::Input::<String>::new()
            .with_prompt("Project name")
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)
            .with_cli_context(|| "reading project name");
    }

    read_line_prompt()
}

fn read_line_prompt() -> CliResult<String> {
    let mut stderr = io::stderr();
    if io::stdin().is_terminal() {
        write!(stderr, "Project name: ").with_cli_context(|| "writing prompt")?;
        stderr.flush().with_cli_context(|| "flushing prompt")?;
    }

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "reading project name")?;
    Ok(input)
}

// ── Reporting ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct DryRun<'a> {
    target_dir: &'a Path,
    config: &'a ScaffoldConfig,
    plan: &'a ProjectPlan,
}

fn show_dry_run(
    config: &ScaffoldConfig,
    plan: &ProjectPlan,
    target_dir: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    if out.format() == OutputFormat::Json {
        return out
            .json(&DryRun {
                target_dir,
                config,
                plan,
            })
            .map_err(|source| CliError::Render { source });
    }

    out.info(&format!(
        "Dry run: would create '{}' at {}",
        config.project_name(),
        target_dir.display()
    ))?;
    if target_dir.join(MANIFEST_FILE).exists() {
        out.warning(&format!(
            "{} already exists there, a real run would stop",
            MANIFEST_FILE
        ))?;
    }

    out.header("Files")?;
    for (path, content) in plan.files() {
        out.print(&format!("  {path} ({} bytes)", content.len()))?;
    }

    if !plan.post_actions().is_empty() {
        out.header("Commands")?;
        for action in plan.post_actions() {
            for command in action.commands() {
                out.command(&command.to_string())?;
            }
        }
    }
    Ok(())
}

fn show_failures(report: &ScaffoldReport, out: &OutputManager) -> CliResult<()> {
    for failure in &report.failures {
        match &failure.action {
            PostAction::InitVersionControl { .. } => {
                out.warning(&format!(
                    "Could not initialise a git repository: {}",
                    failure.error
                ))?;
            }
            PostAction::InstallDependencies { .. } => {
                out.warning(&format!("Dependency install failed: {}", failure.error))?;
                out.warning(&format!(
                    "Retry manually: cd {} && {}",
                    report.target_dir.display(),
                    failure.command
                ))?;
            }
        }
    }
    Ok(())
}

fn show_summary(config: &ScaffoldConfig, out: &OutputManager) -> CliResult<()> {
    out.print("")?;
    out.header("Summary")?;
    out.field("Package", config.package_name().as_str())?;
    out.field("Package manager", config.package_manager().as_str())?;
    out.field("Template", config.flavor().label())?;
    out.field("Browser library", config.library().package_name())?;

    if config.library().requires_executable_path() {
        out.print("")?;
        out.info(&format!(
            "Set {} to your Chrome or Chromium executable before running the script",
            BrowserLibrary::EXECUTABLE_PATH_ENV
        ))?;
    }
    Ok(())
}

fn show_next_steps(
    config: &ScaffoldConfig,
    report: &ScaffoldReport,
    out: &OutputManager,
) -> CliResult<()> {
    let manager = config.package_manager();

    out.print("")?;
    out.header("Next steps")?;
    out.command(&format!("cd {}", report.target_dir.display()))?;
    if !report.dependencies_installed() {
        out.command(&manager.install_command())?;
    }
    if config.library().requires_executable_path() {
        out.command(&format!(
            "export {}=/path/to/chrome",
            BrowserLibrary::EXECUTABLE_PATH_ENV
        ))?;
    }
    out.command(&manager.run_command("start"))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
