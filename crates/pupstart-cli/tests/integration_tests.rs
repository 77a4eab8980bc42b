//! Integration tests for the pupstart binary.
//!
//! Every scaffold run passes `--no-install` so no package manager is ever
//! spawned.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `pupstart` command isolated from the caller's environment.
fn pupstart(cwd: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("pupstart");
    cmd.current_dir(cwd)
        .env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env_remove("npm_config_user_agent")
        .env_remove("RUST_LOG");
    cmd
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    pupstart(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--use-pnpm"))
        .stdout(predicate::str::contains("--skip-chromium"))
        .stdout(predicate::str::contains("--package-name"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    pupstart(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_default_project() {
    let temp = TempDir::new().unwrap();

    pupstart(temp.path())
        .args(["my-bot", "--no-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("npm install"))
        .stdout(predicate::str::contains("npm run start"));

    let project = temp.path().join("my-bot");
    let manifest = read(project.join("package.json"));
    assert!(manifest.contains("\"name\": \"my-bot\""));
    assert!(manifest.contains("\"puppeteer\": \"latest\""));
    assert!(manifest.contains("\"start\": \"node src/index.mjs\""));
    assert!(!manifest.contains("devDependencies"));

    let entry = read(project.join("src/index.mjs"));
    assert!(entry.contains("from 'puppeteer'"));
    assert!(entry.contains("https://example.com"));

    assert!(project.join(".gitignore").exists());
    assert!(!project.join("tsconfig.json").exists());
    assert!(!project.join("src/index.ts").exists());
}

#[test]
fn test_typescript_core_project() {
    let temp = TempDir::new().unwrap();

    pupstart(temp.path())
        .args(["ts-bot", "--ts", "--core", "--no-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("puppeteer-core"))
        .stdout(predicate::str::contains("CHROME_PATH"));

    let project = temp.path().join("ts-bot");
    let manifest = read(project.join("package.json"));
    assert!(manifest.contains("\"puppeteer-core\": \"latest\""));
    assert!(!manifest.contains("\"puppeteer\": "));
    assert!(manifest.contains("\"tsx\""));
    assert!(manifest.contains("\"start\": \"tsx src/index.ts\""));

    let entry = read(project.join("src/index.ts"));
    assert!(entry.contains("executablePath: process.env.CHROME_PATH"));

    assert!(project.join("tsconfig.json").exists());
    assert!(!project.join("src/index.mjs").exists());
}

#[test]
fn test_no_example_writes_empty_entry() {
    let temp = TempDir::new().unwrap();

    pupstart(temp.path())
        .args(["bare", "--no-example", "--no-install"])
        .assert()
        .success();

    assert_eq!(read(temp.path().join("bare/src/index.mjs")), "");
}

#[test]
fn test_name_is_sanitized_for_manifest() {
    let temp = TempDir::new().unwrap();

    pupstart(temp.path())
        .args(["My Scraper!", "--no-install"])
        .assert()
        .success();

    let manifest = read(temp.path().join("My Scraper!/package.json"));
    assert!(manifest.contains("\"name\": \"my-scraper-\""));
}

#[test]
fn test_explicit_package_name() {
    let temp = TempDir::new().unwrap();

    pupstart(temp.path())
        .args(["bot", "--package-name", "@acme/bot", "--no-install"])
        .assert()
        .success();

    assert!(read(temp.path().join("bot/package.json")).contains("\"name\": \"@acme/bot\""));
}

#[test]
fn test_package_manager_flag_drives_next_steps() {
    let temp = TempDir::new().unwrap();

    pupstart(temp.path())
        .args(["bot", "--use-pnpm", "--no-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pnpm install"))
        .stdout(predicate::str::contains("pnpm start"));
}

#[test]
fn test_user_agent_detection() {
    let temp = TempDir::new().unwrap();

    pupstart(temp.path())
        .env("npm_config_user_agent", "yarn/1.22.22 npm/? node/v20.11.0")
        .args(["bot", "--no-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("yarn start"));
}

#[test]
fn test_config_file_default_package_manager() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pupstart.toml");
    fs::write(&config, "[defaults]\npackage_manager = \"pnpm\"\n").unwrap();

    pupstart(temp.path())
        .args(["bot", "--no-install", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("pnpm start"));
}

#[test]
fn test_name_read_from_stdin() {
    let temp = TempDir::new().unwrap();

    pupstart(temp.path())
        .arg("--no-install")
        .write_stdin("piped-bot\n")
        .assert()
        .success();

    assert!(temp.path().join("piped-bot/package.json").exists());
}

#[test]
fn test_scaffold_into_existing_empty_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("empty")).unwrap();

    pupstart(temp.path())
        .args(["empty", "--no-install"])
        .assert()
        .success();

    assert!(temp.path().join("empty/package.json").exists());
}

#[test]
fn test_git_failure_is_only_a_warning() {
    let temp = TempDir::new().unwrap();

    // With an empty PATH `git` cannot be found.
    pupstart(temp.path())
        .env("PATH", "")
        .args(["bot", "--git", "--no-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not initialise a git repository"))
        .stderr(predicate::str::contains("Post action failed").not());

    assert!(temp.path().join("bot/package.json").exists());
}

#[test]
fn test_install_failure_is_only_a_warning() {
    let temp = TempDir::new().unwrap();

    // With an empty PATH `pnpm` cannot be found.
    pupstart(temp.path())
        .env("PATH", "")
        .args(["bot", "--use-pnpm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependency install failed"))
        .stdout(predicate::str::contains("Retry manually: cd bot && pnpm install"));

    assert!(temp.path().join("bot/package.json").exists());
}

#[test]
fn test_no_color_env_values() {
    let temp = TempDir::new().unwrap();

    for value in ["1", ""] {
        pupstart(temp.path())
            .env("NO_COLOR", value)
            .args(["dry", "--dry-run"])
            .assert()
            .success()
            .stdout(predicate::str::contains("package.json"));
    }
}

#[test]
fn test_piped_output_has_no_ansi_codes() {
    let temp = TempDir::new().unwrap();

    for format in ["auto", "plain"] {
        pupstart(temp.path())
            .env_remove("NO_COLOR")
            .args(["dry", "--dry-run", "--output-format", format])
            .assert()
            .success()
            .stdout(predicate::str::contains("package.json"))
            .stdout(predicate::str::contains("\u{1b}[").not());
    }
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();

    pupstart(temp.path())
        .args(["dry", "--dry-run", "--git"])
        .assert()
        .success()
        .stdout(predicate::str::contains("package.json"))
        .stdout(predicate::str::contains("src/index.mjs"))
        .stdout(predicate::str::contains("git init"))
        .stdout(predicate::str::contains("npm install"));

    assert!(!temp.path().join("dry").exists());
}

#[test]
fn test_dry_run_json() {
    let temp = TempDir::new().unwrap();

    let assert = pupstart(temp.path())
        .args(["dry", "--dry-run", "--ts", "--output-format", "json"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let files = json["plan"]["files"].as_object().unwrap();
    assert!(files.contains_key("src/index.ts"));
    assert!(files.contains_key("tsconfig.json"));
    assert_eq!(json["plan"]["post_actions"][0]["action"], "install_dependencies");
    assert!(!temp.path().join("dry").exists());
}

#[test]
fn test_completions_bash() {
    let temp = TempDir::new().unwrap();

    pupstart(temp.path())
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pupstart"));
}
