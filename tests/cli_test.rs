use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const PROJECTS_YAML: &str = r#"
projects:
  - name: Shop
    domain: shop.example.com
    keywords:
      - search engine optimization basics
  - name: Blog
    keywords: []
"#;

fn launcher(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("seo-launcher").unwrap();
    cmd.current_dir(root)
        .env_remove("SEO_LAUNCHER_CONFIG")
        .env("RUST_LOG", "seo_launcher=info");
    cmd
}

fn project_with(venv: bool, projects: Option<&str>) -> TempDir {
    let root = TempDir::new().unwrap();
    if venv {
        std::fs::create_dir_all(root.path().join("venv/bin")).unwrap();
    }
    if let Some(yaml) = projects {
        std::fs::create_dir_all(root.path().join("config")).unwrap();
        std::fs::write(root.path().join("config/projects.yaml"), yaml).unwrap();
    }
    root
}

/// Runs the "main program" as a shell script through /bin/sh.
#[cfg(unix)]
fn with_shell_agent(root: &Path, body: &str) {
    std::fs::write(
        root.join("seo-launcher.toml"),
        "[environment]\npython = \"/bin/sh\"\n\n[program]\nscript = \"agent.sh\"\n",
    )
    .unwrap();
    std::fs::write(root.join("agent.sh"), body).unwrap();
}

#[test]
fn test_missing_venv_exits_with_one() {
    let root = project_with(false, Some(PROJECTS_YAML));

    launcher(root.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Shop").not())
        .stderr(predicate::str::contains("Virtual environment"));
}

#[test]
fn test_missing_projects_file_exits_with_one() {
    let root = project_with(true, None);

    launcher(root.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Projects configuration"));
}

#[test]
fn test_invalid_settings_exit_with_one() {
    let root = project_with(true, Some(PROJECTS_YAML));
    std::fs::write(
        root.path().join("seo-launcher.toml"),
        "[monitoring]\nsample_interval_ms = 1\n",
    )
    .unwrap();

    launcher(root.path()).assert().code(1);
}

#[test]
fn test_dry_run_prints_summary() {
    let root = project_with(true, Some(PROJECTS_YAML));

    launcher(root.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. Shop"))
        .stdout(predicate::str::contains("search engine optimization bas..."))
        .stdout(predicate::str::contains("  2. Blog"))
        .stdout(predicate::str::contains("Keywords: 0"))
        .stdout(predicate::str::contains("Dry run, would execute:"));
}

#[test]
fn test_project_dir_flag_replaces_working_directory() {
    let root = project_with(true, Some(PROJECTS_YAML));
    let elsewhere = TempDir::new().unwrap();

    launcher(elsewhere.path())
        .arg("--project-dir")
        .arg(root.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. Shop"));
}

#[test]
fn test_declining_the_prompt_exits_cleanly() {
    let root = project_with(true, Some(PROJECTS_YAML));

    launcher(root.path())
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Launch cancelled"));

    assert!(!root.path().join("logs").exists());
}

#[cfg(unix)]
#[test]
fn test_program_exit_code_is_propagated() {
    let root = project_with(true, Some(PROJECTS_YAML));
    with_shell_agent(root.path(), "exit 3\n");

    launcher(root.path())
        .arg("--yes")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("SEO check failed (exit code 3)"));
}

#[cfg(unix)]
#[test]
fn test_successful_run_reports_output_dirs() {
    let root = project_with(true, Some(PROJECTS_YAML));
    with_shell_agent(root.path(), "echo \"args: $*\" > logs/agent.log\n");

    launcher(root.path())
        .write_stdin("y\n")
        .arg("--")
        .arg("--engine")
        .arg("yandex")
        .assert()
        .success()
        .stdout(predicate::str::contains("SEO check completed successfully"))
        .stdout(predicate::str::contains("Reports: data/reports"));

    let log = std::fs::read_to_string(root.path().join("logs/agent.log")).unwrap();
    assert_eq!(log.trim(), "args: --engine yandex");
    assert!(root.path().join("data/history").is_dir());
}

#[cfg(unix)]
#[test]
fn test_broken_projects_file_still_launches() {
    let root = project_with(true, Some("projects: [unclosed\n"));
    with_shell_agent(root.path(), "exit 0\n");

    launcher(root.path())
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to read projects configuration"))
        .stdout(predicate::str::contains("SEO check completed successfully"));
}
