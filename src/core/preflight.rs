use crate::config::context::LaunchContext;
use crate::domain::model::{PackageStatus, RequiredPackage};
use crate::domain::ports::PackageProbe;
use crate::utils::error::{LauncherError, Result};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Probes packages by running `python -c "import <module>"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonImportProbe;

impl PackageProbe for PythonImportProbe {
    fn is_installed(&self, python: &Path, package: &RequiredPackage) -> bool {
        let status = Command::new(python)
            .arg("-c")
            .arg(format!("import {}", package.import_name()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::debug!("Could not run {}: {}", python.display(), e);
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    pub packages: Vec<PackageStatus>,
}

impl PreflightReport {
    pub fn missing_packages(&self) -> impl Iterator<Item = &PackageStatus> {
        self.packages.iter().filter(|status| !status.installed)
    }
}

pub fn check_virtual_env(context: &LaunchContext) -> Result<()> {
    let venv_dir = context.resolve(&context.venv_dir);
    if venv_dir.is_dir() {
        Ok(())
    } else {
        Err(LauncherError::MissingVirtualEnv { path: venv_dir })
    }
}

/// Informational only: a missing package never fails the preflight.
pub fn check_packages<K: PackageProbe>(
    context: &LaunchContext,
    probe: &K,
) -> Vec<PackageStatus> {
    let python = context.resolve(&context.python);
    context
        .required_packages
        .iter()
        .map(|package| PackageStatus {
            name: package.name().to_string(),
            installed: probe.is_installed(&python, package),
        })
        .collect()
}

pub fn check_projects_config(context: &LaunchContext) -> Result<()> {
    let path = context.resolve(&context.projects_config);
    if path.is_file() {
        Ok(())
    } else {
        Err(LauncherError::MissingProjectsConfig { path })
    }
}

pub fn run_preflight<K: PackageProbe, W: Write>(
    context: &LaunchContext,
    probe: &K,
    out: &mut W,
) -> Result<PreflightReport> {
    writeln!(out, "🔍 Checking environment...")?;

    check_virtual_env(context)?;
    writeln!(out, "✅ Virtual environment: {}", context.venv_dir.display())?;

    let packages = check_packages(context, probe);
    for status in &packages {
        if status.installed {
            writeln!(out, "✅ Package: {}", status.name)?;
        } else {
            tracing::warn!("Package {} is not importable", status.name);
            writeln!(
                out,
                "⚠️  Package not installed: {} (pip install {})",
                status.name, status.name
            )?;
        }
    }

    check_projects_config(context)?;
    writeln!(
        out,
        "✅ Projects configuration: {}",
        context.projects_config.display()
    )?;

    Ok(PreflightReport { packages })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::LauncherSettings;
    use tempfile::TempDir;

    struct OnlyInstalled(&'static [&'static str]);

    impl PackageProbe for OnlyInstalled {
        fn is_installed(&self, _python: &Path, package: &RequiredPackage) -> bool {
            self.0.iter().any(|name| *name == package.import_name())
        }
    }

    fn context_in(root: &Path) -> LaunchContext {
        LaunchContext::from_settings(&LauncherSettings::default(), root)
    }

    fn prepare(root: &Path, venv: bool, projects: bool) {
        if venv {
            std::fs::create_dir_all(root.join("venv")).unwrap();
        }
        if projects {
            std::fs::create_dir_all(root.join("config")).unwrap();
            std::fs::write(root.join("config/projects.yaml"), "projects: []\n").unwrap();
        }
    }

    #[test]
    fn test_missing_venv_fails_first() {
        let root = TempDir::new().unwrap();
        prepare(root.path(), false, false);
        let mut out = Vec::new();

        let err =
            run_preflight(&context_in(root.path()), &OnlyInstalled(&[]), &mut out).unwrap_err();

        assert!(matches!(err, LauncherError::MissingVirtualEnv { .. }));
        assert_eq!(err.exit_code(), 1);
        let output = String::from_utf8(out).unwrap();
        assert!(!output.contains("Package"));
    }

    #[test]
    fn test_missing_projects_config_fails() {
        let root = TempDir::new().unwrap();
        prepare(root.path(), true, false);
        let mut out = Vec::new();

        let err =
            run_preflight(&context_in(root.path()), &OnlyInstalled(&[]), &mut out).unwrap_err();

        assert!(matches!(err, LauncherError::MissingProjectsConfig { .. }));
    }

    #[test]
    fn test_missing_packages_do_not_block() {
        let root = TempDir::new().unwrap();
        prepare(root.path(), true, true);
        let mut out = Vec::new();

        let report = run_preflight(
            &context_in(root.path()),
            &OnlyInstalled(&["requests", "yaml"]),
            &mut out,
        )
        .unwrap();

        let missing: Vec<&str> = report.missing_packages().map(|s| s.name.as_str()).collect();
        assert_eq!(missing, vec!["pandas"]);

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("✅ Package: pyyaml"));
        assert!(output.contains("Package not installed: pandas (pip install pandas)"));
        assert!(output.contains("✅ Projects configuration: config/projects.yaml"));
    }

    #[test]
    fn test_venv_must_be_a_directory() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("venv"), "not a dir").unwrap();

        assert!(check_virtual_env(&context_in(root.path())).is_err());
    }

    #[test]
    fn test_import_probe_treats_missing_interpreter_as_not_installed() {
        let root = TempDir::new().unwrap();
        let probe = PythonImportProbe;
        let package = RequiredPackage::Plain("requests".to_string());

        assert!(!probe.is_installed(&root.path().join("no-python"), &package));
    }
}
