use crate::config::toml_config::LauncherSettings;
use crate::domain::model::{Invocation, RequiredPackage};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Output locations of the main program, as configured (relative to the root
/// unless absolute).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    pub reports: PathBuf,
    pub history: PathBuf,
    pub logs: PathBuf,
}

/// Everything a launch needs, resolved once from settings and CLI overrides.
///
/// All filesystem access goes through [`LaunchContext::resolve`] so the
/// launcher never depends on the process working directory.
#[derive(Debug, Clone)]
pub struct LaunchContext {
    pub root: PathBuf,
    pub venv_dir: PathBuf,
    pub python: PathBuf,
    pub script: String,
    pub program_args: Vec<String>,
    pub program_env: BTreeMap<String, String>,
    pub projects_config: PathBuf,
    pub required_packages: Vec<RequiredPackage>,
    pub outputs: OutputDirs,
    pub create_output_dirs: bool,
    pub monitor: bool,
    pub sample_interval: Duration,
}

impl LaunchContext {
    pub fn from_settings(settings: &LauncherSettings, root: impl Into<PathBuf>) -> Self {
        let venv_dir = PathBuf::from(&settings.environment.venv_dir);
        let python = settings
            .environment
            .python
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| default_python(&venv_dir));

        Self {
            root: root.into(),
            venv_dir,
            python,
            script: settings.program.script.clone(),
            program_args: settings.program.args.clone(),
            program_env: settings.program.env.clone(),
            projects_config: PathBuf::from(&settings.projects.config),
            required_packages: settings.environment.required_packages.clone(),
            outputs: OutputDirs {
                reports: PathBuf::from(&settings.outputs.reports),
                history: PathBuf::from(&settings.outputs.history),
                logs: PathBuf::from(&settings.outputs.logs),
            },
            create_output_dirs: settings.outputs.create,
            monitor: settings.monitoring.enabled,
            sample_interval: Duration::from_millis(settings.monitoring.sample_interval_ms),
        }
    }

    /// Arguments appended after the configured program arguments.
    pub fn with_extra_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.program_args.extend(args);
        self
    }

    pub fn with_monitor(mut self, monitor: bool) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn output_dirs(&self) -> [&Path; 3] {
        [
            self.outputs.reports.as_path(),
            self.outputs.history.as_path(),
            self.outputs.logs.as_path(),
        ]
    }

    pub fn invocation(&self) -> Invocation {
        let mut args = Vec::with_capacity(self.program_args.len() + 1);
        args.push(self.script.clone());
        args.extend(self.program_args.iter().cloned());

        Invocation {
            program: self.resolve(&self.python),
            args,
            working_dir: self.root.clone(),
            env: self.program_env.clone(),
        }
    }
}

fn default_python(venv_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_dir.join("Scripts").join("python.exe")
    } else {
        venv_dir.join("bin").join("python")
    }
}
