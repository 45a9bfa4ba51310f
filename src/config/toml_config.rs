use crate::domain::model::RequiredPackage;
use crate::utils::error::{LauncherError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_SETTINGS_FILE: &str = "seo-launcher.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    pub environment: EnvironmentConfig,
    pub program: ProgramConfig,
    pub projects: ProjectsConfig,
    pub outputs: OutputsConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub venv_dir: String,
    /// Interpreter path; derived from `venv_dir` when absent.
    pub python: Option<String>,
    pub required_packages: Vec<RequiredPackage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    pub script: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsConfig {
    pub config: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputsConfig {
    pub reports: String,
    pub history: String,
    pub logs: String,
    pub create: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub sample_interval_ms: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            venv_dir: "venv".to_string(),
            python: None,
            required_packages: vec![
                RequiredPackage::Plain("requests".to_string()),
                RequiredPackage::Plain("pandas".to_string()),
                RequiredPackage::Detailed {
                    name: "pyyaml".to_string(),
                    import: Some("yaml".to_string()),
                },
            ],
        }
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            script: "seo_agent.py".to_string(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            config: "config/projects.yaml".to_string(),
        }
    }
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            reports: "data/reports".to_string(),
            history: "data/history".to_string(),
            logs: "logs".to_string(),
            create: true,
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            sample_interval_ms: 1000,
        }
    }
}

impl LauncherSettings {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            LauncherError::config(format!(
                "cannot read settings file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Loads `path` when given, otherwise the default file under `root` if it
    /// exists, otherwise built-in defaults.
    pub fn load(path: Option<&Path>, root: &Path) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = root.join(DEFAULT_SETTINGS_FILE);
                if default_path.is_file() {
                    tracing::debug!("Using settings file {}", default_path.display());
                    Self::from_file(default_path)
                } else {
                    tracing::debug!("No settings file found, using built-in defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// 替換環境變數 (例如 ${PYTHON_BIN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| LauncherError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("environment.venv_dir", &self.environment.venv_dir)?;
        if let Some(python) = &self.environment.python {
            validation::validate_path("environment.python", python)?;
        }
        for package in &self.environment.required_packages {
            validation::validate_non_empty_string(
                "environment.required_packages",
                package.name(),
            )?;
        }

        validation::validate_non_empty_string("program.script", &self.program.script)?;

        validation::validate_path("projects.config", &self.projects.config)?;
        validation::validate_file_extension(
            "projects.config",
            &self.projects.config,
            &["yaml", "yml"],
        )?;

        validation::validate_path("outputs.reports", &self.outputs.reports)?;
        validation::validate_path("outputs.history", &self.outputs.history)?;
        validation::validate_path("outputs.logs", &self.outputs.logs)?;

        validation::validate_range(
            "monitoring.sample_interval_ms",
            self.monitoring.sample_interval_ms,
            100,
            60_000,
        )?;

        Ok(())
    }
}

impl Validate for LauncherSettings {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
