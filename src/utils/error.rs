use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Virtual environment not found: {}", path.display())]
    MissingVirtualEnv { path: PathBuf },

    #[error("Projects configuration not found: {}", path.display())]
    MissingProjectsConfig { path: PathBuf },

    #[error("Failed to launch '{program}': {source}")]
    LaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Environment,
    Execution,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LauncherError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::YamlError(_)
            | Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::MissingVirtualEnv { .. } | Self::MissingProjectsConfig { .. } => {
                ErrorCategory::Environment
            }
            Self::LaunchFailed { .. } => ErrorCategory::Execution,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Environment => ErrorSeverity::High,
            ErrorCategory::Execution | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Exit code used by the CLI when the launcher itself fails.
    ///
    /// Precondition and configuration failures exit with 1, failures to start
    /// the main program or to talk to the OS exit with 3.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::MissingVirtualEnv { path } => format!(
                "Create it with `python3 -m venv {}` and install the dependencies",
                path.display()
            ),
            Self::MissingProjectsConfig { path } => format!(
                "Create {} with a top-level `projects:` list",
                path.display()
            ),
            Self::YamlError(_) => "Check the YAML syntax of the projects file".to_string(),
            Self::TomlError(_) => "Check the TOML syntax of the launcher settings".to_string(),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the launcher settings and try again".to_string()
            }
            Self::LaunchFailed { .. } => {
                "Check that the virtualenv's Python interpreter exists and is executable"
                    .to_string()
            }
            Self::IoError(_) => "Check file permissions and available disk space".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingVirtualEnv { path } => {
                format!("Virtual environment '{}' is missing", path.display())
            }
            Self::MissingProjectsConfig { path } => {
                format!("Projects configuration '{}' is missing", path.display())
            }
            Self::LaunchFailed { program, .. } => format!("Could not start '{}'", program),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
