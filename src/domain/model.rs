use crate::utils::error::{LauncherError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub const UNNAMED_PROJECT: &str = "Unnamed project";
pub const UNSPECIFIED_DOMAIN: &str = "not specified";
pub const PREVIEW_CHARS: usize = 30;

/// One tracked site from the projects file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectConfig {
    #[serde(default, deserialize_with = "optional_scalar")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "scalar_list")]
    pub keywords: Vec<String>,
}

impl ProjectConfig {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_PROJECT)
    }

    pub fn display_domain(&self) -> &str {
        self.domain.as_deref().unwrap_or(UNSPECIFIED_DOMAIN)
    }

    /// Preview of the first keyword, `None` when there are no keywords.
    pub fn keyword_preview(&self) -> Option<String> {
        self.keywords.first().map(|keyword| keyword_preview(keyword))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigRoot {
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
}

impl ConfigRoot {
    /// Reads and parses the projects file. The handle is released before parsing.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(LauncherError::config("projects file is empty"));
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// First `PREVIEW_CHARS` characters of a keyword followed by `...`.
pub fn keyword_preview(keyword: &str) -> String {
    let truncated: String = keyword.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", truncated)
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn optional_scalar<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_to_string(value)
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected a string")),
    }
}

fn scalar_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    values
        .unwrap_or_default()
        .into_iter()
        .map(|value| {
            scalar_to_string(value).ok_or_else(|| D::Error::custom("keywords must be strings"))
        })
        .collect()
}

/// A Python package the main program imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequiredPackage {
    Plain(String),
    Detailed {
        name: String,
        #[serde(default)]
        import: Option<String>,
    },
}

impl RequiredPackage {
    /// Distribution name, as passed to `pip install`.
    pub fn name(&self) -> &str {
        match self {
            Self::Plain(name) => name,
            Self::Detailed { name, .. } => name,
        }
    }

    /// Module name used to probe the interpreter.
    pub fn import_name(&self) -> &str {
        match self {
            Self::Plain(name) => name,
            Self::Detailed { name, import } => import.as_deref().unwrap_or(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageStatus {
    pub name: String,
    pub installed: bool,
}

/// A fully resolved command line for the main program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub env: BTreeMap<String, String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramExit {
    pub code: i32,
}

impl ProgramExit {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

impl From<std::process::ExitStatus> for ProgramExit {
    fn from(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self { code };
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self { code: 128 + signal };
            }
        }

        Self { code: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    Completed(ProgramExit),
    Cancelled,
    DryRun,
}

impl LaunchOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Completed(exit) => exit.code,
            Self::Cancelled | Self::DryRun => 0,
        }
    }
}
