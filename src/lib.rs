pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{LaunchContext, LauncherSettings};
pub use crate::core::{
    launcher::{LaunchOptions, Launcher},
    preflight::PythonImportProbe,
    prompt::StdinConfirmer,
    runner::ProcessRunner,
};
pub use domain::model::{ConfigRoot, LaunchOutcome, ProgramExit, ProjectConfig};
pub use utils::error::{LauncherError, Result};
