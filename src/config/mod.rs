#[cfg(feature = "cli")]
pub mod cli;
pub mod context;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, LogFormat};
pub use context::{LaunchContext, OutputDirs};
pub use toml_config::LauncherSettings;
