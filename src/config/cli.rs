use crate::config::context::LaunchContext;
use crate::config::toml_config::LauncherSettings;
use crate::core::launcher::LaunchOptions;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "seo-launcher")]
#[command(about = "Checks the environment, summarises projects and launches the SEO agent")]
pub struct CliConfig {
    /// Launcher settings file (TOML)
    #[arg(short, long, env = "SEO_LAUNCHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project root; relative paths in the settings are resolved against it
    #[arg(short = 'C', long)]
    pub project_dir: Option<PathBuf>,

    /// Launch without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Run the checks and the summary, print the command, do not launch
    #[arg(long)]
    pub dry_run: bool,

    /// Sample CPU and memory of the main program
    #[arg(long)]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Extra arguments passed to the main program
    #[arg(last = true)]
    pub program_args: Vec<String>,
}

impl CliConfig {
    pub fn root(&self) -> Result<PathBuf> {
        match &self.project_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Loads and validates the settings, then applies the command line overrides.
    pub fn launch_context(&self) -> Result<LaunchContext> {
        let root = self.root()?;
        let settings = LauncherSettings::load(self.config.as_deref(), &root)?;
        settings.validate()?;

        let monitor = self.monitor || settings.monitoring.enabled;
        Ok(LaunchContext::from_settings(&settings, root)
            .with_extra_args(self.program_args.iter().cloned())
            .with_monitor(monitor))
    }

    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            assume_yes: self.yes,
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_arguments_matches_script_behaviour() {
        let cli = CliConfig::try_parse_from(["seo-launcher"]).unwrap();

        assert!(cli.project_dir.is_none());
        assert!(!cli.yes);
        assert!(!cli.dry_run);
        assert!(!cli.monitor);
        assert_eq!(cli.log_format, LogFormat::Compact);
        assert!(cli.program_args.is_empty());
        assert_eq!(
            cli.launch_options(),
            LaunchOptions {
                assume_yes: false,
                dry_run: false
            }
        );
    }

    #[test]
    fn test_parse_flags_and_program_args() {
        let cli = CliConfig::try_parse_from([
            "seo-launcher",
            "-C",
            "/srv/seo",
            "--yes",
            "--monitor",
            "--log-format",
            "json",
            "--",
            "--engine",
            "google",
        ])
        .unwrap();

        assert_eq!(cli.project_dir, Some(PathBuf::from("/srv/seo")));
        assert!(cli.yes);
        assert!(cli.monitor);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.program_args, vec!["--engine", "google"]);
    }

    #[test]
    fn test_launch_context_applies_overrides() {
        let root = TempDir::new().unwrap();
        let project_dir = root.path().to_str().unwrap();
        let cli = CliConfig::try_parse_from([
            "seo-launcher",
            "-C",
            project_dir,
            "--monitor",
            "--",
            "--only",
            "shop",
        ])
        .unwrap();

        let context = cli.launch_context().unwrap();

        assert_eq!(context.root, root.path());
        assert!(context.monitor);
        assert_eq!(context.invocation().args, vec!["seo_agent.py", "--only", "shop"]);
    }

    #[test]
    fn test_launch_context_rejects_invalid_settings() {
        let root = TempDir::new().unwrap();
        let settings = root.path().join("bad.toml");
        std::fs::write(&settings, "[projects]\nconfig = \"projects.txt\"\n").unwrap();

        let cli = CliConfig::try_parse_from([
            "seo-launcher",
            "-C",
            root.path().to_str().unwrap(),
            "--config",
            settings.to_str().unwrap(),
        ])
        .unwrap();

        let err = cli.launch_context().unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
