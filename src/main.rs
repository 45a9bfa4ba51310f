use clap::Parser;
use seo_launcher::config::LogFormat;
use seo_launcher::utils::logger;
use seo_launcher::{CliConfig, Launcher, ProcessRunner, PythonImportProbe, StdinConfirmer};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting seo-launcher");
    tracing::debug!("CLI config: {:?}", config);

    let context = match config.launch_context() {
        Ok(context) => context,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    if context.monitor {
        tracing::info!("🔍 Process monitoring enabled");
    }

    let runner = ProcessRunner::new_with_monitoring(context.monitor, context.sample_interval);
    let launcher = Launcher::new(context, runner, StdinConfirmer, PythonImportProbe)
        .with_options(config.launch_options());

    let mut stdout = std::io::stdout();
    match launcher.run(&mut stdout).await {
        Ok(outcome) => {
            tracing::debug!("Launch outcome: {:?}", outcome);
            std::process::exit(outcome.exit_code());
        }
        Err(e) => {
            tracing::error!(
                "❌ Launch failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
