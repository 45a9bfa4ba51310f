use crate::domain::model::{Invocation, ProgramExit};
use crate::domain::ports::ProgramRunner;
use crate::utils::error::{LauncherError, Result};
use crate::utils::monitor::SystemMonitor;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Spawns the main program with the launcher's terminal attached.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    monitor: bool,
    sample_interval: Duration,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self {
            monitor: false,
            sample_interval: Duration::from_secs(1),
        }
    }

    pub fn new_with_monitoring(monitor: bool, sample_interval: Duration) -> Self {
        Self {
            monitor,
            sample_interval,
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgramRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProgramExit> {
        tracing::debug!("Spawning {} in {}", invocation, invocation.working_dir.display());

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .envs(&invocation.env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| LauncherError::LaunchFailed {
                program: invocation.program.display().to_string(),
                source,
            })?;

        let monitor = SystemMonitor::for_process(child.id(), self.monitor);
        if monitor.is_enabled() {
            tracing::info!("🔍 Monitoring main program (pid {:?})", child.id());
        }

        let mut ticker = tokio::time::interval(self.sample_interval);
        let status = loop {
            tokio::select! {
                status = child.wait() => break status?,
                _ = ticker.tick(), if monitor.is_enabled() => monitor.log_stats("Main program"),
            }
        };

        monitor.log_final_stats();
        Ok(ProgramExit::from(status))
    }
}
