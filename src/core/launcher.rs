use crate::config::context::LaunchContext;
use crate::core::preflight;
use crate::core::summary::{self, SummaryOutcome};
use crate::domain::model::{LaunchOutcome, ProgramExit};
use crate::domain::ports::{Confirmer, PackageProbe, ProgramRunner};
use crate::utils::error::Result;
use chrono::Local;
use std::io::Write;
use std::time::Instant;

const BANNER_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub assume_yes: bool,
    pub dry_run: bool,
}

/// Drives one launch: checks, summary, confirmation, run, report.
pub struct Launcher<R: ProgramRunner, C: Confirmer, K: PackageProbe> {
    context: LaunchContext,
    runner: R,
    confirmer: C,
    probe: K,
    options: LaunchOptions,
}

impl<R: ProgramRunner, C: Confirmer, K: PackageProbe> Launcher<R, C, K> {
    pub fn new(context: LaunchContext, runner: R, confirmer: C, probe: K) -> Self {
        Self {
            context,
            runner,
            confirmer,
            probe,
            options: LaunchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LaunchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn context(&self) -> &LaunchContext {
        &self.context
    }

    /// Precondition failures return `Err` before anything else is read; a
    /// broken projects file only prints an error line and the launch goes on.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<LaunchOutcome> {
        print_banner(out, "🚀 SEO agent launcher")?;
        writeln!(out, "📅 {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(out)?;

        let report = preflight::run_preflight(&self.context, &self.probe, out)?;
        let missing = report.missing_packages().count();
        if missing > 0 {
            tracing::warn!("{} required package(s) missing, continuing anyway", missing);
        }
        writeln!(out)?;

        let projects_path = self.context.resolve(&self.context.projects_config);
        match summary::print_project_summary(&projects_path, out)? {
            SummaryOutcome::Printed { projects } => {
                tracing::info!("📋 {} project(s) configured", projects)
            }
            SummaryOutcome::Failed { message } => tracing::warn!("{}", message),
        }
        writeln!(out)?;

        let invocation = self.context.invocation();

        if self.options.dry_run {
            tracing::info!("🔍 DRY RUN MODE - the main program will not be started");
            writeln!(out, "🔍 Dry run, would execute: {}", invocation)?;
            return Ok(LaunchOutcome::DryRun);
        }

        if !self.options.assume_yes {
            out.flush()?;
            if !self.confirmer.confirm("Start the SEO check?")? {
                writeln!(out, "🛑 Launch cancelled")?;
                tracing::info!("Launch cancelled by user");
                return Ok(LaunchOutcome::Cancelled);
            }
        }

        if self.context.create_output_dirs {
            self.prepare_output_dirs()?;
        }

        writeln!(out, "▶️  Running: {}", invocation)?;
        out.flush()?;

        let started = Instant::now();
        let exit = self.runner.run(&invocation).await?;
        let elapsed = started.elapsed();
        tracing::info!(
            "Main program finished with code {} after {:.1}s",
            exit.code,
            elapsed.as_secs_f64()
        );

        self.print_final_report(out, exit, elapsed.as_secs_f64())?;
        Ok(LaunchOutcome::Completed(exit))
    }

    fn prepare_output_dirs(&self) -> Result<()> {
        for dir in self.context.output_dirs() {
            let path = self.context.resolve(dir);
            if !path.is_dir() {
                tracing::debug!("Creating {}", path.display());
                std::fs::create_dir_all(&path)?;
            }
        }
        Ok(())
    }

    fn print_final_report<W: Write>(
        &self,
        out: &mut W,
        exit: ProgramExit,
        seconds: f64,
    ) -> Result<()> {
        let outputs = &self.context.outputs;
        writeln!(out)?;

        if exit.success() {
            print_banner(out, "✅ SEO check completed successfully")?;
            writeln!(out, "⏱️  Duration: {:.1}s", seconds)?;
            writeln!(out, "📄 Reports: {}", outputs.reports.display())?;
            writeln!(out, "📚 History: {}", outputs.history.display())?;
            writeln!(out, "📝 Logs:    {}", outputs.logs.display())?;
        } else {
            print_banner(out, &format!("❌ SEO check failed (exit code {})", exit.code))?;
            writeln!(out, "⏱️  Duration: {:.1}s", seconds)?;
            writeln!(out, "💡 See the logs in {} for details", outputs.logs.display())?;
        }

        out.flush()?;
        Ok(())
    }
}

fn print_banner<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule)
}
