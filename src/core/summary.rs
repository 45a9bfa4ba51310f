//! Project summary printed before the launch.
//!
//! A broken or missing projects file never stops the launcher here: the
//! failure is reported as a single line and the caller carries on.

use crate::domain::model::ConfigRoot;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Printed { projects: usize },
    Failed { message: String },
}

pub fn write_project_summary<W: Write>(root: &ConfigRoot, out: &mut W) -> io::Result<()> {
    writeln!(out, "📋 Configured projects: {}", root.projects.len())?;

    for (index, project) in root.projects.iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, project.display_name())?;
        writeln!(out, "     🌐 Domain: {}", project.display_domain())?;
        writeln!(out, "     🔑 Keywords: {}", project.keywords.len())?;
        if let Some(preview) = project.keyword_preview() {
            writeln!(out, "     📝 Example: {}", preview)?;
        }
    }

    Ok(())
}

/// Loads `path` and prints the summary, or one error line if it cannot be loaded.
pub fn print_project_summary<W: Write>(path: &Path, out: &mut W) -> io::Result<SummaryOutcome> {
    match ConfigRoot::from_file(path) {
        Ok(root) => {
            tracing::debug!("Loaded {} projects from {}", root.projects.len(), path.display());
            write_project_summary(&root, out)?;
            Ok(SummaryOutcome::Printed {
                projects: root.projects.len(),
            })
        }
        Err(e) => {
            tracing::warn!("Could not read projects from {}: {}", path.display(), e);
            let message = format!("Failed to read projects configuration: {}", e)
                .replace('\n', " ");
            writeln!(out, "❌ {}", message)?;
            Ok(SummaryOutcome::Failed { message })
        }
    }
}
