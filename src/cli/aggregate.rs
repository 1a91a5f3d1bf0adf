//! The aggregate command: fetch the progress tree, total it, emit the report

use crate::config::TallyConfig;
use crate::error::Result;
use crate::progress::{aggregate_time_spent, ProgressReport};
use crate::report::{render_table, to_csv};
use crate::source::{open_source, ProgressSource};
use std::io::Write;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, warn};

/// One aggregation run
#[derive(Debug, Clone)]
pub struct AggregateCommand {
    pub config: TallyConfig,
    /// Print the aligned table instead of CSV on stdout
    pub table: bool,
    /// Write the CSV to `config.output`
    pub write_file: bool,
}

/// Run against the source named in the configuration
///
/// Nothing is written when the source fails; the report file is only touched
/// once a progress tree has been fetched.
pub async fn run_aggregate<W: Write>(command: &AggregateCommand, out: W) -> Result<ProgressReport> {
    let source = open_source(&command.config.source, &command.config)?;
    run_with_source(command, source.as_ref(), out).await
}

/// Run against an already opened source
pub async fn run_with_source<W: Write>(
    command: &AggregateCommand,
    source: &dyn ProgressSource,
    mut out: W,
) -> Result<ProgressReport> {
    info!("Fetching progress from {}", source.describe());
    let tree = source.fetch().await?;

    let report = aggregate_time_spent(&tree);
    warn_unreported_chapters(&report);
    let csv = to_csv(&report)?;

    if command.write_file {
        write_report(&command.config.output, &csv).await?;
        info!("Wrote CSV to {}", command.config.output.display());
    }

    if command.table {
        out.write_all(render_table(&report).as_bytes())?;
    } else {
        out.write_all(csv.as_bytes())?;
    }
    out.flush()?;

    let stats = report.stats();
    debug!(
        "Aggregated {} students: {} chapters counted, {} labels skipped, {} attempts ({} missing, {} invalid)",
        stats.students,
        stats.chapters_counted,
        stats.chapters_skipped,
        stats.attempts,
        stats.missing_values,
        stats.invalid_values
    );

    Ok(report)
}

/// Chapters outside 1..=12 count toward the total but have no column
fn warn_unreported_chapters(report: &ProgressReport) {
    for (student_id, totals) in report.students() {
        for (chapter, seconds) in totals
            .unreported_chapters()
            .filter(|(_, seconds)| *seconds != 0.0)
        {
            warn!(
                "Student {} has {}s in {}, which has no report column; counted in totalSeconds only",
                student_id, seconds, chapter
            );
        }
    }
}

async fn write_report(path: &Path, csv: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, csv).await?;
    Ok(())
}
