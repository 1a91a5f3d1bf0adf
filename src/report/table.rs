//! Console table rendering
//!
//! Same columns as the CSV plus `total_hms`, aligned for reading in a
//! terminal.

use super::csv::{format_seconds, header};
use crate::progress::{ChapterKey, ProgressReport};

pub const TOTAL_HMS_COLUMN: &str = "total_hms";

/// Pure: Format a seconds total as `HH:MM:SS`
///
/// Hours and minutes are whole numbers; seconds keep any fraction. Each part
/// is padded to at least two characters. Negative or non-finite totals render
/// as `00:00:00`.
pub fn format_hms(total_seconds: f64) -> String {
    let secs = if total_seconds.is_finite() && total_seconds > 0.0 {
        total_seconds
    } else {
        0.0
    };
    let hours = (secs / 3600.0).floor();
    let minutes = ((secs % 3600.0) / 60.0).floor();
    let seconds = secs % 60.0;
    format!(
        "{:0>2}:{:0>2}:{:0>2}",
        format_seconds(hours),
        format_seconds(minutes),
        format_seconds(seconds)
    )
}

/// Render the report as an aligned text table
pub fn render_table(report: &ProgressReport) -> String {
    let mut columns = header();
    columns.push(TOTAL_HMS_COLUMN.to_string());

    let rows: Vec<Vec<String>> = report
        .students()
        .iter()
        .map(|(student_id, totals)| {
            let mut row = vec![student_id.clone()];
            row.extend(
                ChapterKey::reported().map(|key| format_seconds(totals.chapter_seconds(key))),
            );
            row.push(format_seconds(totals.total_seconds()));
            row.push(format_hms(totals.total_seconds()));
            row
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &columns, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
