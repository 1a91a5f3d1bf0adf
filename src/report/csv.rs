//! CSV rendering of a [`ProgressReport`]
//!
//! Layout: `studentId,chapter1,...,chapter12,totalSeconds`, one row per
//! student in input order. Cells are never quoted; student identifiers are
//! expected to be free of delimiters.

use crate::error::{Error, Result};
use crate::progress::{ChapterKey, ProgressReport};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

pub const STUDENT_ID_COLUMN: &str = "studentId";
pub const TOTAL_SECONDS_COLUMN: &str = "totalSeconds";

/// Header row of the report
pub fn header() -> Vec<String> {
    std::iter::once(STUDENT_ID_COLUMN.to_string())
        .chain(ChapterKey::reported().map(|key| key.to_string()))
        .chain(std::iter::once(TOTAL_SECONDS_COLUMN.to_string()))
        .collect()
}

/// Format a seconds total for output
///
/// Shortest round-trip form: `45`, `12.5`. Negative zero prints as `0`.
pub fn format_seconds(seconds: f64) -> String {
    if seconds == 0.0 {
        "0".to_string()
    } else {
        seconds.to_string()
    }
}

/// Stream the report as CSV into `out`
pub fn write_csv<W: Write>(report: &ProgressReport, out: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(header())?;
    for (student_id, totals) in report.students() {
        let row = std::iter::once(student_id.clone())
            .chain(
                ChapterKey::reported().map(|key| format_seconds(totals.chapter_seconds(key))),
            )
            .chain(std::iter::once(format_seconds(totals.total_seconds())));
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render the report as a CSV string
pub fn to_csv(report: &ProgressReport) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(report, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::InvalidData(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::aggregate_time_spent;
    use serde_json::json;

    const HEADER: &str = "studentId,chapter1,chapter2,chapter3,chapter4,chapter5,chapter6,\
chapter7,chapter8,chapter9,chapter10,chapter11,chapter12,totalSeconds";

    #[test]
    fn test_header_only_for_empty_report() {
        let csv = to_csv(&ProgressReport::default()).unwrap();
        assert_eq!(csv, format!("{HEADER}\n"));
    }

    #[test]
    fn test_rows_fill_missing_chapters_with_zero() {
        let tree = json!({
            "s1": {
                "Chapter 1": {
                    "a1": {"timeSpentSeconds": 30},
                    "a2": {"timeSpentSeconds": "15"}
                },
                "ch2": {"a1": {"timeSpentSeconds": "bad"}}
            },
            "s2": {
                "Chapter 12 Review": {"a1": {"timeSpentSeconds": 12.5}}
            }
        });

        let csv = to_csv(&aggregate_time_spent(&tree)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "s1,45,0,0,0,0,0,0,0,0,0,0,0,45");
        assert_eq!(lines[2], "s2,0,0,0,0,0,0,0,0,0,0,0,12.5,12.5");
    }

    #[test]
    fn test_unreported_chapters_only_show_in_total() {
        let tree = json!({"s1": {"Chapter 14": {"a": {"timeSpentSeconds": 8}}}});
        let csv = to_csv(&aggregate_time_spent(&tree)).unwrap();
        assert_eq!(
            csv.lines().nth(1),
            Some("s1,0,0,0,0,0,0,0,0,0,0,0,0,8")
        );
    }

    #[test]
    fn test_identifiers_are_not_quoted() {
        let tree = json!({"student \"x\"": {}});
        let csv = to_csv(&aggregate_time_spent(&tree)).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("student \"x\","));
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(45.0), "45");
        assert_eq!(format_seconds(12.5), "12.5");
        assert_eq!(format_seconds(-0.0), "0");
        assert_eq!(format_seconds(3600.0), "3600");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let tree = json!({
            "b": {"ch1": {"x": {"timeSpentSeconds": "1.25"}}},
            "a": {"ch9": {"x": {"timeSpentSeconds": 4}}}
        });
        let first = to_csv(&aggregate_time_spent(&tree)).unwrap();
        let second = to_csv(&aggregate_time_spent(&tree)).unwrap();
        assert_eq!(first, second);
    }
}
