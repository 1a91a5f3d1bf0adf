//! Progress-tree sources
//!
//! A source produces the raw progress tree as JSON. The location string picks
//! the implementation:
//!
//! - `http://…` / `https://…` - realtime database REST endpoint ([`HttpSource`])
//! - `-` - JSON on standard input ([`StdinSource`])
//! - `file://…` or any other string - local JSON export ([`FileSource`])

use crate::config::TallyConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

pub mod file;
pub mod http;

pub use file::{FileSource, StdinSource};
pub use http::{node_url, HttpSource};

/// Location string that selects standard input
pub const STDIN_LOCATION: &str = "-";

#[async_trait]
pub trait ProgressSource: Send + Sync {
    /// Fetch the whole progress tree
    async fn fetch(&self) -> Result<Value>;

    /// Human-readable origin for log lines and error messages
    fn describe(&self) -> String;
}

/// Open the source named by `location`
pub fn open_source(location: &str, config: &TallyConfig) -> Result<Box<dyn ProgressSource>> {
    let location = location.trim();
    if location.starts_with("http://") || location.starts_with("https://") {
        let timeout = Duration::from_secs(config.timeout_secs);
        return Ok(Box::new(HttpSource::new(location, &config.node, timeout)?));
    }
    if location == STDIN_LOCATION {
        return Ok(Box::new(StdinSource));
    }
    let path = location.strip_prefix("file://").unwrap_or(location);
    Ok(Box::new(FileSource::new(PathBuf::from(path))))
}

/// Parse a fetched body into a progress tree
///
/// A blank body or a JSON `null` means the node does not exist.
pub fn parse_progress(body: &str, origin: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Err(Error::EmptySource(format!("{origin} returned an empty body")));
    }
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::InvalidData(format!("Failed to parse JSON from {origin}: {e}")))?;
    if value.is_null() {
        return Err(Error::EmptySource(format!(
            "no progress data found at {origin}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_source_by_location() {
        let config = TallyConfig::default();

        let http = open_source("https://db.example.com/", &config).unwrap();
        assert_eq!(http.describe(), "https://db.example.com/StudentsProgress.json");

        let stdin = open_source("-", &config).unwrap();
        assert_eq!(stdin.describe(), "<stdin>");

        let file = open_source("file:///tmp/progress.json", &config).unwrap();
        assert_eq!(file.describe(), "/tmp/progress.json");

        let relative = open_source("exports/progress.json", &config).unwrap();
        assert_eq!(relative.describe(), "exports/progress.json");
    }

    #[test]
    fn test_parse_progress() {
        let value = parse_progress(r#"{"s1": {}}"#, "test").unwrap();
        assert!(value.is_object());

        assert!(matches!(
            parse_progress("null", "test"),
            Err(Error::EmptySource(_))
        ));
        assert!(matches!(
            parse_progress("  \n", "test"),
            Err(Error::EmptySource(_))
        ));
        assert!(matches!(
            parse_progress("<html>", "test"),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_out_of_range_number_is_invalid_not_fatal() {
        let body = r#"{"s1": {"Chapter 1": {
            "a": {"timeSpentSeconds": 30},
            "b": {"timeSpentSeconds": 1e400}
        }}}"#;

        let value = parse_progress(body, "test").unwrap();
        let report = crate::progress::aggregate_time_spent(&value);
        let s1 = report.student("s1").unwrap();
        assert_eq!(s1.chapter_seconds(crate::progress::ChapterKey(1)), 30.0);
        assert_eq!(s1.total_seconds(), 30.0);
        assert_eq!(report.stats().invalid_values, 1);
    }

    #[test]
    fn test_empty_object_is_data() {
        let value = parse_progress("{}", "test").unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
