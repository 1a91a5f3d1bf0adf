//! Configuration for chapter-tally
//!
//! Values are layered, lowest priority first:
//!
//! 1. Built-in defaults ([`TallyConfig::default`])
//! 2. User config file (`<config dir>/chapter-tally/config.toml`), when present
//! 3. File passed with `--config`
//! 4. Environment variables (`CHAPTER_TALLY_*`)
//! 5. Command-line flags
//!
//! The resolved [`TallyConfig`] is passed explicitly to the source and the
//! command runner; nothing reads configuration from globals.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;

pub mod loader;

pub use loader::{load_config, ConfigLoader};

/// Valid log levels for configuration validation.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Prefix shared by all environment overrides
pub const ENV_PREFIX: &str = "CHAPTER_TALLY_";

const DEFAULT_SOURCE: &str = "https://midnightmathscape-e8e70-default-rtdb.firebaseio.com/";
const DEFAULT_NODE: &str = "StudentsProgress";
const DEFAULT_OUTPUT: &str = "students_time_by_chapter_live.csv";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Location of the per-user config file
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "chapter-tally", "chapter-tally")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Resolved configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyConfig {
    /// Data-source location: database base URL, file path, or `-` for stdin
    pub source: String,
    /// Database node holding the progress tree
    pub node: String,
    /// Where the CSV report is written
    pub output: PathBuf,
    /// HTTP request timeout
    pub timeout_secs: u64,
    pub log_level: String,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            node: DEFAULT_NODE.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: "info".to_string(),
        }
    }
}

/// One config file layer; absent keys leave lower layers untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub source: Option<String>,
    pub node: Option<String>,
    pub output: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source: Option<String>,
    pub node: Option<String>,
    pub output: Option<PathBuf>,
}

impl TallyConfig {
    pub fn apply_file(&mut self, file: ConfigFile) {
        if let Some(source) = file.source {
            self.source = source;
        }
        if let Some(node) = file.node {
            self.node = node;
        }
        if let Some(output) = file.output {
            self.output = output;
        }
        if let Some(timeout_secs) = file.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if let Some(log_level) = file.log_level {
            self.log_level = log_level;
        }
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_with(|name| std::env::var(name).ok());
    }

    /// Merge `CHAPTER_TALLY_*` values obtained through `lookup`
    ///
    /// Unparseable numbers are ignored, like the rest of the environment layer.
    pub fn merge_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| lookup(&format!("{ENV_PREFIX}{suffix}"));

        if let Some(source) = var("SOURCE") {
            self.source = source;
        }
        if let Some(node) = var("NODE") {
            self.node = node;
        }
        if let Some(output) = var("OUTPUT") {
            self.output = PathBuf::from(output);
        }
        if let Some(timeout) = var("TIMEOUT_SECS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.timeout_secs = value;
            }
        }
        if let Some(log_level) = var("LOG_LEVEL") {
            self.log_level = log_level;
        }
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(source) = &overrides.source {
            self.source = source.clone();
        }
        if let Some(node) = &overrides.node {
            self.node = node.clone();
        }
        if let Some(output) = &overrides.output {
            self.output = output.clone();
        }
    }

    /// Check every field, reporting all problems at once
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.source.trim().is_empty() {
            problems.push("source must not be empty".to_string());
        }
        if self.node.is_empty() || self.node.starts_with('/') || self.node.ends_with('/') {
            problems.push(format!(
                "node '{}' must be non-empty without leading or trailing '/'",
                self.node
            ));
        }
        if self.output.as_os_str().is_empty() {
            problems.push("output path must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            problems.push("timeout_secs must be greater than 0".to_string());
        }
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            problems.push(format!(
                "log_level '{}' must be one of: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = TallyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.node, "StudentsProgress");
        assert_eq!(
            config.output,
            PathBuf::from("students_time_by_chapter_live.csv")
        );
    }

    #[test]
    fn test_file_layer_only_touches_present_keys() {
        let file: ConfigFile = toml::from_str(
            r#"
source = "https://example-rtdb.example.com"
timeout_secs = 5
"#,
        )
        .unwrap();

        let mut config = TallyConfig::default();
        config.apply_file(file);
        assert_eq!(config.source, "https://example-rtdb.example.com");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.node, "StudentsProgress");
    }

    #[test]
    fn test_unknown_file_keys_are_rejected() {
        let result: std::result::Result<ConfigFile, _> = toml::from_str("api_key = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_env_layer() {
        let env: HashMap<&str, &str> = [
            ("CHAPTER_TALLY_NODE", "Progress2025"),
            ("CHAPTER_TALLY_TIMEOUT_SECS", "not-a-number"),
            ("CHAPTER_TALLY_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = TallyConfig::default();
        config.merge_env_with(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config.node, "Progress2025");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_overrides_win() {
        let mut config = TallyConfig::default();
        config.apply_overrides(&ConfigOverrides {
            source: Some("progress.json".to_string()),
            node: None,
            output: Some(PathBuf::from("out/report.csv")),
        });
        assert_eq!(config.source, "progress.json");
        assert_eq!(config.node, "StudentsProgress");
        assert_eq!(config.output, PathBuf::from("out/report.csv"));
    }

    #[test]
    fn test_validation_accumulates_problems() {
        let config = TallyConfig {
            source: " ".to_string(),
            node: "/StudentsProgress".to_string(),
            output: PathBuf::from("report.csv"),
            timeout_secs: 0,
            log_level: "loud".to_string(),
        };

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("source must not be empty"));
        assert!(err.contains("node '/StudentsProgress'"));
        assert!(err.contains("timeout_secs"));
        assert!(err.contains("log_level 'loud'"));
    }
}
