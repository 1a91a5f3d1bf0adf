//! Common test utilities and helpers

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Progress tree used across the integration tests
pub const SAMPLE_PROGRESS: &str = r#"{
  "s1": {
    "Chapter 1": {
      "a1": {"timeSpentSeconds": 30},
      "a2": {"timeSpentSeconds": "15"}
    },
    "ch2": {"a1": {"timeSpentSeconds": "bad"}}
  },
  "s2": {
    "chapter3": {"a1": {"timeSpentSeconds": 100}},
    "Ch 3": {"a1": {"timeSpentSeconds": 20.5}},
    "Chapter 12 Review": {"a1": {"timeSpentSeconds": 3600}}
  }
}"#;

pub const SAMPLE_HEADER: &str = "studentId,chapter1,chapter2,chapter3,chapter4,chapter5,chapter6,\
chapter7,chapter8,chapter9,chapter10,chapter11,chapter12,totalSeconds";

pub const SAMPLE_ROWS: [&str; 2] = [
    "s1,45,0,0,0,0,0,0,0,0,0,0,0,45",
    "s2,0,0,120.5,0,0,0,0,0,0,0,0,3600,3720.5",
];

/// Isolated working directory for running the binary
pub struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the context root
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).expect("Failed to read file")
    }

    /// The binary, running inside the context with no user config or env overrides
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("chapter-tally").expect("binary is built");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("CHAPTER_TALLY_SOURCE")
            .env_remove("CHAPTER_TALLY_NODE")
            .env_remove("CHAPTER_TALLY_OUTPUT")
            .env_remove("CHAPTER_TALLY_TIMEOUT_SECS")
            .env_remove("CHAPTER_TALLY_LOG_LEVEL")
            .env_remove("HTTP_PROXY")
            .env_remove("http_proxy")
            .env_remove("ALL_PROXY")
            .env_remove("all_proxy");
        cmd
    }
}

/// Expected CSV for [`SAMPLE_PROGRESS`]
pub fn sample_csv() -> String {
    format!("{}\n{}\n{}\n", SAMPLE_HEADER, SAMPLE_ROWS[0], SAMPLE_ROWS[1])
}
