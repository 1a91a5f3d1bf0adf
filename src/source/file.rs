//! Local sources: JSON exports on disk or piped through stdin

use super::{parse_progress, ProgressSource};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// JSON export of the progress node saved to disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ProgressSource for FileSource {
    async fn fetch(&self) -> Result<Value> {
        let body = fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::SourceUnreachable(format!("{}: {}", self.path.display(), e)))?;
        parse_progress(&body, &self.describe())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct StdinSource;

#[async_trait]
impl ProgressSource for StdinSource {
    async fn fetch(&self) -> Result<Value> {
        let mut body = String::new();
        tokio::io::stdin()
            .read_to_string(&mut body)
            .await
            .map_err(|e| Error::SourceUnreachable(format!("<stdin>: {e}")))?;
        parse_progress(&body, "<stdin>")
    }

    fn describe(&self) -> String {
        "<stdin>".to_string()
    }
}
