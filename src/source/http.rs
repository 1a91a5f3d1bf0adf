//! Realtime database REST source

use super::{parse_progress, ProgressSource};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// REST URL of a database node: `<base>/<node>.json`
///
/// One trailing `/` on the base URL is dropped.
pub fn node_url(base_url: &str, node: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{base}/{node}.json")
}

/// Fetches one database node with a single GET (no retries)
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, node: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: node_url(base_url, node),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ProgressSource for HttpSource {
    async fn fetch(&self) -> Result<Value> {
        debug!("GET {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::SourceUnreachable(format!("{}: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::SourceUnreachable(format!(
                "{} returned {}",
                self.url, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::SourceUnreachable(format!("{}: {}", self.url, e)))?;
        debug!("Received {} bytes from {}", body.len(), self.url);
        parse_progress(&body, &self.url)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_url() {
        assert_eq!(
            node_url("https://db.example.com/", "StudentsProgress"),
            "https://db.example.com/StudentsProgress.json"
        );
        assert_eq!(
            node_url("https://db.example.com", "StudentsProgress"),
            "https://db.example.com/StudentsProgress.json"
        );
        assert_eq!(
            node_url("https://db.example.com/classes/7a/", "progress"),
            "https://db.example.com/classes/7a/progress.json"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        // Port 9 (discard) on loopback is not expected to accept HTTP.
        let source = HttpSource::new("http://127.0.0.1:9", "p", Duration::from_secs(2)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, Error::SourceUnreachable(_)));
    }
}
