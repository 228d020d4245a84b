// src/index/client.rs

//! HTTP client for index snapshot fetches
//!
//! Wrapper around reqwest with retry support.

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{Error, Result};

use super::metadata::IndexMetadata;

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum retry attempts for failed fetches
const MAX_RETRIES: u32 = 3;

/// Retry delay in milliseconds
const RETRY_DELAY_MS: u64 = 1000;

/// HTTP client wrapper with retry support
pub struct IndexClient {
    client: Client,
    max_retries: u32,
}

impl IndexClient {
    /// Create a new index client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::InitError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Fetch an index snapshot from a URL with retry support
    pub fn fetch_snapshot(&self, url: &str) -> Result<IndexMetadata> {
        info!("Fetching index snapshot from {}", url);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.client.get(url).send() {
                Ok(response) => {
                    if !response.status().is_success() {
                        return Err(Error::DownloadError(format!(
                            "HTTP {} from {}",
                            response.status(),
                            url
                        )));
                    }

                    let snapshot: IndexMetadata = response.json().map_err(|e| {
                        Error::DownloadError(format!("Failed to parse snapshot JSON: {e}"))
                    })?;

                    info!(
                        "Fetched snapshot {} {} with {} packages",
                        snapshot.name,
                        snapshot.version,
                        snapshot.packages.len()
                    );
                    return Ok(snapshot);
                }
                Err(e) => {
                    if attempt >= self.max_retries {
                        return Err(Error::DownloadError(format!(
                            "Failed to fetch snapshot after {attempt} attempts: {e}"
                        )));
                    }
                    warn!(
                        "Snapshot fetch attempt {} failed: {}, retrying...",
                        attempt, e
                    );
                    std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64));
                }
            }
        }
    }
}
