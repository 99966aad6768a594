//! Concurrent HTTP fetching.
//!
//! A [`Fetcher`] wraps one `reqwest::Client` (the only state shared between
//! requests) and a cap on in-flight downloads. Image downloads never fail a
//! batch: each position either carries the body or is `None`.

use std::time::Duration;

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ScrapeConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

/// HTTP fetcher with bounded concurrency.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    concurrency: usize,
}

impl Fetcher {
    /// Build a fetcher sending `user_agent` with a per-request `timeout`.
    ///
    /// `concurrency` is clamped to at least one.
    pub fn new(user_agent: &str, timeout: Duration, concurrency: usize) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            concurrency: concurrency.max(1),
        })
    }

    pub fn from_config(config: &ScrapeConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
            config.concurrency,
        )
    }

    /// Fetch an HTML document as text. Any non-2xx status is an error.
    pub async fn fetch_document(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }

    /// Fetch raw bytes, succeeding only on HTTP 200 with a fully read body.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }

    /// Fetch one image; any failure is logged and becomes `None`.
    pub async fn fetch_one(&self, url: &str) -> Option<Bytes> {
        match self.fetch_bytes(url).await {
            Ok(bytes) => {
                debug!(url, len = bytes.len(), "Fetched image");
                Some(bytes)
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                None
            }
        }
    }

    /// Fetch every URL, at most `concurrency` at a time.
    ///
    /// The output has the same length as `urls` and position `i` always
    /// belongs to `urls[i]`, whatever order the responses arrive in.
    pub async fn fetch_many(&self, urls: &[String]) -> Vec<Option<Bytes>> {
        stream::iter(urls)
            .map(|url| self.fetch_one(url))
            .buffered(self.concurrency)
            .collect()
            .await
    }
}
