use thiserror::Error;

use crate::config::ConfigError;
use crate::scrape::FetchError;

/// Failure of a whole pipeline run.
///
/// Per-image download and decode failures are not represented here; they
/// are absorbed by the fetcher and resizer.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Configuration error: cannot build search URL for {query:?}: {source}")]
    SearchUrl {
        query: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Network error: search request failed: {0}")]
    SearchFetch(#[source] FetchError),

    #[error("Storage error: {0}")]
    Store(#[source] thumbforge_common::Error),

    #[error("Internal error: worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl PipelineError {
    /// Coarse failure category for diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::SearchUrl { .. } => "configuration",
            Self::SearchFetch(_) => "network",
            Self::Store(_) => "storage",
            Self::Worker(_) => "internal",
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::SearchUrl { .. } => 2,
            Self::SearchFetch(_) => 3,
            Self::Store(_) => 4,
            Self::Worker(_) => 1,
        }
    }
}

impl From<thumbforge_common::Error> for PipelineError {
    fn from(e: thumbforge_common::Error) -> Self {
        Self::Store(e)
    }
}
