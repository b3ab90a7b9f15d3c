//! Error types for store requests
//!
//! Causes are kept apart for logging only. The search path collapses all of
//! them into one user-facing notification, the image path swallows them.

use thiserror::Error;

/// Why a fetch failed to produce a usable payload
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connectivity problem, timeout, or the request never completed
    #[error("Transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The server answered with a non-success status code
    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// The body exceeded the transport's size limit
    #[error("Response from {url} is larger than {limit} bytes")]
    TooLarge { url: String, limit: usize },

    /// The payload does not have the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Short cause label used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "transport",
            FetchError::HttpStatus { .. } => "http_status",
            FetchError::TooLarge { .. } => "too_large",
            FetchError::Decode(_) => "decode",
        }
    }

    pub fn transport(url: impl Into<String>, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        FetchError::Transport {
            url: url.into(),
            source: source.into(),
        }
    }
}
