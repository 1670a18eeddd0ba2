// Error types for the site data layer.
// Covers upstream HTTP failures, cache store failures, and configuration errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache store error: {0}")]
    Store(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl SiteError {
    /// Map a reqwest error, surfacing timeouts as their own variant.
    pub fn from_request(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            SiteError::Timeout(timeout_ms)
        } else {
            SiteError::Http(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
