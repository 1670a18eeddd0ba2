// GitHub API HTTP client.
// Unauthenticated, time-bounded requests with rate limit logging.

use std::time::Duration;

use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::{debug, warn};

use crate::config::CommitsConfig;
use crate::error::{Result, SiteError};

use super::types::RateLimit;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// GitHub API client for public, unauthenticated endpoints.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl GitHubClient {
    /// Create a client using the base URL, timeout and User-Agent from `config`.
    pub fn new(config: &CommitsConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| SiteError::Config(format!("invalid user agent: {}", e)))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    /// Make a GET request to the GitHub API, failing on any non-2xx status.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let rate_limit = rate_limit_from(&response);
        debug!(
            endpoint,
            remaining = rate_limit.remaining,
            limit = rate_limit.limit,
            "github response"
        );

        if !response.status().is_success() {
            if rate_limit.limit > 0 && rate_limit.remaining == 0 {
                warn!(reset = rate_limit.reset, "github rate limit exhausted");
            }
            return Err(SiteError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        Ok(response)
    }

    /// Read a response body as text, keeping timeouts distinguishable.
    pub async fn text(&self, response: Response) -> Result<String> {
        response.text().await.map_err(|e| self.request_error(e))
    }

    fn request_error(&self, err: reqwest::Error) -> SiteError {
        SiteError::from_request(err, self.timeout.as_millis() as u64)
    }
}

/// Extract rate limit headers; missing or unparsable values read as zero.
fn rate_limit_from(response: &Response) -> RateLimit {
    let header = |name: &str| -> u64 {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    };

    RateLimit {
        limit: header("x-ratelimit-limit"),
        remaining: header("x-ratelimit-remaining"),
        reset: header("x-ratelimit-reset"),
    }
}
