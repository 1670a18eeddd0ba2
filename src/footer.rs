// Page-view counter for the site footer.
// One short-timeout hit against the counter service; any failure degrades to a placeholder.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

use crate::config::FooterConfig;
use crate::error::{Result, SiteError};
use crate::perf;

/// Shown when the counter is not configured.
pub const DISABLED_VALUE: &str = "—";

/// Shown when the counter could not be reached.
pub const UNAVAILABLE_VALUE: &str = "infinite";

/// Footer payload handed to the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterData {
    pub value: String,
}

impl FooterData {
    fn text(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HitResponse {
    value: u64,
}

/// Client for the page-view counter. Build once and reuse across page loads.
#[derive(Debug, Clone)]
pub struct FooterCounter {
    client: Client,
    hit_url: Option<String>,
    timeout: Duration,
}

impl FooterCounter {
    pub fn new(config: &FooterConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            hit_url: config.hit_url(),
            timeout: config.timeout,
        })
    }

    /// Register a page view and return the formatted running total.
    #[instrument(skip(self))]
    pub async fn load(&self) -> FooterData {
        let Some(url) = self.hit_url.as_deref() else {
            return FooterData::text(DISABLED_VALUE);
        };

        match perf::measure("abacus-api-fetch", self.fetch_hits(url)).await {
            Ok(hits) => FooterData {
                value: format_count(hits),
            },
            Err(e) => {
                error!(error = %e, "error fetching footer data");
                FooterData::text(UNAVAILABLE_VALUE)
            }
        }
    }

    async fn fetch_hits(&self, url: &str) -> Result<u64> {
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SiteError::from_request(e, timeout_ms))?;
        if !response.status().is_success() {
            return Err(SiteError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SiteError::from_request(e, timeout_ms))?;
        let hit: HitResponse = serde_json::from_str(&body)?;
        Ok(hit.value)
    }
}

/// Format a count with comma thousands separators.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}
