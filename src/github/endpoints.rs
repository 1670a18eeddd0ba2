// GitHub API endpoint functions.
// Typed access to the public events feed.

use serde_json::Value;
use tracing::debug;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::Event;

impl GitHubClient {
    /// Get the public events of a user, newest first.
    ///
    /// Entries that do not look like an event are dropped rather than failing
    /// the whole feed.
    pub async fn get_public_events(&self, username: &str) -> Result<Vec<Event>> {
        let response = self
            .get(&format!("/users/{}/events/public", username))
            .await?;
        let body = self.text(response).await?;
        let raw: Vec<Value> = serde_json::from_str(&body)?;

        let total = raw.len();
        let events: Vec<Event> = raw
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();

        if events.len() < total {
            debug!(skipped = total - events.len(), "dropped malformed events");
        }

        Ok(events)
    }
}
