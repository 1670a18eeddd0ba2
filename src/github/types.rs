// GitHub API response types.
// Structs for the public events feed; every field is optional so one odd event
// never sinks the rest of the page.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Event type discriminator. Only pushes carry commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EventKind {
    PushEvent,
    #[default]
    #[serde(other)]
    Other,
}

/// One entry of the `/users/{user}/events/public` feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    pub repo: Option<EventRepo>,
    pub payload: Option<EventPayload>,
    pub created_at: Option<String>,
}

impl Event {
    /// `owner/name` of the repository the event happened in.
    pub fn repo_name(&self) -> Option<&str> {
        self.repo
            .as_ref()
            .and_then(|r| r.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// Commits listed in the payload, in the order given.
    pub fn commits(&self) -> &[PushCommit] {
        self.payload
            .as_ref()
            .map(|p| p.commits.as_slice())
            .unwrap_or_default()
    }
}

/// Repository reference on an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRepo {
    pub name: Option<String>,
}

/// Event payload. Only the push shape is modelled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    /// Well-formed commits only; entries that fail to decode are dropped.
    #[serde(default, deserialize_with = "lenient_commits")]
    pub commits: Vec<PushCommit>,
}

/// Decode a commit list one entry at a time, keeping the entries that parse.
/// Anything other than an array yields no commits.
fn lenient_commits<'de, D>(deserializer: D) -> Result<Vec<PushCommit>, D::Error>
where
    D: Deserializer<'de>,
{
    let commits = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(commits)
}

/// Commit summary inside a push payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushCommit {
    pub sha: Option<String>,
    pub message: Option<String>,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
