// Key-value store seam and cache record envelope.
// Records are JSON-encoded and stamped with their write time for TTL checks.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::Result;

/// Minimal key-value store the cache is written against.
///
/// Implementations may be eventually consistent. A missing key is `Ok(None)`,
/// anything else going wrong is an `Err`.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the raw value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: String) -> Result<()>;
}

/// Wrapper for a cached payload with its write time.
///
/// A record is never updated in place; a refresh writes a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord<T> {
    /// The cached payload.
    pub data: T,
    /// When the record was written.
    pub stored_at: DateTime<Utc>,
}

impl<T> CacheRecord<T> {
    /// Create a record stamped with the current time.
    pub fn new(data: T) -> Self {
        Self {
            data,
            stored_at: Utc::now(),
        }
    }

    /// Whether the record is older than `ttl`.
    pub fn is_stale(&self, ttl: Duration) -> bool {
        self.is_stale_at(Utc::now(), ttl)
    }

    /// Whether the record is older than `ttl` as of `now`.
    /// Records stamped in the future count as fresh.
    pub fn is_stale_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age = now
            .signed_duration_since(self.stored_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        age > ttl
    }
}

/// Load and decode the record under `key`.
///
/// Store errors and undecodable values are reported as a miss.
pub async fn read_record<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Option<CacheRecord<T>> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "cache miss");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e, "cache read failed, treating as miss");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(key, error = %e, "cache record undecodable, treating as miss");
            None
        }
    }
}

/// Encode `data` as a fresh record and store it under `key`.
pub async fn write_record<T: Serialize + Sync>(
    store: &dyn KvStore,
    key: &str,
    data: &T,
) -> Result<()> {
    let record = CacheRecord::new(data);
    let json = serde_json::to_string(&record)?;
    store.put(key, json).await
}
