// Cached commit activity with stale-while-revalidate refresh.
// Reads go to the store first; GitHub is only asked when the snapshot is missing
// or past its TTL, and every failure ends in a usable value.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, instrument, warn};

use crate::cache::{KvStore, read_record, write_record};
use crate::config::CommitsConfig;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::perf;

use super::model::{CommitData, FALLBACK_COMMIT_DATA};
use super::normalize::collect_push_commits;

/// Source of recent commit activity for the site.
///
/// Cloning is cheap; clones share the HTTP client, the store, and the set of
/// background refreshes in flight.
#[derive(Clone)]
pub struct CommitFeed {
    client: GitHubClient,
    store: Option<Arc<dyn KvStore>>,
    config: Arc<CommitsConfig>,
    background: TaskTracker,
}

impl CommitFeed {
    /// Create a feed with no cache; every call goes to GitHub.
    pub fn new(config: CommitsConfig) -> Result<Self> {
        Ok(Self {
            client: GitHubClient::new(&config)?,
            store: None,
            config: Arc::new(config),
            background: TaskTracker::new(),
        })
    }

    /// Cache snapshots in `store`.
    pub fn with_store(mut self, store: Arc<dyn KvStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(&self) -> &CommitsConfig {
        &self.config
    }

    /// Latest commit activity.
    ///
    /// A cached snapshot is returned as is; if it is past its TTL a refresh is
    /// started in the background for the next caller. Without a snapshot this
    /// waits for GitHub.
    #[instrument(skip(self), fields(key = %self.config.cache_key))]
    pub async fn latest(&self) -> CommitData {
        if let Some(store) = &self.store {
            if let Some(record) =
                read_record::<CommitData>(store.as_ref(), &self.config.cache_key).await
            {
                if record.is_stale(self.config.ttl) {
                    info!(stored_at = %record.stored_at, "cache stale, refreshing in background");
                    self.spawn_refresh();
                } else {
                    debug!(stored_at = %record.stored_at, "cache fresh");
                }
                return record.data;
            }
        }

        info!("no cached commits, fetching from GitHub");
        self.refresh().await
    }

    /// Fetch from GitHub and update the cache.
    ///
    /// On failure, the last cached snapshot (of any age) is returned, and
    /// failing that [`FALLBACK_COMMIT_DATA`].
    pub async fn refresh(&self) -> CommitData {
        perf::measure("github-api-fetch", async {
            match self.fetch_live().await {
                Ok(data) => {
                    self.store_snapshot(&data).await;
                    data
                }
                Err(e) => {
                    warn!(error = %e, "github fetch failed");
                    self.last_known().await
                }
            }
        })
        .await
    }

    async fn fetch_live(&self) -> Result<CommitData> {
        let events = self.client.get_public_events(&self.config.username).await?;
        Ok(collect_push_commits(
            &events,
            &self.config.web_base,
            Utc::now(),
        ))
    }

    async fn store_snapshot(&self, data: &CommitData) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = write_record(store.as_ref(), &self.config.cache_key, data).await {
            warn!(error = %e, "failed to write commit cache");
        }
    }

    async fn last_known(&self) -> CommitData {
        if let Some(store) = &self.store {
            if let Some(record) =
                read_record::<CommitData>(store.as_ref(), &self.config.cache_key).await
            {
                info!(stored_at = %record.stored_at, "using cached commits after fetch failure");
                return record.data;
            }
        }

        info!("using fallback commits after fetch failure");
        FALLBACK_COMMIT_DATA.clone()
    }

    /// Wait up to `limit` for background refreshes started by this feed.
    ///
    /// Returns `false` if some were still running when the limit passed. Reads
    /// never wait on this; a short-lived process calls it before exiting.
    pub async fn finish_background(&self, limit: Duration) -> bool {
        self.background.close();
        let finished = tokio::time::timeout(limit, self.background.wait())
            .await
            .is_ok();
        self.background.reopen();

        if !finished {
            warn!(
                pending = self.background.len(),
                "background refresh still running at shutdown"
            );
        }
        finished
    }

    /// Run a refresh detached from the caller. Nothing awaits it on the read path.
    fn spawn_refresh(&self) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime, skipping background refresh");
            return;
        };

        let feed = self.clone();
        self.background.spawn_on(
            async move {
                let data = feed.refresh().await;
                debug!(commits = data.commits.len(), "background refresh finished");
            },
            &runtime,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::test_support::UnreachableStore;
    use crate::cache::{CacheRecord, MemoryStore};
    use crate::commits::ProcessedCommit;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const EVENTS_PATH: &str = "/users/teamial/events/public";

    fn feed_json() -> serde_json::Value {
        json!([{
            "type": "PushEvent",
            "repo": { "name": "a/b" },
            "payload": { "commits": [{ "sha": "1111111aaaa", "message": "m1" }] },
            "created_at": "2025-03-01T12:00:00Z"
        }])
    }

    fn cached_data() -> CommitData {
        CommitData {
            commits: vec![ProcessedCommit {
                repo: "old/repo".to_string(),
                message: "from cache".to_string(),
                href: "https://github.com/old/repo/commit/9999999zzz".to_string(),
                sha: "9999999".to_string(),
                date: "2024-01-01T00:00:00Z".to_string(),
                additions: None,
                deletions: None,
            }],
            languages: Vec::new(),
            total_additions: 0,
            total_deletions: 0,
            total_commits: 1,
        }
    }

    async fn seed(store: &MemoryStore, age: chrono::Duration) {
        let mut record = CacheRecord::new(cached_data());
        record.stored_at = Utc::now() - age;
        store
            .put("github:commits", serde_json::to_string(&record).unwrap())
            .await
            .unwrap();
    }

    fn config_for(server: &MockServer) -> CommitsConfig {
        let mut config = CommitsConfig::default().with_api_base(server.uri());
        config.timeout = Duration::from_millis(100);
        config
    }

    async fn serve_feed(server: &MockServer, delay: Duration, expected: u64) {
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(feed_json())
                    .set_delay(delay),
            )
            .expect(expected)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_refresh_parses_and_stores() {
        let server = MockServer::start().await;
        serve_feed(&server, Duration::ZERO, 1).await;
        let store = Arc::new(MemoryStore::new());

        let feed = CommitFeed::new(config_for(&server))
            .unwrap()
            .with_store(store.clone());
        let data = feed.refresh().await;

        assert_eq!(data.commits.len(), 1);
        assert_eq!(data.commits[0].sha, "1111111");
        assert_eq!(data.commits[0].href, "https://github.com/a/b/commit/1111111aaaa");

        let record: CacheRecord<CommitData> =
            read_record(store.as_ref(), "github:commits").await.unwrap();
        assert_eq!(record.data, data);
    }

    #[tokio::test]
    async fn test_timeout_returns_stored_record_of_any_age() {
        let server = MockServer::start().await;
        serve_feed(&server, Duration::from_millis(500), 1).await;
        let store = Arc::new(MemoryStore::new());
        seed(&store, chrono::Duration::days(30)).await;

        let feed = CommitFeed::new(config_for(&server))
            .unwrap()
            .with_store(store);

        assert_eq!(feed.refresh().await, cached_data());
    }

    #[tokio::test]
    async fn test_timeout_with_empty_store_returns_fallback() {
        let server = MockServer::start().await;
        serve_feed(&server, Duration::from_millis(500), 1).await;

        let feed = CommitFeed::new(config_for(&server))
            .unwrap()
            .with_store(Arc::new(MemoryStore::new()));

        assert_eq!(feed.refresh().await, FALLBACK_COMMIT_DATA);
    }

    #[tokio::test]
    async fn test_error_status_without_store_returns_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;

        let feed = CommitFeed::new(config_for(&server)).unwrap();

        assert_eq!(feed.refresh().await, FALLBACK_COMMIT_DATA);
    }

    #[tokio::test]
    async fn test_unreachable_store_still_returns_fresh_data() {
        let server = MockServer::start().await;
        serve_feed(&server, Duration::ZERO, 1).await;

        let feed = CommitFeed::new(config_for(&server))
            .unwrap()
            .with_store(Arc::new(UnreachableStore));

        let data = feed.latest().await;
        assert_eq!(data.commits.len(), 1);
        assert_eq!(data.commits[0].message, "m1");
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_upstream() {
        let server = MockServer::start().await;
        serve_feed(&server, Duration::ZERO, 0).await;
        let store = Arc::new(MemoryStore::new());
        seed(&store, chrono::Duration::minutes(5)).await;

        let feed = CommitFeed::new(config_for(&server))
            .unwrap()
            .with_store(store);

        assert_eq!(feed.latest().await, cached_data());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stale_cache_served_while_refreshing() {
        let server = MockServer::start().await;
        serve_feed(&server, Duration::from_millis(50), 1).await;
        let store = Arc::new(MemoryStore::new());
        seed(&store, chrono::Duration::hours(2)).await;

        let feed = CommitFeed::new(config_for(&server))
            .unwrap()
            .with_store(store.clone());

        let started = std::time::Instant::now();
        let data = feed.latest().await;
        assert_eq!(data, cached_data());
        assert!(started.elapsed() < Duration::from_millis(50));

        // The background task replaces the snapshot once GitHub answers.
        assert!(feed.finish_background(Duration::from_secs(2)).await);

        let refreshed: CacheRecord<CommitData> =
            read_record(store.as_ref(), "github:commits").await.unwrap();
        assert_eq!(refreshed.data.commits[0].sha, "1111111");
        assert!(!refreshed.is_stale(Duration::from_secs(3600)));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_finish_background_reports_slow_refresh() {
        let server = MockServer::start().await;
        serve_feed(&server, Duration::from_millis(200), 1).await;
        let store = Arc::new(MemoryStore::new());
        seed(&store, chrono::Duration::hours(2)).await;

        let mut config = config_for(&server);
        config.timeout = Duration::from_secs(1);
        let feed = CommitFeed::new(config)
            .unwrap()
            .with_store(store.clone());

        assert_eq!(feed.latest().await, cached_data());
        assert!(!feed.finish_background(Duration::from_millis(10)).await);
        assert!(feed.finish_background(Duration::from_secs(2)).await);

        let record: CacheRecord<CommitData> =
            read_record(store.as_ref(), "github:commits").await.unwrap();
        assert_eq!(record.data.commits[0].sha, "1111111");
    }

    #[tokio::test]
    async fn test_finish_background_with_nothing_pending() {
        let server = MockServer::start().await;
        serve_feed(&server, Duration::ZERO, 0).await;

        let feed = CommitFeed::new(config_for(&server)).unwrap();

        assert!(feed.finish_background(Duration::from_millis(10)).await);
    }

    #[tokio::test]
    async fn test_malformed_sub_commit_keeps_event() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "type": "PushEvent",
                "repo": { "name": "a/b" },
                "payload": { "commits": [
                    { "sha": "1111111aaaa", "message": "good" },
                    { "sha": 42 }
                ] },
                "created_at": "2025-03-01T12:00:00Z"
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let feed = CommitFeed::new(config_for(&server)).unwrap();
        let data = feed.refresh().await;

        assert_eq!(data.total_commits, 1);
        assert_eq!(data.commits[0].sha, "1111111");
        assert_eq!(data.commits[0].message, "good");
    }

    #[tokio::test]
    async fn test_empty_cache_waits_for_upstream() {
        let server = MockServer::start().await;
        serve_feed(&server, Duration::ZERO, 1).await;
        let store = Arc::new(MemoryStore::new());

        let feed = CommitFeed::new(config_for(&server))
            .unwrap()
            .with_store(store.clone());

        let data = feed.latest().await;
        assert_eq!(data.commits[0].sha, "1111111");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_custom_ttl_controls_staleness() {
        let server = MockServer::start().await;
        serve_feed(&server, Duration::ZERO, 0).await;
        let store = Arc::new(MemoryStore::new());
        seed(&store, chrono::Duration::hours(2)).await;

        let config = config_for(&server).with_ttl_ms(3 * 60 * 60 * 1000);
        let feed = CommitFeed::new(config).unwrap().with_store(store);

        assert_eq!(feed.latest().await, cached_data());
    }
}
