// End-to-end checks of the commit feed against a file-backed cache.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nyx_site::cache::FileStore;
use nyx_site::{CommitFeed, CommitsConfig, FALLBACK_COMMIT_DATA};

fn push_event(repo: &str, sha: &str) -> serde_json::Value {
    json!({
        "type": "PushEvent",
        "repo": { "name": repo },
        "payload": { "commits": [{ "sha": sha, "message": format!("commit {}", sha) }] },
        "created_at": "2025-04-10T09:00:00Z"
    })
}

fn config_for(server: &MockServer) -> CommitsConfig {
    let mut config = CommitsConfig::default().with_api_base(server.uri());
    config.timeout = Duration::from_millis(200);
    config
}

#[tokio::test]
async fn snapshot_survives_upstream_outage() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::with_dir(temp_dir.path()));

    // First run: GitHub answers and the snapshot lands on disk.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/teamial/events/public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            push_event("teamial/site", "0123456789abcdef"),
            push_event("teamial/notes", "fedcba9876543210"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let feed = CommitFeed::new(config_for(&server))
        .unwrap()
        .with_store(store.clone());
    let first = feed.latest().await;
    assert_eq!(first.total_commits, 2);
    assert_eq!(first.commits[0].sha, "0123456");
    assert!(temp_dir.path().join("github_commits.json").exists());

    // Second run: GitHub is down, a forced refresh serves the snapshot.
    let down = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&down)
        .await;

    let feed = CommitFeed::new(config_for(&down)).unwrap().with_store(store);
    assert_eq!(feed.refresh().await, first);
}

#[tokio::test]
async fn no_cache_and_no_upstream_yields_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let feed = CommitFeed::new(config_for(&server)).unwrap();
    let data = feed.latest().await;

    assert_eq!(data, FALLBACK_COMMIT_DATA);
    assert_eq!(
        serde_json::to_value(&data).unwrap(),
        json!({
            "commits": [],
            "languages": [],
            "totalAdditions": 0,
            "totalDeletions": 0,
            "totalCommits": 0
        })
    );
}
