// Conversions from upstream responses into CommitData.

use std::collections::HashSet;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::github::{Event, EventKind};

use super::model::{CommitData, CommitLanguage, ProcessedCommit};

/// Most commits kept in one snapshot.
pub const MAX_COMMITS: usize = 5;

const SHORT_SHA_LEN: usize = 7;

/// Build CommitData from a public events feed.
///
/// Walks push events in feed order, dropping commits with no repository or id
/// and commits already seen, and stops at [`MAX_COMMITS`]. Events without a
/// timestamp are dated `now`.
pub fn collect_push_commits(events: &[Event], web_base: &str, now: DateTime<Utc>) -> CommitData {
    let web_base = web_base.trim_end_matches('/');
    let mut seen = HashSet::new();
    let mut commits = Vec::with_capacity(MAX_COMMITS);

    'events: for event in events.iter().filter(|e| e.kind == EventKind::PushEvent) {
        let repo = event.repo_name();
        let date = event
            .created_at
            .clone()
            .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true));

        for commit in event.commits() {
            let (Some(repo), Some(sha)) = (repo, commit.sha.as_deref()) else {
                continue;
            };
            if sha.is_empty() || !seen.insert(sha) {
                continue;
            }

            commits.push(ProcessedCommit {
                repo: repo.to_string(),
                message: first_line(commit.message.as_deref().unwrap_or_default()),
                href: format!("{}/{}/commit/{}", web_base, repo, sha),
                sha: sha.chars().take(SHORT_SHA_LEN).collect(),
                date: date.clone(),
                additions: None,
                deletions: None,
            });

            if commits.len() >= MAX_COMMITS {
                break 'events;
            }
        }
    }

    let total_commits = commits.len() as u64;
    CommitData {
        commits,
        languages: Vec::new(),
        total_additions: 0,
        total_deletions: 0,
        total_commits,
    }
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or_default().trim_end().to_string()
}

/// Commit entry of the richer stats response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichCommit {
    pub repo: String,
    #[serde(default)]
    pub additions: Option<u64>,
    #[serde(default)]
    pub deletions: Option<u64>,
    pub commit_url: String,
    pub committed_date: String,
    pub oid: String,
    pub message_headline: String,
    #[serde(default)]
    pub message_body: String,
}

/// Aggregate totals of the richer stats response. Any of them may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichStats {
    pub total_additions: Option<u64>,
    pub total_deletions: Option<u64>,
    pub total_commits: Option<u64>,
}

/// Stats service response carrying per-commit line counts, a language
/// breakdown and optional totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichCommitResponse {
    #[serde(default)]
    pub commits: Vec<RichCommit>,
    #[serde(default)]
    pub languages: Vec<CommitLanguage>,
    #[serde(default)]
    pub stats: Option<RichStats>,
}

/// Convert a rich stats response into CommitData.
///
/// Totals present in `stats` are taken as given, even when they disagree with
/// the commits; missing totals are summed from the commits.
pub fn normalize(response: RichCommitResponse) -> CommitData {
    let commits: Vec<ProcessedCommit> = response
        .commits
        .into_iter()
        .map(|c| ProcessedCommit {
            repo: c.repo,
            message: c.message_headline,
            href: c.commit_url,
            sha: c.oid,
            date: c.committed_date,
            additions: c.additions,
            deletions: c.deletions,
        })
        .collect();

    let stats = response.stats.unwrap_or_default();
    let total_additions = stats
        .total_additions
        .unwrap_or_else(|| commits.iter().filter_map(|c| c.additions).sum());
    let total_deletions = stats
        .total_deletions
        .unwrap_or_else(|| commits.iter().filter_map(|c| c.deletions).sum());
    let total_commits = stats.total_commits.unwrap_or(commits.len() as u64);

    CommitData {
        commits,
        languages: response.languages,
        total_additions,
        total_deletions,
        total_commits,
    }
}
