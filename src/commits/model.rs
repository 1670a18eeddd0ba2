// Commit activity data model.
// The normalized shape that is cached and handed to the page layer.

use serde::{Deserialize, Serialize};

/// Lines of code for one language in the language breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitLanguage {
    pub size: u64,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// One normalized commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedCommit {
    /// `owner/name` of the repository.
    pub repo: String,
    /// First line of the commit message.
    pub message: String,
    /// Web URL of the commit.
    pub href: String,
    /// Short commit id.
    pub sha: String,
    /// Timestamp string as reported by the source.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additions: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletions: Option<u64>,
}

/// Recent commit activity.
///
/// An empty value is a valid "nothing to show" state, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitData {
    pub commits: Vec<ProcessedCommit>,
    pub languages: Vec<CommitLanguage>,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub total_commits: u64,
}

/// Returned when neither GitHub nor the cache can supply anything.
pub static FALLBACK_COMMIT_DATA: CommitData = CommitData {
    commits: Vec::new(),
    languages: Vec::new(),
    total_additions: 0,
    total_deletions: 0,
    total_commits: 0,
};

impl CommitData {
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}
