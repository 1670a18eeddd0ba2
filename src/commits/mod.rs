// Commit activity module.
// Normalized commit data, conversions from upstream shapes, and the cached feed.

pub mod feed;
pub mod model;
pub mod normalize;

pub use feed::CommitFeed;
pub use model::{CommitData, CommitLanguage, FALLBACK_COMMIT_DATA, ProcessedCommit};
pub use normalize::{
    MAX_COMMITS, RichCommit, RichCommitResponse, RichStats, collect_push_commits, normalize,
};
