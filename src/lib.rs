//! Data layer for a personal portfolio site.
//!
//! Serves recent GitHub commit activity from a key-value cache with
//! stale-while-revalidate refresh, plus the static profile content, redirect
//! table, and footer page-view counter the page layer renders.

pub mod cache;
pub mod commits;
pub mod config;
pub mod error;
pub mod footer;
pub mod github;
pub mod perf;
pub mod profile;
pub mod redirects;

pub use commits::{CommitData, CommitFeed, FALLBACK_COMMIT_DATA, ProcessedCommit};
pub use config::{CommitsConfig, FooterConfig, SiteConfig};
pub use error::{Result, SiteError};
