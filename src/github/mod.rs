// GitHub API module.
// Client and types for the public events feed.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use types::*;
