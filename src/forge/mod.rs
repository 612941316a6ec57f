//! CommitSource trait and source-control platform integration.
//!
//! Decouples the collector from the concrete platform API so the
//! fan-out and reduction logic can be driven by in-memory fakes.

pub mod github;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{CommitRef, CommitSummary, RepoRef};

pub use github::GitHubClient;

/// Errors from the source-control platform.
#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("source control not configured: {0}")]
    NotConfigured(String),

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("{url} responded with HTTP {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Read access to a repository's recent commits.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// List commits authored at or after `since`, newest first.
    async fn list_commits(
        &self,
        repo: &RepoRef,
        since: DateTime<Utc>,
    ) -> Result<Vec<CommitRef>, ForgeError>;

    /// Fetch stats, author and file patches for one commit.
    async fn fetch_commit(&self, commit: &CommitRef) -> Result<CommitSummary, ForgeError>;
}
