//! SummaryProvider trait and AI summarization integration.
//!
//! Provides an abstraction layer over the summarization service so the
//! changelog generator can be exercised without network access.

pub mod greptile;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::RepoRef;

pub use greptile::GreptileProvider;

/// Errors from the summarization provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    #[error("request to summarization service failed: {0}")]
    Request(String),

    #[error("{0}")]
    ApiError(String),

    #[error("failed to parse summarization response: {0}")]
    ParseError(String),
}

/// Answers a single-turn natural-language query about a repository.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Send `prompt` with `repo` as context and return the answer text.
    async fn query(&self, prompt: &str, repo: &RepoRef) -> Result<String, ProviderError>;
}
