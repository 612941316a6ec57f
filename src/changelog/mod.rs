//! Changelog generator: turns attributed diffs into a markdown changelog.
//!
//! Builds one prompt from the diffs and the author avatars and hands it to
//! a [`SummaryProvider`]. A single attempt is made; failures surface as-is.

pub mod prompt;

use std::sync::Arc;

use thiserror::Error;

use crate::models::{AvatarMap, RepoRef};
use crate::providers::{ProviderError, SummaryProvider};

/// Errors from changelog generation.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("summarization service returned an empty changelog")]
    EmptyChangelog,
}

/// Produces changelog text for a repository.
pub struct ChangelogGenerator {
    provider: Arc<dyn SummaryProvider>,
}

impl ChangelogGenerator {
    pub fn new(provider: Arc<dyn SummaryProvider>) -> Self {
        Self { provider }
    }

    /// Generate a changelog grouped by author from `diffs` and `avatars`.
    pub async fn generate(
        &self,
        diffs: &[String],
        avatars: &AvatarMap,
        repo: &RepoRef,
    ) -> Result<String, ChangelogError> {
        let prompt = prompt::build_prompt(diffs, avatars);
        tracing::debug!(
            "built changelog prompt for {repo}: {} diff(s), {} author(s)",
            diffs.len(),
            avatars.len()
        );

        let changelog = self.provider.query(&prompt, repo).await?;
        if changelog.trim().is_empty() {
            return Err(ChangelogError::EmptyChangelog);
        }
        Ok(changelog)
    }
}
