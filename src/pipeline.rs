//! End-to-end changelog pipeline: URL → diffs → changelog.
//!
//! Stateless per run. Each call parses the URL, runs the collector, then
//! the generator, and fails fast on the first error from either stage.

use std::sync::Arc;

use thiserror::Error;

use crate::changelog::{ChangelogError, ChangelogGenerator};
use crate::collector::{CollectorError, DiffCollector};
use crate::config::Config;
use crate::forge::{CommitSource, ForgeError, GitHubClient};
use crate::models::{ChangelogReport, RepoRef};
use crate::providers::{GreptileProvider, ProviderError, SummaryProvider};

/// Errors from any pipeline stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Forge(#[from] ForgeError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Collector(#[from] CollectorError),

    #[error(transparent)]
    Changelog(#[from] ChangelogError),
}

/// Collector and generator wired together.
pub struct ChangelogPipeline {
    collector: DiffCollector,
    generator: ChangelogGenerator,
}

impl ChangelogPipeline {
    pub fn new(
        source: Arc<dyn CommitSource>,
        provider: Arc<dyn SummaryProvider>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            collector: DiffCollector::new(source, max_concurrent),
            generator: ChangelogGenerator::new(provider),
        }
    }

    /// Build the GitHub + Greptile pipeline, validating both credentials.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let github = GitHubClient::new(&config.github)?;
        let greptile = GreptileProvider::new(&config.greptile, config.github.token.as_deref())?;
        Ok(Self::new(
            Arc::new(github),
            Arc::new(greptile),
            config.github.max_concurrent,
        ))
    }

    /// Generate a changelog for the repository at `url` covering the last `days` days.
    ///
    /// Returns `Ok(None)` without touching the network when `url` does not
    /// end in two non-empty path segments.
    pub async fn run(&self, url: &str, days: u32) -> Result<Option<ChangelogReport>, PipelineError> {
        let Some(repo) = RepoRef::parse(url) else {
            tracing::warn!("could not find owner/repository in '{url}'");
            return Ok(None);
        };

        tracing::info!("generating changelog for {repo} over {days} day(s)");
        let diff = self.collector.collect(&repo, days).await?;
        let changelog = self
            .generator
            .generate(&diff.diffs, &diff.avatars, &repo)
            .await?;

        Ok(Some(ChangelogReport::new(repo, days, &diff, changelog)))
    }
}
