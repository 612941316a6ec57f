//! Diff collector: lookback window, bounded commit fan-out, and reduction.
//!
//! Lists the commits in the window, fetches every commit's detail with at
//! most `max_concurrent` requests in flight, reassembles the details in
//! listing order and folds them into a [`RepoDiff`].

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::constants::MAX_LOOKBACK_DAYS;
use crate::forge::{CommitSource, ForgeError};
use crate::models::{CommitRef, CommitSummary, RepoDiff, RepoRef};

/// Errors from the collector.
#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("invalid lookback window of {0} day(s); expected 1..={MAX_LOOKBACK_DAYS}")]
    InvalidWindow(u32),

    #[error("cannot determine owner and repository from '{0}'")]
    InvalidRepoUrl(String),

    #[error(transparent)]
    Forge(#[from] ForgeError),

    #[error("commit fetch task failed: {0}")]
    TaskFailed(String),
}

/// Compute the start of a `days`-long window ending at `now`.
pub fn lookback_cutoff(now: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>, CollectorError> {
    if days == 0 || days > MAX_LOOKBACK_DAYS {
        return Err(CollectorError::InvalidWindow(days));
    }
    now.checked_sub_signed(TimeDelta::days(i64::from(days)))
        .ok_or(CollectorError::InvalidWindow(days))
}

/// Gathers and aggregates recent commits for a repository.
pub struct DiffCollector {
    source: Arc<dyn CommitSource>,
    max_concurrent: usize,
}

impl DiffCollector {
    /// Create a collector. `max_concurrent` is clamped to at least 1.
    pub fn new(source: Arc<dyn CommitSource>, max_concurrent: usize) -> Self {
        Self {
            source,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Collect diffs for the repository named by the last two segments of `repo_url`.
    pub async fn collect_diffs(&self, repo_url: &str, days: u32) -> Result<RepoDiff, CollectorError> {
        let repo = RepoRef::parse(repo_url)
            .ok_or_else(|| CollectorError::InvalidRepoUrl(repo_url.to_string()))?;
        self.collect(&repo, days).await
    }

    /// Collect diffs for the last `days` days of `repo`.
    pub async fn collect(&self, repo: &RepoRef, days: u32) -> Result<RepoDiff, CollectorError> {
        let since = lookback_cutoff(Utc::now(), days)?;
        self.collect_since(repo, since).await
    }

    /// Collect diffs for every commit since `since`.
    ///
    /// Any failure aborts the whole run; partial results are never returned.
    pub async fn collect_since(
        &self,
        repo: &RepoRef,
        since: DateTime<Utc>,
    ) -> Result<RepoDiff, CollectorError> {
        tracing::info!("listing commits for {repo} since {since}");
        let refs = self.source.list_commits(repo, since).await?;
        if refs.is_empty() {
            tracing::info!("no commits in window for {repo}");
            return Ok(RepoDiff::default());
        }

        let commits = self.fetch_all(refs).await?;
        let diff = RepoDiff::from_commits(&commits);
        tracing::info!(
            "collected {} commit(s), {} file diff(s): +{} -{}",
            diff.commit_count,
            diff.diffs.len(),
            diff.additions,
            diff.deletions,
        );
        Ok(diff)
    }

    /// Fetch every commit detail and return them in `refs` order.
    async fn fetch_all(&self, refs: Vec<CommitRef>) -> Result<Vec<CommitSummary>, CollectorError> {
        let total = refs.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut join_set = JoinSet::new();

        for (index, commit) in refs.into_iter().enumerate() {
            let source = Arc::clone(&self.source);
            let sem = Arc::clone(&semaphore);

            join_set.spawn(async move {
                let _permit = match sem.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return (index, Err(CollectorError::TaskFailed(e.to_string()))),
                };
                let result = source
                    .fetch_commit(&commit)
                    .await
                    .map_err(CollectorError::from);
                (index, result)
            });
        }

        // Tasks finish in any order; slot each result back at its list index.
        // Returning early drops the JoinSet, which aborts the remaining fetches.
        let mut slots: Vec<Option<CommitSummary>> = vec![None; total];
        while let Some(joined) = join_set.join_next().await {
            let (index, result) = joined.map_err(|e| CollectorError::TaskFailed(e.to_string()))?;
            match result {
                Ok(summary) => slots[index] = Some(summary),
                Err(e) => {
                    tracing::warn!("commit fetch failed, aborting collection: {e}");
                    return Err(e);
                }
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| CollectorError::TaskFailed(format!("commit #{index} never completed")))
            })
            .collect()
    }
}
