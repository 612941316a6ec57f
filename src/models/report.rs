//! Aggregated results of a collection run and the final changelog report.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::commit::CommitSummary;
use super::repo::RepoRef;

/// Author handle → avatar URL, in first-seen order.
pub type AvatarMap = IndexMap<String, String>;

/// Everything the collector derives from the commits in the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDiff {
    pub additions: u64,
    pub deletions: u64,
    /// `additions - deletions`; negative when more lines were removed.
    pub net_diff: i64,
    /// One attributed diff per changed file, commit order then file order.
    pub diffs: Vec<String>,
    pub avatars: AvatarMap,
    pub commit_count: usize,
}

impl RepoDiff {
    /// Reduce fetched commits into totals, attributed diffs and avatars.
    ///
    /// Commits are folded in slice order. When two commits share a handle,
    /// the later commit's avatar wins while the handle keeps its original
    /// position in the map.
    pub fn from_commits(commits: &[CommitSummary]) -> Self {
        let folded = commits.iter().fold(Self::default(), |mut acc, commit| {
            acc.additions += commit.stats.additions;
            acc.deletions += commit.stats.deletions;
            acc.diffs.extend(commit.attributed_diffs());
            if let Some(avatar) = &commit.author.avatar_url {
                acc.avatars
                    .insert(commit.author.login.clone(), avatar.clone());
            }
            acc
        });

        Self {
            net_diff: folded.additions as i64 - folded.deletions as i64,
            commit_count: commits.len(),
            ..folded
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commit_count == 0
    }
}

/// A generated changelog together with the stats it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogReport {
    pub repository: RepoRef,
    pub days: u32,
    pub additions: u64,
    pub deletions: u64,
    pub net_diff: i64,
    pub commit_count: usize,
    pub file_count: usize,
    /// Markdown returned by the summarization service.
    pub changelog: String,
}

impl ChangelogReport {
    pub fn new(repository: RepoRef, days: u32, diff: &RepoDiff, changelog: String) -> Self {
        Self {
            repository,
            days,
            additions: diff.additions,
            deletions: diff.deletions,
            net_diff: diff.net_diff,
            commit_count: diff.commit_count,
            file_count: diff.diffs.len(),
            changelog,
        }
    }
}
