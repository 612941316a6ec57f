//! Per-commit data returned by the source-control platform.

use serde::{Deserialize, Serialize};

/// Pointer to a commit as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    /// SHA of the commit.
    pub sha: String,
    /// Self-referential API URL for the commit detail.
    pub url: String,
}

/// Who authored a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
    /// Platform handle, or the git author name when the commit is not
    /// linked to an account.
    pub login: String,
    /// Profile picture, present only for linked accounts.
    pub avatar_url: Option<String>,
}

/// Line counts for a single commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
}

/// One changed file within a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    /// Unified diff text. Empty for binary or oversized files.
    pub patch: String,
}

/// Fully fetched commit: author, stats and file patches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub author: CommitAuthor,
    pub stats: CommitStats,
    pub files: Vec<ChangedFile>,
}

impl CommitSummary {
    /// Format every file as `Author: {login}. File: {filename}\n{patch}`,
    /// in file order.
    pub fn attributed_diffs(&self) -> impl Iterator<Item = String> + '_ {
        self.files.iter().map(|file| {
            format!(
                "Author: {}. File: {}\n{}",
                self.author.login, file.filename, file.patch
            )
        })
    }
}
