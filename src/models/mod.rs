//! Shared types used across all modules.
//!
//! Repository references, commit summaries and the aggregate diff live here
//! so the collector, generator and renderers never reach into each other.

pub mod commit;
pub mod repo;
pub mod report;

pub use commit::{ChangedFile, CommitAuthor, CommitRef, CommitStats, CommitSummary};
pub use repo::RepoRef;
pub use report::{AvatarMap, ChangelogReport, RepoDiff};
