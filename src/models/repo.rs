//! Owner/name pair identifying a hosted repository.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A repository on the source-control platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse the last two `/`-delimited segments of `url` as owner and name.
    ///
    /// The scheme and host are irrelevant: `https://github.com/a/b`,
    /// `github.com/a/b/` and `a/b` all yield `a/b`. A trailing `.git`, query
    /// string or fragment is dropped first. Returns `None` when either
    /// segment would be empty.
    pub fn parse(url: &str) -> Option<Self> {
        let mut trimmed = url.trim();
        if let Some(pos) = trimmed.find(['?', '#']) {
            trimmed = &trimmed[..pos];
        }
        let trimmed = trimmed.trim_end_matches('/');
        let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

        let mut segments = trimmed.rsplit('/');
        let name = segments.next().filter(|s| !s.is_empty())?;
        let owner = segments.next().filter(|s| !s.is_empty())?;

        Some(Self::new(owner, name))
    }

    /// `owner/name`, as used by both upstream APIs.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
