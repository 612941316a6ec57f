//! GitHub REST API client for commit listings and commit details.
//!
//! Authenticates with a bearer token from [`GitHubConfig`]. The token is
//! checked in [`GitHubClient::new`], so a client that exists can always
//! authenticate and a missing token never reaches the network.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::GitHubConfig;
use crate::constants;
use crate::forge::{CommitSource, ForgeError};
use crate::models::{ChangedFile, CommitAuthor, CommitRef, CommitStats, CommitSummary, RepoRef};

/// Client for the GitHub commits API.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    /// Build a client, failing if no token is configured.
    pub fn new(config: &GitHubConfig) -> Result<Self, ForgeError> {
        let token = config
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ForgeError::NotConfigured(format!(
                    "GitHub token is missing (set {} or {})",
                    constants::ENV_GITHUB_TOKEN,
                    constants::ENV_GITHUB_TOKEN_FALLBACK
                ))
            })?;

        Ok(Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn commits_endpoint(&self, repo: &RepoRef) -> String {
        format!("{}/repos/{}/{}/commits", self.api_url, repo.owner, repo.name)
    }

    /// GET `url` with the standard headers and decode a JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ForgeError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .header(ACCEPT, constants::GITHUB_MEDIA_TYPE)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(USER_AGENT, constants::USER_AGENT)
            .send()
            .await
            .map_err(|e| ForgeError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForgeError::Status {
                status,
                url: url.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ForgeError::MalformedResponse(format!("{url}: {e}")))
    }
}

/// Format a cutoff the way the `since` query parameter expects it.
pub fn format_since(since: DateTime<Utc>) -> String {
    since.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[async_trait]
impl CommitSource for GitHubClient {
    async fn list_commits(
        &self,
        repo: &RepoRef,
        since: DateTime<Utc>,
    ) -> Result<Vec<CommitRef>, ForgeError> {
        let url = self.commits_endpoint(repo);
        let entries: Vec<ListEntry> = self
            .get_json(&url, &[("since", format_since(since))])
            .await?;

        tracing::debug!("{} commit(s) in {repo} since {since}", entries.len());

        Ok(entries
            .into_iter()
            .map(|e| CommitRef {
                sha: e.sha,
                url: e.url,
            })
            .collect())
    }

    async fn fetch_commit(&self, commit: &CommitRef) -> Result<CommitSummary, ForgeError> {
        tracing::debug!("fetching commit {}", commit.sha);
        let detail: CommitDetail = self.get_json(&commit.url, &[]).await?;
        detail.into_summary(&commit.sha)
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ListEntry {
    sha: String,
    url: String,
}

#[derive(Deserialize)]
struct CommitDetail {
    author: Option<ApiUser>,
    commit: Option<GitCommit>,
    stats: Option<ApiStats>,
    files: Option<Vec<ApiFile>>,
}

#[derive(Deserialize)]
struct ApiUser {
    login: String,
    avatar_url: Option<String>,
}

#[derive(Deserialize)]
struct GitCommit {
    author: Option<GitAuthor>,
}

#[derive(Deserialize)]
struct GitAuthor {
    name: Option<String>,
}

#[derive(Deserialize)]
struct ApiStats {
    additions: u64,
    deletions: u64,
    total: u64,
}

#[derive(Deserialize)]
struct ApiFile {
    filename: String,
    patch: Option<String>,
}

impl CommitDetail {
    fn into_summary(self, sha: &str) -> Result<CommitSummary, ForgeError> {
        let stats = self
            .stats
            .ok_or_else(|| ForgeError::MalformedResponse(format!("commit {sha} has no stats")))?;
        let files = self
            .files
            .ok_or_else(|| ForgeError::MalformedResponse(format!("commit {sha} has no files")))?;

        // Commits whose email is not linked to an account come back with a
        // null `author`; attribute them to the git author name instead.
        let author = match self.author {
            Some(user) => CommitAuthor {
                login: user.login,
                avatar_url: user.avatar_url,
            },
            None => {
                let name = self
                    .commit
                    .and_then(|c| c.author)
                    .and_then(|a| a.name)
                    .ok_or_else(|| {
                        ForgeError::MalformedResponse(format!("commit {sha} has no author"))
                    })?;
                CommitAuthor {
                    login: name,
                    avatar_url: None,
                }
            }
        };

        Ok(CommitSummary {
            author,
            stats: CommitStats {
                additions: stats.additions,
                deletions: stats.deletions,
                total: stats.total,
            },
            files: files
                .into_iter()
                .map(|f| ChangedFile {
                    filename: f.filename,
                    patch: f.patch.unwrap_or_default(),
                })
                .collect(),
        })
    }
}
