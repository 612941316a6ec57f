//! Greptile query API provider.
//!
//! Sends one user message plus a repository reference to `POST /query`
//! and returns the `message` field of the answer. Greptile reads the
//! repository itself, so it needs the GitHub token alongside its own key.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::config::GreptileConfig;
use crate::constants;
use crate::models::RepoRef;
use crate::providers::{ProviderError, SummaryProvider};

/// Header carrying the source-control token Greptile uses to read the repository.
const GITHUB_TOKEN_HEADER: &str = "X-Github-Token";

/// Greptile-backed [`SummaryProvider`].
pub struct GreptileProvider {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    github_token: String,
    branch: String,
    genius: bool,
}

impl GreptileProvider {
    /// Build a provider, failing if the Greptile key or GitHub token is missing.
    pub fn new(config: &GreptileConfig, github_token: Option<&str>) -> Result<Self, ProviderError> {
        let api_key = non_blank(config.api_key.as_deref()).ok_or_else(|| {
            ProviderError::NotConfigured(format!(
                "Greptile API key is missing (set {} or {})",
                constants::ENV_GREPTILE_API_KEY,
                constants::ENV_GREPTILE_API_KEY_FALLBACK
            ))
        })?;
        let github_token = non_blank(github_token).ok_or_else(|| {
            ProviderError::NotConfigured(format!(
                "GitHub token is missing (set {} or {})",
                constants::ENV_GITHUB_TOKEN,
                constants::ENV_GITHUB_TOKEN_FALLBACK
            ))
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            github_token: github_token.to_string(),
            branch: config.branch.clone(),
            genius: config.genius,
        })
    }

    fn query_endpoint(&self) -> String {
        format!("{}/query", self.api_url)
    }

    fn build_request<'a>(&self, prompt: &'a str, repo: &RepoRef) -> QueryRequest<'a> {
        QueryRequest {
            messages: vec![QueryMessage {
                content: prompt,
                role: "user",
            }],
            repositories: vec![QueryRepository {
                remote: constants::GREPTILE_REMOTE,
                repository: repo.full_name(),
                branch: self.branch.clone(),
            }],
            genius: self.genius,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
impl SummaryProvider for GreptileProvider {
    async fn query(&self, prompt: &str, repo: &RepoRef) -> Result<String, ProviderError> {
        let body = self.build_request(prompt, repo);
        tracing::info!(
            "querying Greptile for {repo} ({} prompt chars, genius: {})",
            prompt.len(),
            self.genius
        );

        let response = self
            .http
            .post(self.query_endpoint())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(GITHUB_TOKEN_HEADER, &self.github_token)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, constants::USER_AGENT)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            tracing::error!("Greptile responded with {status}: {detail}");
            let status_text = status.canonical_reason().unwrap_or(status.as_str());
            return Err(ProviderError::ApiError(format!(
                "failed to generate changelog: {status_text}"
            )));
        }

        let payload: QueryResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        payload
            .message
            .ok_or_else(|| ProviderError::ParseError("response has no `message` field".to_string()))
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    messages: Vec<QueryMessage<'a>>,
    repositories: Vec<QueryRepository>,
    genius: bool,
}

#[derive(Debug, Serialize)]
struct QueryMessage<'a> {
    content: &'a str,
    role: &'static str,
}

#[derive(Debug, Serialize)]
struct QueryRepository {
    remote: &'static str,
    repository: String,
    branch: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config(api_url: &str, api_key: Option<&str>) -> GreptileConfig {
        GreptileConfig {
            api_key: api_key.map(Into::into),
            api_url: api_url.to_string(),
            ..GreptileConfig::default()
        }
    }

    #[test]
    fn new_requires_api_key() {
        let err = GreptileProvider::new(&config("http://localhost", None), Some("ghp"))
            .err()
            .unwrap();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
        assert!(err.to_string().contains("Greptile API key is missing"));
    }

    #[test]
    fn new_requires_github_token() {
        let err = GreptileProvider::new(&config("http://localhost", Some("gk")), None)
            .err()
            .unwrap();
        assert!(err.to_string().contains("GitHub token is missing"));

        let err = GreptileProvider::new(&config("http://localhost", Some("gk")), Some(""))
            .err()
            .unwrap();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[test]
    fn request_body_shape() {
        let provider =
            GreptileProvider::new(&config("http://localhost", Some("gk")), Some("ghp")).unwrap();
        let body = provider.build_request("summarize", &RepoRef::new("octo", "hello"));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "messages": [{ "content": "summarize", "role": "user" }],
                "repositories": [{ "remote": "github", "repository": "octo/hello", "branch": "main" }],
                "genius": true
            })
        );
    }

    #[tokio::test]
    async fn query_sends_both_credentials_and_returns_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/query")
            .match_header("authorization", "Bearer gk_test")
            .match_header("x-github-token", "ghp_test")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(serde_json::json!({ "genius": true })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({ "message": "## Changelog\n- fixed things", "sources": [] })
                    .to_string(),
            )
            .create_async()
            .await;

        let provider =
            GreptileProvider::new(&config(&server.url(), Some("gk_test")), Some("ghp_test")).unwrap();
        let answer = provider
            .query("prompt", &RepoRef::new("octo", "hello"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(answer, "## Changelog\n- fixed things");
    }

    #[tokio::test]
    async fn non_success_carries_status_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/query")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let provider =
            GreptileProvider::new(&config(&server.url(), Some("gk")), Some("ghp")).unwrap();
        let err = provider
            .query("prompt", &RepoRef::new("o", "r"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::ApiError(_)));
        assert_eq!(
            err.to_string(),
            "failed to generate changelog: Internal Server Error"
        );
    }

    #[tokio::test]
    async fn missing_message_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/query")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sources":[]}"#)
            .create_async()
            .await;

        let provider =
            GreptileProvider::new(&config(&server.url(), Some("gk")), Some("ghp")).unwrap();
        let err = provider
            .query("prompt", &RepoRef::new("o", "r"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::ParseError(_)));
    }

    #[tokio::test]
    async fn missing_credentials_make_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        assert!(GreptileProvider::new(&config(&server.url(), None), Some("ghp")).is_err());
        assert!(GreptileProvider::new(&config(&server.url(), Some("gk")), None).is_err());
        mock.assert_async().await;
    }
}
