//! Integration test using in-memory commit source and summarizer.
//!
//! Drives `ChangelogPipeline` end-to-end without network access and checks
//! what reaches the summarizer, what comes back, and how failures surface.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;

use changelog_plus::forge::{CommitSource, ForgeError};
use changelog_plus::models::{
    ChangedFile, CommitAuthor, CommitRef, CommitStats, CommitSummary, RepoRef,
};
use changelog_plus::pipeline::{ChangelogPipeline, PipelineError};
use changelog_plus::providers::{ProviderError, SummaryProvider};

/// Serves a fixed list of commits keyed by sha.
struct MockSource {
    order: Vec<String>,
    commits: HashMap<String, CommitSummary>,
    list_calls: AtomicUsize,
    seen_repo: Mutex<Option<RepoRef>>,
}

impl MockSource {
    fn new(commits: Vec<(&str, CommitSummary)>) -> Self {
        Self {
            order: commits.iter().map(|(sha, _)| sha.to_string()).collect(),
            commits: commits
                .into_iter()
                .map(|(sha, c)| (sha.to_string(), c))
                .collect(),
            list_calls: AtomicUsize::new(0),
            seen_repo: Mutex::new(None),
        }
    }
}

#[async_trait]
impl CommitSource for MockSource {
    async fn list_commits(
        &self,
        repo: &RepoRef,
        _since: DateTime<Utc>,
    ) -> Result<Vec<CommitRef>, ForgeError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.seen_repo.lock().unwrap() = Some(repo.clone());
        Ok(self
            .order
            .iter()
            .map(|sha| CommitRef {
                sha: sha.clone(),
                url: format!("mock://{sha}"),
            })
            .collect())
    }

    async fn fetch_commit(&self, commit: &CommitRef) -> Result<CommitSummary, ForgeError> {
        self.commits
            .get(&commit.sha)
            .cloned()
            .ok_or_else(|| ForgeError::MalformedResponse(format!("commit {} has no stats", commit.sha)))
    }
}

/// Records every prompt and answers with a canned changelog.
struct MockSummarizer {
    answer: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl MockSummarizer {
    fn answering(text: &str) -> Self {
        Self {
            answer: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SummaryProvider for MockSummarizer {
    async fn query(&self, prompt: &str, _repo: &RepoRef) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer.clone().map_err(ProviderError::ApiError)
    }
}

fn commit(login: &str, avatar: Option<&str>, add: u64, del: u64, files: &[&str]) -> CommitSummary {
    CommitSummary {
        author: CommitAuthor {
            login: login.to_string(),
            avatar_url: avatar.map(str::to_string),
        },
        stats: CommitStats {
            additions: add,
            deletions: del,
            total: add + del,
        },
        files: files
            .iter()
            .map(|f| ChangedFile {
                filename: f.to_string(),
                patch: format!("+{f}"),
            })
            .collect(),
    }
}

fn pipeline(source: &Arc<MockSource>, summarizer: &Arc<MockSummarizer>) -> ChangelogPipeline {
    ChangelogPipeline::new(
        Arc::clone(source) as Arc<dyn CommitSource>,
        Arc::clone(summarizer) as Arc<dyn SummaryProvider>,
        4,
    )
}

#[tokio::test]
async fn end_to_end_report() {
    let source = Arc::new(MockSource::new(vec![
        ("c1", commit("alice", Some("https://a1.png"), 5, 2, &["a.rs", "b.rs"])),
        ("c2", commit("bob", Some("https://b.png"), 3, 1, &["c.rs"])),
        ("c3", commit("alice", Some("https://a2.png"), 0, 0, &[])),
    ]));
    let summarizer = Arc::new(MockSummarizer::answering("## alice\n- a and b\n## bob\n- c"));

    let report = pipeline(&source, &summarizer)
        .run("https://github.com/octo/hello", 7)
        .await
        .unwrap()
        .expect("report");

    assert_eq!(report.repository, RepoRef::new("octo", "hello"));
    assert_eq!(report.days, 7);
    assert_eq!(report.additions, 8);
    assert_eq!(report.deletions, 3);
    assert_eq!(report.net_diff, 5);
    assert_eq!(report.commit_count, 3);
    assert_eq!(report.file_count, 3);
    assert_eq!(report.changelog, "## alice\n- a and b\n## bob\n- c");

    let prompts = summarizer.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert!(prompt.starts_with("Generate a concise changelog"));
    assert!(prompt.contains(
        "Author: alice. File: a.rs\n+a.rs\n\nAuthor: alice. File: b.rs\n+b.rs\n\nAuthor: bob. File: c.rs\n+c.rs"
    ));
    // Later avatar wins, first-seen position is kept.
    assert!(prompt.ends_with(
        "Here is a map of all the developer profile pictures:\
         \nuser:alice  profile picture:https://a2.png\
         \nuser:bob  profile picture:https://b.png"
    ));
}

#[tokio::test]
async fn url_with_trailing_slash_and_git_suffix() {
    let source = Arc::new(MockSource::new(vec![]));
    let summarizer = Arc::new(MockSummarizer::answering("nothing much"));

    pipeline(&source, &summarizer)
        .run("https://github.com/octo/hello.git/", 1)
        .await
        .unwrap()
        .expect("report");

    assert_eq!(
        source.seen_repo.lock().unwrap().clone(),
        Some(RepoRef::new("octo", "hello"))
    );
}

#[tokio::test]
async fn unparseable_url_returns_none_without_calls() {
    let source = Arc::new(MockSource::new(vec![("c1", commit("a", None, 1, 0, &["x"]))]));
    let summarizer = Arc::new(MockSummarizer::answering("unused"));
    let pipeline = pipeline(&source, &summarizer);

    for url in ["", "hello", "https:///hello"] {
        assert!(pipeline.run(url, 7).await.unwrap().is_none(), "url: {url:?}");
    }

    assert_eq!(source.list_calls.load(Ordering::SeqCst), 0);
    assert!(summarizer.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_window_still_asks_for_a_changelog() {
    let source = Arc::new(MockSource::new(vec![]));
    let summarizer = Arc::new(MockSummarizer::answering("No changes this week."));

    let report = pipeline(&source, &summarizer)
        .run("https://github.com/octo/quiet", 7)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.commit_count, 0);
    assert_eq!(report.net_diff, 0);
    assert_eq!(summarizer.prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn summarizer_failure_propagates() {
    let source = Arc::new(MockSource::new(vec![("c1", commit("a", None, 1, 0, &["x"]))]));
    let summarizer = Arc::new(MockSummarizer::failing(
        "failed to generate changelog: Internal Server Error",
    ));

    let err = pipeline(&source, &summarizer)
        .run("https://github.com/octo/hello", 7)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Changelog(_)));
    assert_eq!(
        err.to_string(),
        "failed to generate changelog: Internal Server Error"
    );
    assert_eq!(summarizer.prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_commit_aborts_before_summarizing() {
    let mut source = MockSource::new(vec![("c1", commit("a", None, 1, 0, &["x"]))]);
    source.order.push("ghost".into());
    let source = Arc::new(source);
    let summarizer = Arc::new(MockSummarizer::answering("unused"));

    let err = pipeline(&source, &summarizer)
        .run("https://github.com/octo/hello", 7)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Collector(_)));
    assert!(err.to_string().contains("ghost"));
    assert!(summarizer.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_window_is_rejected() {
    let source = Arc::new(MockSource::new(vec![]));
    let summarizer = Arc::new(MockSummarizer::answering("unused"));

    let err = pipeline(&source, &summarizer)
        .run("https://github.com/octo/hello", 0)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("invalid lookback window"));
    assert_eq!(source.list_calls.load(Ordering::SeqCst), 0);
}
