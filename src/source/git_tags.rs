//! Git tag source
//!
//! Lists the tags of a remote repository with `git ls-remote --tags` and
//! ranks those matching the tag pattern. The tag history is ignored; the
//! latest tag is the maximum by sort key.

use crate::domain::{QueryResult, SortKey, VersionMatch, VersionPattern};
use crate::error::{AppError, ConfigError, SourceError};
use crate::rank::{Ranker, UrlProbe, VerifyUrl};
use crate::source::{HttpClient, VersionSource};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

/// Prefix of tag refs in `git ls-remote` output
pub const TAG_REF_PREFIX: &str = "refs/tags/";

/// Trait for listing the tag refs of a remote repository
#[async_trait]
pub trait TagLister: Send + Sync {
    /// Return the raw `git ls-remote --tags` output for a repository
    async fn list_tags(&self, repo_url: &str) -> Result<String, SourceError>;
}

/// Tag lister that runs the system `git` binary
#[derive(Debug, Default)]
pub struct SystemGit;

impl SystemGit {
    /// Create a new system git lister
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TagLister for SystemGit {
    async fn list_tags(&self, repo_url: &str) -> Result<String, SourceError> {
        debug!(repo_url, "running git ls-remote --tags");
        let output = Command::new("git")
            .args(["ls-remote", "--tags", repo_url])
            .output()
            .await
            .map_err(|e| SourceError::tag_listing(repo_url, format!("failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("git exited with {}", output.status),
                trimmed => trimmed.to_string(),
            };
            return Err(SourceError::tag_listing(repo_url, message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Parameters of a git tag query
#[derive(Debug, Clone, Default)]
pub struct GitTagQuery {
    /// URL of the repository to read
    pub repo_url: String,
    /// Pattern of tags to consider; `[vV]?major.minor(.patch)?` by default
    pub tag_pattern: Option<String>,
    /// URL template used to verify candidate tags (e.g. a tarball download)
    pub verify_url: Option<String>,
    /// Key used to find the latest tag
    pub sort_key: SortKey,
    /// Return the latest three tags instead of one
    pub multiple: bool,
}

impl GitTagQuery {
    /// Create a query for a repository with default settings
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            ..Self::default()
        }
    }

    /// Set the tag pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.tag_pattern = Some(pattern.into());
        self
    }

    /// Set the verification URL template
    pub fn with_verify_url(mut self, url: impl Into<String>) -> Self {
        self.verify_url = Some(url.into());
        self
    }

    /// Set the sort key
    pub fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    /// Set multi-version mode
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }
}

/// Finds the latest version among the tags of a git repository
pub struct GitTagSource {
    repo_url: String,
    pattern: VersionPattern,
    ranker: Ranker,
    lister: Box<dyn TagLister>,
    probe: Box<dyn UrlProbe>,
}

impl GitTagSource {
    /// Validate the query and build a source backed by the system git
    pub fn new(query: GitTagQuery, client: HttpClient) -> Result<Self, ConfigError> {
        Self::with_lister(query, SystemGit::new(), client)
    }

    /// Validate the query and build a source with a custom tag lister and probe
    pub fn with_lister(
        query: GitTagQuery,
        lister: impl TagLister + 'static,
        probe: impl UrlProbe + 'static,
    ) -> Result<Self, ConfigError> {
        let pattern = VersionPattern::with_prefix(TAG_REF_PREFIX, query.tag_pattern.as_deref())?;

        let mut ranker = Ranker::new(query.sort_key).with_multiple(query.multiple);
        if let Some(ref url) = query.verify_url {
            ranker = ranker.with_verify_url(VerifyUrl::parse(url)?);
        }

        Ok(Self {
            repo_url: query.repo_url,
            pattern,
            ranker,
            lister: Box::new(lister),
            probe: Box::new(probe),
        })
    }
}

/// Match every line of `git ls-remote` output against the tag pattern
pub fn extract_tag_matches(listing: &str, pattern: &VersionPattern) -> Vec<VersionMatch> {
    listing
        .lines()
        .filter_map(|line| pattern.matches(line))
        .collect()
}

#[async_trait]
impl VersionSource for GitTagSource {
    fn source_name(&self) -> &'static str {
        "git tags"
    }

    async fn latest_versions(&self) -> Result<QueryResult, AppError> {
        let listing = self.lister.list_tags(&self.repo_url).await?;
        let candidates = extract_tag_matches(&listing, &self.pattern);

        info!(
            repo_url = %self.repo_url,
            pattern = self.pattern.as_str(),
            matched = candidates.len(),
            "filtered remote tags"
        );

        Ok(self.ranker.select(candidates, self.probe.as_ref()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const LS_REMOTE: &str = "\
1111111111111111111111111111111111111111\trefs/tags/v1.0.0
2222222222222222222222222222222222222222\trefs/tags/v1.0.0^{}
3333333333333333333333333333333333333333\trefs/tags/v1.2.0
4444444444444444444444444444444444444444\trefs/tags/v1.10.0
5555555555555555555555555555555555555555\trefs/tags/nightly
6666666666666666666666666666666666666666\trefs/tags/v1.10.0-rc1
";

    struct StubLister {
        output: Result<String, String>,
    }

    impl StubLister {
        fn ok(output: &str) -> Self {
            Self {
                output: Ok(output.to_string()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                output: Err(message.to_string()),
            }
        }
    }

    #[async_trait]
    impl TagLister for StubLister {
        async fn list_tags(&self, repo_url: &str) -> Result<String, SourceError> {
            self.output
                .clone()
                .map_err(|message| SourceError::tag_listing(repo_url, message))
        }
    }

    struct StubProbe(HashSet<String>);

    #[async_trait]
    impl UrlProbe for StubProbe {
        async fn is_available(&self, url: &str) -> bool {
            self.0.contains(url)
        }
    }

    fn no_probe() -> StubProbe {
        StubProbe(HashSet::new())
    }

    fn source(query: GitTagQuery, listing: &str) -> GitTagSource {
        GitTagSource::with_lister(query, StubLister::ok(listing), no_probe()).unwrap()
    }

    #[test]
    fn test_extract_tag_matches() {
        let pattern = VersionPattern::with_prefix(TAG_REF_PREFIX, None).unwrap();
        let matches = extract_tag_matches(LS_REMOTE, &pattern);
        let names: Vec<_> = matches.iter().map(|m| m.complete_match.as_str()).collect();
        assert_eq!(names, vec!["v1.0.0", "v1.2.0", "v1.10.0"]);
    }

    #[tokio::test]
    async fn test_latest_single() {
        let result = source(GitTagQuery::new("repo"), LS_REMOTE)
            .latest_versions()
            .await
            .unwrap();
        assert_eq!(result, QueryResult::Found("v1.10.0".into()));
    }

    #[tokio::test]
    async fn test_latest_multiple() {
        let result = source(GitTagQuery::new("repo").with_multiple(true), LS_REMOTE)
            .latest_versions()
            .await
            .unwrap();
        assert_eq!(
            result,
            QueryResult::FoundMany(vec!["v1.10.0".into(), "v1.2.0".into(), "v1.0.0".into()])
        );
    }

    #[tokio::test]
    async fn test_custom_pattern() {
        let listing = "\
aaaa\trefs/tags/release-2_1
bbbb\trefs/tags/release-2_10
cccc\trefs/tags/v9.9.9
";
        let query = GitTagQuery::new("repo").with_pattern(r"release-(\d+)_(\d+)$");
        let result = source(query, listing).latest_versions().await.unwrap();
        assert_eq!(result, QueryResult::Found("release-2_10".into()));
    }

    #[tokio::test]
    async fn test_no_matching_tags() {
        let listing = "aaaa\trefs/tags/nightly\n";
        let result = source(GitTagQuery::new("repo"), listing)
            .latest_versions()
            .await
            .unwrap();
        assert_eq!(result, QueryResult::NotFound);
    }

    #[tokio::test]
    async fn test_empty_repository() {
        let result = source(GitTagQuery::new("repo"), "")
            .latest_versions()
            .await
            .unwrap();
        assert_eq!(result, QueryResult::NotFound);
    }

    #[tokio::test]
    async fn test_verify_url_skips_missing_tarball() {
        let probe = StubProbe(
            ["https://example.com/pkg-1.2.0.tar.gz".to_string()]
                .into_iter()
                .collect(),
        );
        let query = GitTagQuery::new("repo")
            .with_verify_url("https://example.com/pkg-{x[1:]}.tar.gz");
        let source =
            GitTagSource::with_lister(query, StubLister::ok(LS_REMOTE), probe).unwrap();

        let result = source.latest_versions().await.unwrap();
        assert_eq!(result, QueryResult::Found("v1.2.0".into()));
    }

    #[tokio::test]
    async fn test_listing_failure_is_fatal() {
        let source = GitTagSource::with_lister(
            GitTagQuery::new("https://example.invalid/repo.git"),
            StubLister::failing("could not resolve host"),
            no_probe(),
        )
        .unwrap();

        let err = source.latest_versions().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Source(SourceError::TagListing { .. })
        ));
        assert!(err.to_string().contains("could not resolve host"));
    }

    #[test]
    fn test_invalid_pattern_rejected_up_front() {
        let query = GitTagQuery::new("repo").with_pattern("(");
        let result = GitTagSource::with_lister(query, StubLister::ok(""), no_probe());
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_invalid_verify_url_rejected_up_front() {
        let query = GitTagQuery::new("repo").with_verify_url("https://x/{}/{}");
        let result = GitTagSource::with_lister(query, StubLister::ok(""), no_probe());
        assert!(matches!(result, Err(ConfigError::InvalidVerifyUrl { .. })));
    }

    #[tokio::test]
    async fn test_system_git_missing_repository() {
        let dir = std::env::temp_dir().join("lastver-no-such-repository");
        let result = SystemGit::new().list_tags(dir.to_str().unwrap()).await;
        assert!(matches!(result, Err(SourceError::TagListing { .. })));
    }

    #[test]
    fn test_source_name() {
        assert_eq!(source(GitTagQuery::new("repo"), "").source_name(), "git tags");
    }
}
