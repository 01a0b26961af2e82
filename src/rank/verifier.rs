//! URL verification of version candidates
//!
//! A verification URL is a template with at most one `{...}` placeholder. The
//! placeholder body names a `VersionTransform` applied to the candidate's
//! complete match before substitution. A candidate whose URL does not answer
//! a HEAD request with 200 is ranked as `RankKey::Unranked`.

use crate::domain::{RankKey, SortKey, VersionMatch, VersionTransform};
use crate::error::ConfigError;
use async_trait::async_trait;
use tracing::debug;

/// Something that can tell whether a URL is downloadable
#[async_trait]
pub trait UrlProbe: Send + Sync {
    /// Returns true if a HEAD request to `url` answers with status 200
    async fn is_available(&self, url: &str) -> bool;
}

/// Parsed verification URL template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyUrl {
    head: String,
    tail: String,
    transform: VersionTransform,
    has_placeholder: bool,
}

impl VerifyUrl {
    /// Parse a template such as `https://host/pkg-{x[1:]}.tar.gz`
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut spans = Vec::new();
        let mut search_from = 0;
        while let Some(open) = raw[search_from..].find('{') {
            let open = search_from + open;
            let Some(close) = raw[open..].find('}') else {
                return Err(ConfigError::invalid_verify_url(raw, "unclosed placeholder"));
            };
            let close = open + close;
            spans.push((open, close));
            search_from = close + 1;
        }

        match spans.as_slice() {
            [] => Ok(Self {
                head: raw.to_string(),
                tail: String::new(),
                transform: VersionTransform::Identity,
                has_placeholder: false,
            }),
            [(open, close)] => Ok(Self {
                head: raw[..*open].to_string(),
                tail: raw[close + 1..].to_string(),
                transform: VersionTransform::parse(&raw[open + 1..*close])?,
                has_placeholder: true,
            }),
            _ => Err(ConfigError::invalid_verify_url(
                raw,
                "at most one placeholder is allowed",
            )),
        }
    }

    /// The transform selected by the placeholder
    pub fn transform(&self) -> VersionTransform {
        self.transform
    }

    /// The URL to probe for a version
    pub fn url_for(&self, version: &str) -> String {
        if self.has_placeholder {
            format!("{}{}{}", self.head, self.transform.apply(version), self.tail)
        } else {
            self.head.clone()
        }
    }
}

/// Sort key wrapper that demotes candidates without a downloadable artifact
#[derive(Debug, Clone)]
pub struct UrlVerifier {
    sort_key: SortKey,
    url: VerifyUrl,
}

impl UrlVerifier {
    /// Wrap a sort key with a verification URL
    pub fn new(sort_key: SortKey, url: VerifyUrl) -> Self {
        Self { sort_key, url }
    }

    /// The wrapped key if the candidate's URL verifies, `Unranked` otherwise
    pub async fn rank_key(&self, probe: &dyn UrlProbe, elem: &VersionMatch) -> RankKey {
        let url = self.url.url_for(&elem.complete_match);
        if probe.is_available(&url).await {
            RankKey::Ranked(self.sort_key.key(elem))
        } else {
            debug!(version = %elem.complete_match, %url, "version could not be verified");
            RankKey::Unranked
        }
    }
}
