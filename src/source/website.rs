//! Website version source
//!
//! Downloads a page, selects elements with a CSS selector and takes either an
//! attribute or the inner text of each element as a version candidate.
//! Candidates may be paths or URLs (download links), so only the final path
//! component is kept and a known archive extension is removed before the
//! version pattern is applied.

use crate::domain::{QueryResult, SortKey, VersionMatch, VersionPattern};
use crate::error::{AppError, ConfigError};
use crate::rank::{Ranker, VerifyUrl};
use crate::source::{HttpClient, VersionSource};
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, info};

/// Archive extensions removed from candidates, longest first
pub const KNOWN_FILE_EXTENSIONS: [&str; 7] =
    ["tar.gz", "tar.bz2", "tar.xz", "gzip", "tar", "tgz", "zip"];

/// Parameters of a website query
#[derive(Debug, Clone, Default)]
pub struct WebsiteQuery {
    /// URL of the page to scrape
    pub website_url: String,
    /// CSS selector for the elements holding versions
    pub selector: String,
    /// Attribute to read; the element's inner text is used when absent
    pub attribute: Option<String>,
    /// Pattern of valid versions; `[vV]?major.minor(.patch)?` by default
    pub version_pattern: Option<String>,
    /// URL template used to verify candidate versions
    pub verify_url: Option<String>,
    /// Key used to find the latest version
    pub sort_key: SortKey,
    /// Return the latest three versions instead of one
    pub multiple: bool,
}

impl WebsiteQuery {
    /// Create a query for a page and selector with default settings
    pub fn new(website_url: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            website_url: website_url.into(),
            selector: selector.into(),
            ..Self::default()
        }
    }

    /// Read versions from an attribute instead of the inner text
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Set the version pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.version_pattern = Some(pattern.into());
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

/// Finds the latest version listed on a web page
pub struct WebsiteSource {
    website_url: String,
    selector: Selector,
    attribute: Option<String>,
    pattern: VersionPattern,
    ranker: Ranker,
    client: HttpClient,
}

impl WebsiteSource {
    /// Validate the query and build the source
    pub fn new(query: WebsiteQuery, client: HttpClient) -> Result<Self, ConfigError> {
        let selector = Selector::parse(&query.selector)
            .map_err(|e| ConfigError::invalid_selector(&query.selector, e.to_string()))?;
        let pattern = VersionPattern::new(query.version_pattern.as_deref())?;

        let mut ranker = Ranker::new(query.sort_key).with_multiple(query.multiple);
        if let Some(ref url) = query.verify_url {
            ranker = ranker.with_verify_url(VerifyUrl::parse(url)?);
        }

        Ok(Self {
            website_url: query.website_url,
            selector,
            attribute: query.attribute,
            pattern,
            ranker,
            client,
        })
    }
}

/// Keep the final path component and drop one known archive extension.
///
/// `https://host/dl/project-2.3.1.tar.gz` becomes `project-2.3.1`.
pub fn remove_path_components(candidate: &str) -> &str {
    let trimmed = candidate.trim_end_matches('/');
    let basename = trimmed.rsplit('/').next().unwrap_or(trimmed);

    KNOWN_FILE_EXTENSIONS
        .iter()
        .find_map(|ext| {
            basename
                .strip_suffix(ext)
                .and_then(|stem| stem.strip_suffix('.'))
        })
        .unwrap_or(basename)
}

/// Collect one raw candidate per selected element
pub fn extract_candidates(html: &str, selector: &Selector, attribute: Option<&str>) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(selector)
        .filter_map(|element| match attribute {
            Some(name) => {
                let value = element.value().attr(name);
                if value.is_none() {
                    debug!(attribute = name, "selected element has no such attribute");
                }
                value.map(|v| v.trim().to_string())
            }
            None => Some(element.text().collect::<String>().trim().to_string()),
        })
        .collect()
}

/// Normalize each candidate and match it against the version pattern
pub fn match_candidates(candidates: &[String], pattern: &VersionPattern) -> Vec<VersionMatch> {
    candidates
        .iter()
        .filter_map(|c| pattern.matches(remove_path_components(c)))
        .collect()
}

#[async_trait]
impl VersionSource for WebsiteSource {
    fn source_name(&self) -> &'static str {
        "website"
    }

    async fn latest_versions(&self) -> Result<QueryResult, AppError> {
        let page = self.client.get_page(&self.website_url).await?;

        let raw = extract_candidates(&page, &self.selector, self.attribute.as_deref());
        let candidates = match_candidates(&raw, &self.pattern);

        info!(
            website_url = %self.website_url,
            elements = raw.len(),
            matched = candidates.len(),
            "filtered website versions"
        );

        Ok(self.ranker.select(candidates, &self.client).await)
    }
}
