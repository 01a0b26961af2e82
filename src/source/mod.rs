//! Version sources
//!
//! This module provides:
//! - HTTP client shared foundation with download retry
//! - Git tag source (`git ls-remote --tags`)
//! - Website source (CSS selector scraping)

mod client;
mod git_tags;
mod website;

pub use client::{HttpClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use git_tags::{
    extract_tag_matches, GitTagQuery, GitTagSource, SystemGit, TagLister, TAG_REF_PREFIX,
};
pub use website::{
    extract_candidates, match_candidates, remove_path_components, WebsiteQuery, WebsiteSource,
    KNOWN_FILE_EXTENSIONS,
};

use crate::domain::QueryResult;
use crate::error::{AppError, ConfigError};
use async_trait::async_trait;

/// Trait for version sources
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Get the source name
    fn source_name(&self) -> &'static str;

    /// Find the latest version(s)
    async fn latest_versions(&self) -> Result<QueryResult, AppError>;
}

/// A fully parameterized query against one source
#[derive(Debug, Clone)]
pub enum Query {
    GitTag(GitTagQuery),
    Website(WebsiteQuery),
}

/// Validate a query and create the matching source
pub fn create_source(query: Query, client: HttpClient) -> Result<Box<dyn VersionSource>, ConfigError> {
    match query {
        Query::GitTag(query) => Ok(Box::new(GitTagSource::new(query, client)?)),
        Query::Website(query) => Ok(Box::new(WebsiteSource::new(query, client)?)),
    }
}
