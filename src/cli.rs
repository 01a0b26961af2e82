//! CLI argument parsing module for lastver
//!
//! Each action takes a single comma separated string whose segments map
//! positionally to the source parameters. An empty segment leaves that
//! parameter at its default.

use crate::domain::SortKey;
use crate::error::ConfigError;
use crate::source::{GitTagQuery, Query, WebsiteQuery};
use clap::Parser;

/// Allowed value count for `--last-git-tag` (REPO_URL[,TAG_PATTERN[,VERIFY_URL]])
pub const GIT_TAG_ARITY: (usize, usize) = (1, 3);

/// Allowed value count for `--last-website-version` (URL,SELECTOR[,ATTRIBUTE[,PATTERN]])
pub const WEBSITE_ARITY: (usize, usize) = (2, 4);

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    s.parse::<SortKey>().map_err(|e| e.to_string())
}

/// Find the latest released version of a project
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lastver",
    version,
    about = "Find the latest released version of a project",
    long_about = "lastver is a command line utility for update scripts.\n\
                  It finds the latest version of a project from the tags of a git\n\
                  repository or from the download links on a website."
)]
pub struct CliArgs {
    /// Find the latest tagged version in a git repository: REPO_URL[,TAG_PATTERN[,VERIFY_URL]]
    #[arg(long, value_name = "VALUES", conflicts_with = "last_website_version")]
    pub last_git_tag: Option<String>,

    /// Find the latest version on a website: URL,SELECTOR[,ATTRIBUTE[,PATTERN]]
    #[arg(long, value_name = "VALUES")]
    pub last_website_version: Option<String>,

    /// Print the last three versions (separated by newline) instead of only the latest
    #[arg(long)]
    pub multi_version: bool,

    /// Sort key used to rank versions: numeric, lexical or match
    #[arg(long, default_value = "numeric", value_parser = parse_sort_key)]
    pub sort_key: SortKey,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Split a comma separated action value; empty segments become `None`
pub fn split_values(value: &str) -> Vec<Option<String>> {
    value
        .split(',')
        .map(|v| (!v.is_empty()).then(|| v.to_string()))
        .collect()
}

/// Split and check the value count against an action's arity
fn action_values(
    action: &str,
    value: &str,
    (min, max): (usize, usize),
) -> Result<Vec<Option<String>>, ConfigError> {
    let values = split_values(value);
    if (min..=max).contains(&values.len()) {
        Ok(values)
    } else {
        Err(ConfigError::invalid_argument_count(
            action,
            values.len(),
            min,
            max,
        ))
    }
}

impl CliArgs {
    /// Build the query selected by the action flags.
    ///
    /// Returns `Ok(None)` when no action flag is given.
    pub fn query(&self) -> Result<Option<Query>, ConfigError> {
        if let Some(ref value) = self.last_git_tag {
            let action = "last_git_tag";
            let mut values = action_values(action, value, GIT_TAG_ARITY)?.into_iter();

            let repo_url = values
                .next()
                .flatten()
                .ok_or_else(|| ConfigError::missing_argument(action, "repository url"))?;

            let mut query = GitTagQuery::new(repo_url)
                .with_sort_key(self.sort_key.clone())
                .with_multiple(self.multi_version);
            query.tag_pattern = values.next().flatten();
            query.verify_url = values.next().flatten();

            return Ok(Some(Query::GitTag(query)));
        }

        if let Some(ref value) = self.last_website_version {
            let action = "last_website_version";
            let mut values = action_values(action, value, WEBSITE_ARITY)?.into_iter();

            let website_url = values
                .next()
                .flatten()
                .ok_or_else(|| ConfigError::missing_argument(action, "website url"))?;
            let selector = values
                .next()
                .flatten()
                .ok_or_else(|| ConfigError::missing_argument(action, "selector"))?;

            let mut query = WebsiteQuery::new(website_url, selector)
                .with_sort_key(self.sort_key.clone())
                .with_multiple(self.multi_version);
            query.attribute = values.next().flatten();
            query.version_pattern = values.next().flatten();

            return Ok(Some(Query::Website(query)));
        }

        Ok(None)
    }
}
