//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: Invalid query parameters, reported before any network call
//! - SourceError: Failures talking to a git remote or a website
//!
//! "No version found" is not an error; it is `QueryResult::NotFound`.

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Version source related errors
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Errors related to query configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Wrong number of comma separated values for an action
    #[error("{count} argument values are invalid for \"{action}\" (expected {min} to {max})")]
    InvalidArgumentCount {
        action: String,
        count: usize,
        min: usize,
        max: usize,
    },

    /// A required value was left empty
    #[error("missing {name} for \"{action}\"")]
    MissingArgument { action: String, name: String },

    /// Version pattern does not compile
    #[error("invalid version pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// CSS selector does not parse
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Verification URL template is malformed
    #[error("invalid verification url '{url}': {message}")]
    InvalidVerifyUrl { url: String, message: String },

    /// Placeholder names a transform that does not exist
    #[error("unknown version transform '{name}'")]
    UnknownTransform { name: String },

    /// Sort key name is not known
    #[error("unknown sort key '{name}': expected 'numeric', 'lexical' or 'match'")]
    UnknownSortKey { name: String },
}

/// Errors related to version sources
#[derive(Error, Debug)]
pub enum SourceError {
    /// `git ls-remote` failed
    #[error("failed to list tags of {repo}: {message}")]
    TagListing { repo: String, message: String },

    /// Page download failed on every attempt
    #[error("{url} could not be downloaded after {attempts} attempts: {message}")]
    DownloadFailed {
        url: String,
        attempts: u32,
        message: String,
    },

    /// HTTP client could not be created
    #[error("failed to create HTTP client: {message}")]
    HttpClient { message: String },
}

impl ConfigError {
    /// Creates a new InvalidArgumentCount error
    pub fn invalid_argument_count(
        action: impl Into<String>,
        count: usize,
        min: usize,
        max: usize,
    ) -> Self {
        ConfigError::InvalidArgumentCount {
            action: action.into(),
            count,
            min,
            max,
        }
    }

    /// Creates a new MissingArgument error
    pub fn missing_argument(action: impl Into<String>, name: impl Into<String>) -> Self {
        ConfigError::MissingArgument {
            action: action.into(),
            name: name.into(),
        }
    }

    /// Creates a new InvalidPattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidSelector error
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidVerifyUrl error
    pub fn invalid_verify_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidVerifyUrl {
            url: url.into(),
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Creates a new TagListing error
    pub fn tag_listing(repo: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::TagListing {
            repo: repo.into(),
            message: message.into(),
        }
    }

    /// Creates a new DownloadFailed error
    pub fn download_failed(url: impl Into<String>, attempts: u32, message: impl Into<String>) -> Self {
        SourceError::DownloadFailed {
            url: url.into(),
            attempts,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_count() {
        let err = ConfigError::invalid_argument_count("last_git_tag", 4, 1, 3);
        let msg = format!("{}", err);
        assert!(msg.contains("4 argument values are invalid"));
        assert!(msg.contains("last_git_tag"));
        assert!(msg.contains("1 to 3"));
    }

    #[test]
    fn test_missing_argument() {
        let err = ConfigError::missing_argument("last_website_version", "selector");
        assert_eq!(
            format!("{}", err),
            "missing selector for \"last_website_version\""
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let err = ConfigError::invalid_pattern("(\\d+", "unclosed group");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid version pattern"));
        assert!(msg.contains("unclosed group"));
    }

    #[test]
    fn test_invalid_selector() {
        let err = ConfigError::invalid_selector("a[", "unexpected end");
        assert!(format!("{}", err).contains("invalid selector 'a['"));
    }

    #[test]
    fn test_unknown_sort_key() {
        let err = ConfigError::UnknownSortKey {
            name: "random".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("unknown sort key 'random'"));
    }

    #[test]
    fn test_tag_listing() {
        let err = SourceError::tag_listing("https://example.com/repo.git", "exit status 128");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to list tags"));
        assert!(msg.contains("exit status 128"));
    }

    #[test]
    fn test_download_failed() {
        let err = SourceError::download_failed("https://example.com", 3, "HTTP 503");
        let msg = format!("{}", err);
        assert!(msg.contains("could not be downloaded after 3 attempts"));
        assert!(msg.contains("HTTP 503"));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::UnknownTransform {
            name: "x.upper()".to_string(),
        }
        .into();
        assert!(format!("{}", app_err).contains("unknown version transform"));
    }

    #[test]
    fn test_app_error_from_source_error() {
        let app_err: AppError = SourceError::tag_listing("repo", "boom").into();
        assert!(matches!(app_err, AppError::Source(_)));
    }
}
