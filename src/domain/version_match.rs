//! Version patterns and regex matches
//!
//! A `VersionPattern` is searched (not fully matched) against a raw string.
//! The default pattern accepts `major.minor` with an optional `.patch` and an
//! optional `v`/`V` prefix, anchored at the end of the input.

use crate::error::ConfigError;
use regex::Regex;

/// Default pattern: `[vV]?major.minor(.patch)?` at the end of the input
pub const DEFAULT_VERSION_PATTERN: &str = r"[vV]?(\d+)\.(\d+)(?:\.(\d+))?$";

/// One successful match of a version pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMatch {
    /// The full matched text (not necessarily the whole input)
    pub complete_match: String,
    /// Capture groups in declaration order; unmatched optional groups are `None`
    pub groups: Vec<Option<String>>,
}

impl VersionMatch {
    /// Create a new VersionMatch
    pub fn new(complete_match: impl Into<String>, groups: Vec<Option<String>>) -> Self {
        Self {
            complete_match: complete_match.into(),
            groups,
        }
    }
}

/// A compiled version pattern
#[derive(Debug, Clone)]
pub struct VersionPattern {
    regex: Regex,
    pattern: String,
    prefix: String,
}

impl VersionPattern {
    /// Compile a pattern, falling back to the default when none is given
    pub fn new(pattern: Option<&str>) -> Result<Self, ConfigError> {
        Self::with_prefix("", pattern)
    }

    /// Compile a pattern that must be preceded by a literal prefix.
    ///
    /// The prefix is part of the search but removed from `complete_match`.
    pub fn with_prefix(prefix: &str, pattern: Option<&str>) -> Result<Self, ConfigError> {
        let pattern = pattern.unwrap_or(DEFAULT_VERSION_PATTERN);
        let regex = Regex::new(&format!("{}{}", regex::escape(prefix), pattern))
            .map_err(|e| ConfigError::invalid_pattern(pattern, e.to_string()))?;

        Ok(Self {
            regex,
            pattern: pattern.to_string(),
            prefix: prefix.to_string(),
        })
    }

    /// The pattern as given by the caller, without prefix
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Search `input` for the pattern
    pub fn matches(&self, input: &str) -> Option<VersionMatch> {
        let captures = self.regex.captures(input)?;
        let whole = captures.get(0)?.as_str();
        let complete_match = whole.strip_prefix(self.prefix.as_str()).unwrap_or(whole);

        let groups = captures
            .iter()
            .skip(1)
            .map(|group| group.map(|g| g.as_str().to_string()))
            .collect();

        Some(VersionMatch::new(complete_match, groups))
    }
}
