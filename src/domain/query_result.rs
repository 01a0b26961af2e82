//! Result of a version query

/// Outcome of asking a source for its latest version(s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    /// Single-version mode found a version
    Found(String),
    /// Multi-version mode found up to three versions, newest first
    FoundMany(Vec<String>),
    /// No candidate matched (or none verified)
    NotFound,
}

impl QueryResult {
    /// Build a result from ranked versions, newest first
    pub fn from_ranked(mut versions: Vec<String>, multiple: bool) -> Self {
        if versions.is_empty() {
            QueryResult::NotFound
        } else if multiple {
            QueryResult::FoundMany(versions)
        } else {
            QueryResult::Found(versions.swap_remove(0))
        }
    }

    /// Returns true unless this is `NotFound`
    pub fn is_found(&self) -> bool {
        !matches!(self, QueryResult::NotFound)
    }

    /// The versions in output order
    pub fn versions(&self) -> Vec<&str> {
        match self {
            QueryResult::Found(version) => vec![version.as_str()],
            QueryResult::FoundMany(versions) => versions.iter().map(String::as_str).collect(),
            QueryResult::NotFound => Vec::new(),
        }
    }
}
