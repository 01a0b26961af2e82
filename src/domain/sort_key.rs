//! Sort keys for ranking version matches
//!
//! A sort key turns a `VersionMatch` into a tuple of `KeyPart`s. Tuples compare
//! lexicographically, so `(2, 10, 0)` ranks above `(2, 9, 0)`.

use crate::domain::VersionMatch;
use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// One position of a sort tuple.
///
/// Numbers order below text at the same position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyPart {
    Number(u64),
    Text(String),
}

impl KeyPart {
    /// Coerce a group to a number when it is all ASCII digits
    pub fn from_group(group: &str) -> Self {
        if !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = group.parse() {
                return KeyPart::Number(n);
            }
        }
        KeyPart::Text(group.to_string())
    }
}

/// The value a candidate is ranked by.
///
/// `Unranked` orders below every `Ranked` key; it marks candidates that failed
/// URL verification.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum RankKey {
    Unranked,
    Ranked(Vec<KeyPart>),
}

/// Caller supplied key function
pub type KeyFn = Arc<dyn Fn(&VersionMatch) -> Vec<KeyPart> + Send + Sync>;

/// Sort key selection
#[derive(Clone, Default)]
pub enum SortKey {
    /// Present groups, numeric where all digits (default)
    #[default]
    Numeric,
    /// Present groups compared as plain strings
    Lexical,
    /// The complete match compared as a single string
    CompleteMatch,
    /// Library callers' own key function
    Custom(KeyFn),
}

impl SortKey {
    /// Wrap a key function
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&VersionMatch) -> Vec<KeyPart> + Send + Sync + 'static,
    {
        SortKey::Custom(Arc::new(f))
    }

    /// Name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Numeric => "numeric",
            SortKey::Lexical => "lexical",
            SortKey::CompleteMatch => "match",
            SortKey::Custom(_) => "custom",
        }
    }

    /// Build the comparison tuple for a match
    pub fn key(&self, elem: &VersionMatch) -> Vec<KeyPart> {
        match self {
            SortKey::Numeric => numeric_key(elem),
            SortKey::Lexical => elem
                .groups
                .iter()
                .flatten()
                .map(|g| KeyPart::Text(g.clone()))
                .collect(),
            SortKey::CompleteMatch => vec![KeyPart::Text(elem.complete_match.clone())],
            SortKey::Custom(f) => f(elem),
        }
    }
}

impl fmt::Debug for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SortKey({})", self.name())
    }
}

impl FromStr for SortKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "numeric" => Ok(SortKey::Numeric),
            "lexical" => Ok(SortKey::Lexical),
            "match" => Ok(SortKey::CompleteMatch),
            other => Err(ConfigError::UnknownSortKey {
                name: other.to_string(),
            }),
        }
    }
}

/// Default key: skip absent groups, digits become numbers, the rest stay text.
///
/// A pattern without groups yields an empty tuple, so every candidate ties.
pub fn numeric_key(elem: &VersionMatch) -> Vec<KeyPart> {
    elem.groups
        .iter()
        .flatten()
        .map(|g| KeyPart::from_group(g))
        .collect()
}
