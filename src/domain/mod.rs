//! Core domain models for lastver
//!
//! This module contains the fundamental types used throughout the application:
//! - Version patterns and the matches they produce
//! - Sort keys that turn matches into comparable tuples
//! - Named transforms applied to versions before URL substitution
//! - The result of a version query

mod query_result;
mod sort_key;
mod transform;
mod version_match;

pub use query_result::QueryResult;
pub use sort_key::{numeric_key, KeyFn, KeyPart, RankKey, SortKey};
pub use transform::VersionTransform;
pub use version_match::{VersionMatch, VersionPattern, DEFAULT_VERSION_PATTERN};
