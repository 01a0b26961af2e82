//! lastver - find the latest released version of a project
//!
//! This library provides the version extraction and ranking engine used by
//! update scripts:
//! - Git tags of a remote repository
//! - Versions listed on a download page
//! - Optional verification of candidates against a download URL

pub mod cli;
pub mod domain;
pub mod error;
pub mod logging;
pub mod output;
pub mod rank;
pub mod source;
