//! Ranking of version candidates
//!
//! This module provides:
//! - The top-1 / top-3 selection policy shared by all sources
//! - URL verification of candidates (see `verifier`)

mod verifier;

pub use verifier::{UrlProbe, UrlVerifier, VerifyUrl};

use crate::domain::{QueryResult, RankKey, SortKey, VersionMatch};
use tracing::debug;

/// Number of versions returned in multi-version mode
pub const MULTIPLE_VERSIONS_LIMIT: usize = 3;

/// Selects the latest version(s) from a list of matches
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    sort_key: SortKey,
    verifier: Option<UrlVerifier>,
    multiple: bool,
}

impl Ranker {
    /// Create a ranker for the given sort key
    pub fn new(sort_key: SortKey) -> Self {
        Self {
            sort_key,
            verifier: None,
            multiple: false,
        }
    }

    /// Only keep candidates whose verification URL answers with 200
    pub fn with_verify_url(mut self, url: VerifyUrl) -> Self {
        self.verifier = Some(UrlVerifier::new(self.sort_key.clone(), url));
        self
    }

    /// Return up to three versions instead of one
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Number of versions this ranker returns at most
    pub fn limit(&self) -> usize {
        if self.multiple {
            MULTIPLE_VERSIONS_LIMIT
        } else {
            1
        }
    }

    /// Rank the candidates and select the newest ones.
    ///
    /// Candidates are ordered descending by key; ties keep input order, so the
    /// first of several equal candidates wins. With a verifier, candidates are
    /// probed from the top down until enough of them verify; unverified ones are
    /// never returned.
    pub async fn select(&self, candidates: Vec<VersionMatch>, probe: &dyn UrlProbe) -> QueryResult {
        let mut keyed: Vec<(RankKey, VersionMatch)> = candidates
            .into_iter()
            .map(|c| (RankKey::Ranked(self.sort_key.key(&c)), c))
            .collect();
        keyed.sort_by(|a, b| b.0.cmp(&a.0));

        let limit = self.limit();
        let mut selected = Vec::with_capacity(limit);

        for (_, candidate) in keyed {
            if selected.len() == limit {
                break;
            }

            if let Some(ref verifier) = self.verifier {
                if verifier.rank_key(probe, &candidate).await == RankKey::Unranked {
                    continue;
                }
            }

            debug!(version = %candidate.complete_match, "selected version");
            selected.push(candidate.complete_match);
        }

        QueryResult::from_ranked(selected, self.multiple)
    }
}
