//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Page download with a fixed number of attempts and a fixed delay between them
//! - HEAD probing for URL verification (redirects are not followed)

use crate::error::SourceError;
use crate::rank::UrlProbe;
use async_trait::async_trait;
use reqwest::{redirect, Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = concat!("lastver/", env!("CARGO_PKG_VERSION"));

/// Maximum number of page download attempts
const MAX_DOWNLOAD_ATTEMPTS: u32 = 3;

/// Delay between failed page download attempts
const RETRY_DELAY: Duration = Duration::from_secs(10);

/// HTTP client wrapper with download retry
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    probe_client: Client,
    max_attempts: u32,
    retry_delay: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, SourceError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, SourceError> {
        let build = |policy: redirect::Policy| {
            Client::builder()
                .timeout(timeout)
                .user_agent(user_agent)
                .redirect(policy)
                .build()
                .map_err(|e| SourceError::HttpClient {
                    message: e.to_string(),
                })
        };

        Ok(Self {
            client: build(redirect::Policy::default())?,
            probe_client: build(redirect::Policy::none())?,
            max_attempts: MAX_DOWNLOAD_ATTEMPTS,
            retry_delay: RETRY_DELAY,
        })
    }

    /// Set the maximum number of download attempts
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the delay between failed download attempts
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Download a page body.
    ///
    /// Any status other than 200 counts as a failed attempt, as does a
    /// transport error. Fails once every attempt has failed.
    pub async fn get_page(&self, url: &str) -> Result<String, SourceError> {
        let mut last_error = String::from("no download attempt made");

        for attempt in 1..=self.max_attempts {
            match self.client.get(url).send().await {
                Ok(response) if response.status() == StatusCode::OK => {
                    match response.text().await {
                        Ok(text) => {
                            debug!(url, attempt, bytes = text.len(), "page downloaded");
                            return Ok(text);
                        }
                        Err(e) => last_error = format!("failed to read response body: {}", e),
                    }
                }
                Ok(response) => last_error = format!("HTTP {}", response.status()),
                Err(e) => last_error = e.to_string(),
            }

            warn!(
                url,
                attempt,
                max_attempts = self.max_attempts,
                error = %last_error,
                "page download failed"
            );

            if attempt < self.max_attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        Err(SourceError::download_failed(url, self.max_attempts, last_error))
    }

    /// Issue a HEAD request and return the response status.
    ///
    /// A redirect is returned as is; only the requested URL itself is checked.
    pub async fn head_status(&self, url: &str) -> Result<StatusCode, reqwest::Error> {
        let response = self.probe_client.head(url).send().await?;
        Ok(response.status())
    }
}

#[async_trait]
impl UrlProbe for HttpClient {
    async fn is_available(&self, url: &str) -> bool {
        match self.head_status(url).await {
            Ok(status) => {
                debug!(url, %status, "verification probe");
                status == StatusCode::OK
            }
            Err(e) => {
                warn!(url, error = %e, "verification probe failed");
                false
            }
        }
    }
}
