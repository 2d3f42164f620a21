//! Reverse image search ("Lens lookup").
//!
//! A [`LensProvider`] performs one search attempt. [`LensLookup`] wraps it
//! with the request policy: credentials check, a fixed number of uniform
//! attempts with no backoff, a per-attempt deadline, and truncation to the
//! configured number of results. Lookup never fails; every failure mode
//! degrades to an empty result list.

pub(crate) mod scrapingdog;

pub use scrapingdog::ScrapingDogProvider;

use crate::config::{resolve_env_var, LensConfig};
use crate::error::{UpstreamError, UpstreamResult};
use crate::types::LensResult;
use async_trait::async_trait;
use std::time::Duration;

/// A reverse-image-search backend.
#[async_trait]
pub trait LensProvider: Send + Sync {
    /// Provider name for logging (e.g., "scrapingdog").
    fn name(&self) -> &str;

    /// Whether the provider has the credentials it needs.
    async fn is_available(&self) -> bool;

    /// Run a single search for the image at `image_url`.
    async fn search(&self, image_url: &str) -> UpstreamResult<Vec<LensResult>>;
}

/// Retry and truncation policy for a lookup.
#[derive(Debug, Clone)]
pub struct LensOptions {
    /// Maximum number of results returned
    pub max_results: usize,
    /// Total attempts before giving up
    pub retry_attempts: u32,
    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for LensOptions {
    fn default() -> Self {
        Self {
            max_results: 5,
            retry_attempts: 3,
            timeout_ms: 20_000,
        }
    }
}

impl From<&LensConfig> for LensOptions {
    fn from(config: &LensConfig) -> Self {
        Self {
            max_results: config.max_results,
            retry_attempts: config.retry_attempts,
            timeout_ms: config.timeout_ms,
        }
    }
}

/// Lens lookup with the service's retry policy applied.
pub struct LensLookup {
    provider: Box<dyn LensProvider>,
    options: LensOptions,
}

impl LensLookup {
    pub fn new(provider: Box<dyn LensProvider>, options: LensOptions) -> Self {
        Self { provider, options }
    }

    /// Build the ScrapingDog-backed lookup from config.
    ///
    /// A missing API key is not an error here: lookups will log it and
    /// return no results.
    pub fn from_config(config: &LensConfig, client: reqwest::Client) -> Self {
        let provider = ScrapingDogProvider::new(
            client,
            &config.endpoint,
            resolve_env_var(&config.api_key),
            Duration::from_millis(config.timeout_ms),
        );
        Self::new(Box::new(provider), LensOptions::from(config))
    }

    /// Fetch up to `max_results` hits for the image.
    ///
    /// Transport errors, timeouts, non-2xx statuses, and undecodable bodies
    /// are all retried the same way. Returns an empty list when credentials
    /// are missing or every attempt failed.
    pub async fn lookup(&self, image_url: &str) -> Vec<LensResult> {
        if !self.provider.is_available().await {
            tracing::error!("Missing {} API key, skipping Lens lookup", self.provider.name());
            return Vec::new();
        }

        let attempts = self.options.retry_attempts;
        for attempt in 1..=attempts {
            match self.attempt(image_url).await {
                Ok(mut results) => {
                    results.truncate(self.options.max_results);
                    log_results(&results);
                    return results;
                }
                Err(e) => {
                    tracing::warn!(
                        status = ?e.status_code(),
                        "Lens attempt {attempt}/{attempts} failed: {e}"
                    );
                }
            }
        }

        tracing::error!("Lens lookup failed after {attempts} attempts");
        Vec::new()
    }

    async fn attempt(&self, image_url: &str) -> UpstreamResult<Vec<LensResult>> {
        let timeout_ms = self.options.timeout_ms;
        match tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            self.provider.search(image_url),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout {
                service: self.provider.name().to_string(),
                timeout_ms,
            }),
        }
    }
}

fn log_results(results: &[LensResult]) {
    tracing::info!("Google Lens returned {} results", results.len());
    for (i, result) in results.iter().enumerate() {
        let title = if result.title.is_empty() {
            "No Title"
        } else {
            result.title.as_str()
        };
        let link = if result.link.is_empty() {
            "No Link"
        } else {
            result.link.as_str()
        };
        tracing::debug!("  [{}] Title: {title}, Link: {link}", i + 1);
    }
}
