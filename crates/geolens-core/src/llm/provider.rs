//! LLM provider trait and request/response types.
//!
//! Defines the interface that all LLM providers implement, plus the
//! factory that creates the configured provider.

use super::prompt;
use crate::config::{resolve_env_var, Config};
use crate::error::{UpstreamError, UpstreamResult};
use crate::types::LensResult;
use async_trait::async_trait;
use std::time::Duration;

/// A request to answer a prompt about a remote image.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// Publicly reachable URL of the image
    pub image_url: String,
    /// Instructions sent as the system message
    pub system_prompt: String,
    /// Text part of the user message
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl LlmRequest {
    /// Build a geolocation request from Lens hits and contextual text.
    pub fn geolocate(
        image_url: &str,
        context: &[String],
        lens_results: &[LensResult],
        max_tokens: u32,
    ) -> Self {
        Self {
            image_url: image_url.to_string(),
            system_prompt: prompt::GEOLOCATE_SYSTEM_PROMPT.to_string(),
            prompt: prompt::geolocate_prompt(context, lens_results),
            max_tokens,
        }
    }
}

/// The response from an LLM call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated text, trimmed
    pub text: String,
    /// Model identifier used
    pub model: String,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all LLM providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn LlmProvider>` for dynamic dispatch).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging (e.g., "openai").
    fn name(&self) -> &str;

    /// Whether the provider is configured (has credentials).
    async fn is_available(&self) -> bool;

    /// Generate a reply for the given request.
    async fn generate(&self, request: &LlmRequest) -> UpstreamResult<LlmResponse>;

    /// Per-request timeout for this provider.
    fn timeout(&self) -> Duration;
}

/// Factory that creates the configured provider.
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create the provider named by `config.llm.provider`.
    ///
    /// An unresolvable API key still yields a provider; it reports itself
    /// unavailable so requests degrade instead of failing at startup.
    pub fn create(
        config: &Config,
        client: reqwest::Client,
    ) -> UpstreamResult<Box<dyn LlmProvider>> {
        match config.llm.provider.as_str() {
            "openai" => {
                let cfg = config.openai();
                Ok(Box::new(super::openai::OpenAiProvider::new(
                    client,
                    &cfg.endpoint,
                    resolve_env_var(&cfg.api_key),
                    &cfg.model,
                    Duration::from_millis(cfg.timeout_ms),
                )))
            }
            other => Err(UpstreamError::Llm {
                message: format!("Unknown LLM provider: {other}"),
                status_code: None,
            }),
        }
    }
}
