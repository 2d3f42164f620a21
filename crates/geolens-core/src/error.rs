//! Error types for Geolens.
//!
//! Upstream errors never reach the HTTP caller directly: the lookup and
//! analysis stages log them and degrade. They exist so that providers can
//! report what went wrong in a structured way.

use thiserror::Error;

/// Top-level error type for Geolens operations.
#[derive(Error, Debug)]
pub enum GeolensError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Upstream API errors
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while talking to the reverse-image-search or LLM APIs.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Reverse image search call failed
    #[error("Lens lookup failed: {message}")]
    Lens {
        message: String,
        status_code: Option<u16>,
    },

    /// LLM call failed
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        status_code: Option<u16>,
    },

    /// Call did not finish within its deadline
    #[error("Timeout calling {service} after {timeout_ms}ms")]
    Timeout { service: String, timeout_ms: u64 },

    /// No API key configured for the service
    #[error("Missing API key for {0}")]
    MissingApiKey(String),
}

impl UpstreamError {
    /// HTTP status reported by the upstream, if the failure carried one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Lens { status_code, .. } | Self::Llm { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

/// Convenience type alias for Geolens results.
pub type Result<T> = std::result::Result<T, GeolensError>;

/// Convenience type alias for upstream call results.
pub type UpstreamResult<T> = std::result::Result<T, UpstreamError>;
