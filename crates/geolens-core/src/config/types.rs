//! Sub-configuration structs with defaults matching the deployed service.

use serde::{Deserialize, Serialize};

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// The single browser origin allowed to call the API (with credentials)
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}

/// Reverse image search (Google Lens via ScrapingDog) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// Lens API endpoint
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Maximum number of results kept per lookup
    pub max_results: usize,

    /// Total attempts per lookup (uniform, no backoff)
    pub retry_attempts: u32,

    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.scrapingdog.com/google_lens".to_string(),
            api_key: "${SCRAPINGDOG_API_KEY}".to_string(),
            max_results: 5,
            retry_attempts: 3,
            timeout_ms: 20_000,
        }
    }
}

/// LLM provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Which provider answers geolocation prompts
    pub provider: String,

    /// OpenAI configuration
    pub openai: Option<OpenAiConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            openai: None,
        }
    }
}

/// OpenAI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Chat Completions endpoint
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,

    /// Maximum tokens in the reply
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "gpt-4o".to_string(),
            max_tokens: 500,
            timeout_ms: 60_000,
        }
    }
}

/// Analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Contextual text passed to the model alongside the image.
    /// Only the first three entries are used in the prompt.
    pub contextual_text: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            contextual_text: vec!["Summary of the webpage content goes here...".to_string()],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
