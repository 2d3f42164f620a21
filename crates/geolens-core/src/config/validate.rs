//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

/// LLM providers that can answer geolocation prompts.
pub(crate) const KNOWN_PROVIDERS: &[&str] = &["openai"];

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be > 0".into(),
            ));
        }
        if self.server.cors_origin.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.cors_origin must not be empty".into(),
            ));
        }
        if self.lens.max_results == 0 {
            return Err(ConfigError::ValidationError(
                "lens.max_results must be > 0".into(),
            ));
        }
        if self.lens.retry_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "lens.retry_attempts must be > 0".into(),
            ));
        }
        if self.lens.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "lens.timeout_ms must be > 0".into(),
            ));
        }
        if !KNOWN_PROVIDERS.contains(&self.llm.provider.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "llm.provider must be one of {:?}, got '{}'",
                KNOWN_PROVIDERS, self.llm.provider
            )));
        }
        if let Some(openai) = &self.llm.openai {
            if openai.max_tokens == 0 {
                return Err(ConfigError::ValidationError(
                    "llm.openai.max_tokens must be > 0".into(),
                ));
            }
            if openai.timeout_ms == 0 {
                return Err(ConfigError::ValidationError(
                    "llm.openai.timeout_ms must be > 0".into(),
                ));
            }
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {:?}, got '{}'",
                LOG_LEVELS, self.logging.level
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be one of {:?}, got '{}'",
                LOG_FORMATS, self.logging.format
            )));
        }
        Ok(())
    }
}
