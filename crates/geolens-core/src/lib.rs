//! Geolens Core - guess where a photo was taken.
//!
//! Given the URL of an image, Geolens asks a reverse image search service
//! for matching pages, hands those hits plus the image to a multimodal LLM,
//! and merges both into a single best-effort answer.
//!
//! # Architecture
//!
//! ```text
//! image_url → Lens lookup (≤5 hits, 3 attempts) → LLM analysis → AnalysisResponse
//! ```
//!
//! Upstream failures never surface as errors: missing results degrade to
//! an empty list, a missing analysis degrades to "Unknown" at 50%.
//!
//! # Usage
//!
//! ```rust,ignore
//! use geolens_core::{Analyzer, Config};
//!
//! #[tokio::main]
//! async fn main() -> geolens_core::Result<()> {
//!     let config = Config::load()?;
//!     let analyzer = Analyzer::from_config(&config)?;
//!
//!     let response = analyzer.analyze("https://example.com/photo.jpg").await;
//!     println!("Top location: {}", response.top_location);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod lens;
pub mod llm;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenient access
pub use analysis::Analyzer;
pub use config::Config;
pub use error::{ConfigError, GeolensError, Result, UpstreamError, UpstreamResult};
pub use lens::{LensLookup, LensOptions, LensProvider};
pub use llm::{Geolocator, LlmProvider, LlmProviderFactory};
pub use types::{AiAnalysis, AnalysisResponse, AnalyzeRequest, Confidence, LensResult};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
