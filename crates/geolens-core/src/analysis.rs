//! The request pipeline: Lens lookup, then AI analysis, then assembly.
//!
//! ```text
//! image_url → Lens lookup → AI analysis → AnalysisResponse
//! ```
//!
//! Neither stage can fail the request. The analyzer holds no per-request
//! state, so the same input against the same upstream replies always
//! produces the same response.

use crate::config::Config;
use crate::error::GeolensError;
use crate::lens::LensLookup;
use crate::llm::{Geolocator, LlmProviderFactory};
use crate::types::AnalysisResponse;

/// Runs the geolocation pipeline for one image at a time.
pub struct Analyzer {
    lens: LensLookup,
    geolocator: Geolocator,
    contextual_text: Vec<String>,
}

impl Analyzer {
    pub fn new(lens: LensLookup, geolocator: Geolocator, contextual_text: Vec<String>) -> Self {
        Self {
            lens,
            geolocator,
            contextual_text,
        }
    }

    /// Build the analyzer and both upstream clients from configuration.
    ///
    /// Missing API keys are tolerated; out-of-range settings and an unknown
    /// LLM provider are not.
    pub fn from_config(config: &Config) -> Result<Self, GeolensError> {
        config.validate()?;
        let client = reqwest::Client::new();
        let lens = LensLookup::from_config(&config.lens, client.clone());
        let provider = LlmProviderFactory::create(config, client)?;
        let geolocator = Geolocator::new(provider, config.openai().max_tokens);
        Ok(Self::new(
            lens,
            geolocator,
            config.analysis.contextual_text.clone(),
        ))
    }

    /// Context strings offered to the model with every image.
    pub fn contextual_text(&self) -> &[String] {
        &self.contextual_text
    }

    /// Guess where the image at `image_url` was taken.
    pub async fn analyze(&self, image_url: &str) -> AnalysisResponse {
        tracing::info!("Processing image: {image_url}");

        let lens_results = self.lens.lookup(image_url).await;
        let ai_analysis = self
            .geolocator
            .analyze(image_url, &self.contextual_text, &lens_results)
            .await;

        AnalysisResponse::assemble(ai_analysis, lens_results, self.contextual_text.clone())
    }
}
