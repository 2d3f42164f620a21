//! Google Lens results via the ScrapingDog API.
//!
//! One `GET {endpoint}?api_key=..&url=..` per attempt. The response body is
//! `{"lens_results": [{"title": .., "link": .., ...}, ...]}`.

use super::LensProvider;
use crate::error::{UpstreamError, UpstreamResult};
use crate::types::LensResult;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// ScrapingDog Google Lens provider.
pub struct ScrapingDogProvider {
    api_key: Option<String>,
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl ScrapingDogProvider {
    pub fn new(
        client: reqwest::Client,
        endpoint: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            api_key,
            client,
            endpoint: endpoint.to_string(),
            timeout,
        }
    }
}

#[derive(Deserialize)]
struct LensResponse {
    #[serde(default)]
    lens_results: Vec<LensResult>,
}

#[async_trait]
impl LensProvider for ScrapingDogProvider {
    fn name(&self) -> &str {
        "scrapingdog"
    }

    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, image_url: &str) -> UpstreamResult<Vec<LensResult>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| UpstreamError::MissingApiKey(self.name().to_string()))?;

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("api_key", api_key), ("url", image_url)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| UpstreamError::Lens {
                message: format!("ScrapingDog request failed: {e}"),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::Lens {
                message: format!("ScrapingDog HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let body: LensResponse = resp.json().await.map_err(|e| UpstreamError::Lens {
            message: format!("Failed to parse ScrapingDog response: {e}"),
            status_code: None,
        })?;

        Ok(body.lens_results)
    }
}
