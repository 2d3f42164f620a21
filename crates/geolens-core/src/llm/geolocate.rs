//! Geolocation analysis on top of an [`LlmProvider`].
//!
//! One call per request, no retry. The reply must look like a JSON object
//! (`{` … `}`) and parse into [`AiAnalysis`]; anything else, including a
//! failed call or missing credentials, yields `None`.

use super::provider::{LlmProvider, LlmRequest};
use crate::error::UpstreamError;
use crate::types::{AiAnalysis, LensResult, MAX_GUESSES};
use thiserror::Error;

/// Why a model reply was rejected.
#[derive(Error, Debug)]
pub enum ReplyError {
    #[error("reply is not a JSON object")]
    NotJsonObject,

    #[error("reply does not match the analysis schema: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Validate and parse a raw model reply.
pub fn parse_reply(raw: &str) -> Result<AiAnalysis, ReplyError> {
    let raw = raw.trim();
    if !raw.starts_with('{') || !raw.ends_with('}') {
        return Err(ReplyError::NotJsonObject);
    }
    let mut analysis: AiAnalysis = serde_json::from_str(raw)?;
    analysis.top_location_guesses.truncate(MAX_GUESSES);
    Ok(analysis)
}

/// Asks the model where an image was taken.
pub struct Geolocator {
    provider: Box<dyn LlmProvider>,
    max_tokens: u32,
}

impl Geolocator {
    pub fn new(provider: Box<dyn LlmProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    /// Analyze the image, or return `None` if anything went wrong.
    pub async fn analyze(
        &self,
        image_url: &str,
        context: &[String],
        lens_results: &[LensResult],
    ) -> Option<AiAnalysis> {
        let name = self.provider.name();
        if !self.provider.is_available().await {
            tracing::error!("{name} API key is missing, skipping AI analysis");
            return None;
        }

        let request = LlmRequest::geolocate(image_url, context, lens_results, self.max_tokens);
        let timeout = self.provider.timeout();
        let outcome = match tokio::time::timeout(timeout, self.provider.generate(&request)).await
        {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout {
                service: name.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            }),
        };

        let raw_reply = match outcome {
            Ok(response) => {
                tracing::debug!(
                    model = %response.model,
                    latency_ms = response.latency_ms,
                    tokens = ?response.tokens_used,
                    "{name} replied"
                );
                response.text
            }
            Err(e) => {
                tracing::error!("{name} call failed: {e} (no reply received)");
                return None;
            }
        };

        match parse_reply(&raw_reply) {
            Ok(analysis) => {
                let pretty = serde_json::to_string_pretty(&analysis).unwrap_or_default();
                tracing::info!("AI analysis result:\n{pretty}");
                Some(analysis)
            }
            Err(e) => {
                tracing::error!("Rejected {name} reply: {e}\nRaw reply: {raw_reply}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamResult;
    use crate::llm::provider::LlmResponse;
    use crate::types::Confidence;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const PARIS: &str = r#"{"top_location_guesses":["Paris","Lyon","Nice"],"confidence_score":"82%","reasoning":"Haussmann facades"}"#;

    /// Mock LLM that replays a fixed result and records the request it saw.
    struct MockLlm {
        reply: Box<dyn Fn() -> UpstreamResult<String> + Send + Sync>,
        available: bool,
        call_count: Arc<AtomicU32>,
        last_prompt: Arc<Mutex<Option<String>>>,
    }

    impl MockLlm {
        fn replying(text: &str) -> Self {
            let text = text.to_string();
            Self {
                reply: Box::new(move || Ok(text.clone())),
                available: true,
                call_count: Arc::new(AtomicU32::new(0)),
                last_prompt: Arc::new(Mutex::new(None)),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Box::new(|| {
                    Err(UpstreamError::Llm {
                        message: "HTTP 503".to_string(),
                        status_code: Some(503),
                    })
                }),
                ..Self::replying("")
            }
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlm {
        fn name(&self) -> &str {
            "mock"
        }

        async fn is_available(&self) -> bool {
            self.available
        }

        async fn generate(&self, request: &LlmRequest) -> UpstreamResult<LlmResponse> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(request.prompt.clone());
            let text = (self.reply)()?;
            Ok(LlmResponse {
                text,
                model: "mock-v1".to_string(),
                tokens_used: None,
                latency_ms: 1,
            })
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(5)
        }
    }

    #[test]
    fn test_parse_reply_well_formed() {
        let analysis = parse_reply(PARIS).unwrap();
        assert_eq!(analysis.top_location(), Some("Paris"));
        assert_eq!(analysis.confidence_score, Confidence::Text("82%".into()));
        assert_eq!(analysis.reasoning, "Haussmann facades");
    }

    #[test]
    fn test_parse_reply_rejects_fenced_json() {
        let fenced = format!("```json\n{PARIS}\n```");
        assert!(matches!(
            parse_reply(&fenced),
            Err(ReplyError::NotJsonObject)
        ));
    }

    #[test]
    fn test_parse_reply_rejects_prose() {
        assert!(matches!(
            parse_reply("I think this is Paris."),
            Err(ReplyError::NotJsonObject)
        ));
    }

    #[test]
    fn test_parse_reply_rejects_broken_json() {
        assert!(matches!(
            parse_reply("{\"top_location_guesses\": [}"),
            Err(ReplyError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_reply_rejects_wrong_schema() {
        assert!(matches!(
            parse_reply("{\"location\": \"Paris\"}"),
            Err(ReplyError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_reply_truncates_extra_guesses() {
        let raw = r#"{"top_location_guesses":["A","B","C","D"],"confidence_score":40,"reasoning":"r"}"#;
        let analysis = parse_reply(raw).unwrap();
        assert_eq!(analysis.top_location_guesses, vec!["A", "B", "C"]);
        assert_eq!(analysis.confidence_score, Confidence::Number(40.into()));
    }

    #[test]
    fn test_parse_reply_without_reasoning_is_kept() {
        let raw = r#"{"top_location_guesses":["Paris","Lyon"],"confidence_score":"82%"}"#;
        let analysis = parse_reply(raw).unwrap();
        assert_eq!(analysis.top_location(), Some("Paris"));
        assert_eq!(analysis.confidence_score, Confidence::Text("82%".into()));
        assert_eq!(analysis.reasoning, "");
    }

    #[test]
    fn test_parse_reply_keeps_unknown_fields() {
        let raw = r#"{"top_location_guesses":["Paris"],"confidence_score":70,"reasoning":"r","country":"France"}"#;
        let analysis = parse_reply(raw).unwrap();
        assert_eq!(analysis.extra["country"], "France");
    }

    #[test]
    fn test_parse_reply_still_requires_guesses() {
        let raw = r#"{"confidence_score":"82%","reasoning":"r"}"#;
        assert!(matches!(parse_reply(raw), Err(ReplyError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_analyze_success_passes_lens_hits_to_prompt() {
        let provider = MockLlm::replying(PARIS);
        let last_prompt = provider.last_prompt.clone();
        let geolocator = Geolocator::new(Box::new(provider), 500);
        let hits = vec![LensResult {
            title: "Eiffel Tower".to_string(),
            link: "https://e.example".to_string(),
        }];

        let analysis = geolocator
            .analyze("https://img/1.jpg", &["ctx".to_string()], &hits)
            .await
            .unwrap();
        assert_eq!(analysis.top_location(), Some("Paris"));

        let prompt = last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("- Eiffel Tower (Link: https://e.example)"));
        assert!(prompt.ends_with(": ctx"));
    }

    #[tokio::test]
    async fn test_analyze_call_failure_is_none_without_retry() {
        let provider = MockLlm::failing();
        let call_count = provider.call_count.clone();
        let geolocator = Geolocator::new(Box::new(provider), 500);

        assert!(geolocator.analyze("https://img/1.jpg", &[], &[]).await.is_none());
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_analyze_without_credentials_skips_call() {
        let mut provider = MockLlm::replying(PARIS);
        provider.available = false;
        let call_count = provider.call_count.clone();
        let geolocator = Geolocator::new(Box::new(provider), 500);

        assert!(geolocator.analyze("https://img/1.jpg", &[], &[]).await.is_none());
        assert_eq!(call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analyze_non_object_reply_is_none() {
        let geolocator = Geolocator::new(Box::new(MockLlm::replying("Paris, probably")), 500);
        assert!(geolocator.analyze("https://img/1.jpg", &[], &[]).await.is_none());
    }
}
