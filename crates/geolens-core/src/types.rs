//! Core data types for a geolocation request.
//!
//! Every value here is created per request and dropped once the response
//! has been sent.

use serde::{Deserialize, Serialize};

/// Placeholder location used when the model produced no usable guess.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Confidence reported when the model produced no usable analysis.
pub const DEFAULT_CONFIDENCE: u8 = 50;

/// Maximum number of location guesses kept from the model.
pub const MAX_GUESSES: usize = 3;

/// A single reverse-image-search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LensResult {
    /// Page title of the matching source
    #[serde(default)]
    pub title: String,

    /// URL of the matching source
    #[serde(default)]
    pub link: String,
}

/// Confidence as reported by the model, or the numeric default.
///
/// Models are asked for a percentage string ("82%") but some return a bare
/// number. Either form is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    Text(String),
    Number(serde_json::Number),
}

impl Default for Confidence {
    fn default() -> Self {
        Self::Number(DEFAULT_CONFIDENCE.into())
    }
}

/// Structured geolocation answer parsed from the model's reply.
///
/// Only the guesses and the confidence are required. Anything else the
/// model adds is kept in `extra` and echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    /// Most likely location first, then up to two alternatives
    pub top_location_guesses: Vec<String>,

    /// Model's own confidence estimate (expected "0-100%")
    pub confidence_score: Confidence,

    /// Why the model picked this location
    #[serde(default)]
    pub reasoning: String,

    /// Unrecognised fields from the reply
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AiAnalysis {
    /// The model's first guess, if it gave any.
    pub fn top_location(&self) -> Option<&str> {
        self.top_location_guesses.first().map(String::as_str)
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub image_url: Option<String>,
}

impl AnalyzeRequest {
    /// The image URL exactly as sent. Empty or all-whitespace strings count
    /// as missing.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

/// The merged answer returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Always "success"; failures use a different body entirely
    pub status: String,

    /// First model guess, or "Unknown"
    pub top_location: String,

    /// Model confidence, or 50
    pub confidence: Confidence,

    /// Full model analysis, `null` when it failed
    pub ai_analysis: Option<AiAnalysis>,

    /// Reverse image search hits (possibly empty)
    pub google_lens_results: Vec<LensResult>,

    /// Context strings that were offered to the model
    pub contextual_text: Vec<String>,
}

impl AnalysisResponse {
    /// Assemble the response, substituting defaults when analysis failed.
    pub fn assemble(
        ai_analysis: Option<AiAnalysis>,
        google_lens_results: Vec<LensResult>,
        contextual_text: Vec<String>,
    ) -> Self {
        let top_location = ai_analysis
            .as_ref()
            .and_then(AiAnalysis::top_location)
            .unwrap_or(UNKNOWN_LOCATION)
            .to_string();
        let confidence = ai_analysis
            .as_ref()
            .map(|a| a.confidence_score.clone())
            .unwrap_or_default();

        Self {
            status: "success".to_string(),
            top_location,
            confidence,
            ai_analysis,
            google_lens_results,
            contextual_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paris() -> AiAnalysis {
        AiAnalysis {
            top_location_guesses: vec!["Paris".into(), "Lyon".into(), "Nice".into()],
            confidence_score: Confidence::Text("82%".into()),
            reasoning: "Haussmann facades".into(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_assemble_with_analysis() {
        let response = AnalysisResponse::assemble(Some(paris()), vec![], vec![]);
        assert_eq!(response.status, "success");
        assert_eq!(response.top_location, "Paris");
        assert_eq!(response.confidence, Confidence::Text("82%".into()));
    }

    #[test]
    fn test_assemble_without_analysis_uses_defaults() {
        let response = AnalysisResponse::assemble(None, vec![], vec!["ctx".into()]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["top_location"], "Unknown");
        assert_eq!(value["confidence"], 50);
        assert!(value["ai_analysis"].is_null());
        assert_eq!(value["google_lens_results"], json!([]));
        assert_eq!(value["contextual_text"], json!(["ctx"]));
    }

    #[test]
    fn test_assemble_with_empty_guesses() {
        let mut analysis = paris();
        analysis.top_location_guesses.clear();
        let response = AnalysisResponse::assemble(Some(analysis), vec![], vec![]);
        assert_eq!(response.top_location, "Unknown");
        assert_eq!(response.confidence, Confidence::Text("82%".into()));
    }

    #[test]
    fn test_confidence_accepts_number_or_string() {
        let n: Confidence = serde_json::from_value(json!(73)).unwrap();
        assert_eq!(n, Confidence::Number(73.into()));
        let s: Confidence = serde_json::from_value(json!("73%")).unwrap();
        assert_eq!(s, Confidence::Text("73%".into()));
    }

    #[test]
    fn test_lens_result_tolerates_missing_fields() {
        let hit: LensResult =
            serde_json::from_value(json!({"title": "Eiffel Tower", "thumbnail": "x"})).unwrap();
        assert_eq!(hit.title, "Eiffel Tower");
        assert_eq!(hit.link, "");
    }

    #[test]
    fn test_request_blank_url_is_missing() {
        let req: AnalyzeRequest = serde_json::from_value(json!({"image_url": "  "})).unwrap();
        assert_eq!(req.image_url(), None);
        let req: AnalyzeRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.image_url(), None);
        let req: AnalyzeRequest =
            serde_json::from_value(json!({"image_url": "https://x/y.jpg"})).unwrap();
        assert_eq!(req.image_url(), Some("https://x/y.jpg"));
    }

    #[test]
    fn test_request_url_is_not_trimmed() {
        let req: AnalyzeRequest =
            serde_json::from_value(json!({"image_url": " https://x/y.jpg "})).unwrap();
        assert_eq!(req.image_url(), Some(" https://x/y.jpg "));
    }

    #[test]
    fn test_analysis_echoes_extra_fields() {
        let raw = json!({
            "top_location_guesses": ["Paris"],
            "confidence_score": "82%",
            "landmarks": ["Eiffel Tower"]
        });
        let analysis: AiAnalysis = serde_json::from_value(raw).unwrap();
        assert_eq!(analysis.reasoning, "");
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["landmarks"], json!(["Eiffel Tower"]));
        assert_eq!(value["top_location_guesses"], json!(["Paris"]));
    }
}
