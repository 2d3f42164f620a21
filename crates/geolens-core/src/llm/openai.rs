//! OpenAI LLM provider using the Chat Completions API.
//!
//! Sends the image by URL in the user message content array, after a
//! system message carrying the instructions.

use super::provider::{LlmProvider, LlmRequest, LlmResponse};
use crate::error::{UpstreamError, UpstreamResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// OpenAI provider using Chat Completions API.
pub struct OpenAiProvider {
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(
        client: reqwest::Client,
        endpoint: &str,
        api_key: Option<String>,
        model: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            api_key,
            model: model.to_string(),
            client,
            endpoint: endpoint.to_string(),
            timeout,
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
enum ChatMessage {
    System { content: String },
    User { content: Vec<ChatContent> },
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ChatContent {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: String,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

impl OpenAiProvider {
    fn chat_request(&self, request: &LlmRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            messages: vec![
                ChatMessage::System {
                    content: request.system_prompt.clone(),
                },
                ChatMessage::User {
                    content: vec![
                        ChatContent::Text {
                            text: request.prompt.clone(),
                        },
                        ChatContent::ImageUrl {
                            image_url: ImageUrl {
                                url: request.image_url.clone(),
                            },
                        },
                    ],
                },
            ],
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: &LlmRequest) -> UpstreamResult<LlmResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| UpstreamError::MissingApiKey(self.name().to_string()))?;
        let start = Instant::now();
        let body = self.chat_request(request);

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| UpstreamError::Llm {
                message: format!("OpenAI request failed: {e}"),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::Llm {
                message: format!("OpenAI HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let chat_resp: ChatResponse = resp.json().await.map_err(|e| UpstreamError::Llm {
            message: format!("Failed to parse OpenAI response: {e}"),
            status_code: None,
        })?;

        let text = chat_resp
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| UpstreamError::Llm {
                message: "OpenAI returned empty choices array, no content generated".to_string(),
                status_code: None,
            })?;

        Ok(LlmResponse {
            text: text.trim().to_string(),
            model: chat_resp.model,
            tokens_used: chat_resp.usage.map(|u| u.total_tokens),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_upstream;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    fn provider_for(addr: std::net::SocketAddr) -> OpenAiProvider {
        OpenAiProvider::new(
            reqwest::Client::new(),
            &format!("http://{addr}/v1/chat/completions"),
            Some("sk-test".to_string()),
            "gpt-4o",
            Duration::from_secs(5),
        )
    }

    fn request() -> LlmRequest {
        LlmRequest {
            image_url: "https://img/tower.jpg".to_string(),
            system_prompt: "be a geolocator".to_string(),
            prompt: "where is this?".to_string(),
            max_tokens: 500,
        }
    }

    #[test]
    fn test_chat_request_shape() {
        let provider = OpenAiProvider::new(
            reqwest::Client::new(),
            "http://unused",
            Some("k".into()),
            "gpt-4o",
            Duration::from_secs(1),
        );
        let value = serde_json::to_value(provider.chat_request(&request())).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["max_tokens"], 500);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][0]["content"], "be a geolocator");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"][0]["type"], "text");
        assert_eq!(value["messages"][1]["content"][0]["text"], "where is this?");
        assert_eq!(value["messages"][1]["content"][1]["type"], "image_url");
        assert_eq!(
            value["messages"][1]["content"][1]["image_url"]["url"],
            "https://img/tower.jpg"
        );
    }

    #[tokio::test]
    async fn test_generate_returns_trimmed_reply() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers["authorization"].to_str().unwrap().to_string();
                Json(json!({
                    "model": body["model"],
                    "choices": [{"message": {"content": format!("  {auth}  \n")}}],
                    "usage": {"total_tokens": 321}
                }))
            }),
        );
        let addr = spawn_upstream(router).await;

        let response = provider_for(addr).generate(&request()).await.unwrap();
        assert_eq!(response.text, "Bearer sk-test");
        assert_eq!(response.model, "gpt-4o");
        assert_eq!(response.tokens_used, Some(321));
    }

    #[tokio::test]
    async fn test_generate_http_error_keeps_status() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "bad key") }),
        );
        let addr = spawn_upstream(router).await;

        let err = provider_for(addr).generate(&request()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(401));
    }

    #[tokio::test]
    async fn test_generate_empty_choices_is_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"model": "gpt-4o", "choices": []})) }),
        );
        let addr = spawn_upstream(router).await;

        let err = provider_for(addr).generate(&request()).await.unwrap_err();
        assert!(err.to_string().contains("empty choices"));
    }
}
