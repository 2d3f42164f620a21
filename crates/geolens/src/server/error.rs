//! HTTP error bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors that end a request with a non-200 status.
#[derive(Debug)]
pub enum ApiError {
    /// The request body had no usable `image_url`
    MissingImageUrl,
    /// Anything else; the message is returned to the caller
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingImageUrl => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing image URL" })),
            )
                .into_response(),
            ApiError::Internal(message) => {
                tracing::error!("Backend error: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message, "status": "failed" })),
                )
                    .into_response()
            }
        }
    }
}

/// Turn a handler panic into the standard 500 body.
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };
    ApiError::Internal(message).into_response()
}
