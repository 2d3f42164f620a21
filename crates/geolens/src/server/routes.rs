//! Route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use geolens_core::{AnalysisResponse, AnalyzeRequest};
use serde_json::{json, Value};

use super::error::ApiError;
use super::AppState;

/// `POST /analyze`: guess the location of the image at `image_url`.
///
/// The URL is forwarded exactly as sent; an empty or all-whitespace value
/// counts as missing. Upstream failures degrade inside the response; only a
/// missing URL (400) or an unreadable body (500) change the status.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Internal(e.body_text()))?;
    let image_url = request.image_url().ok_or(ApiError::MissingImageUrl)?;

    Ok(Json(state.analyzer.analyze(image_url).await))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": geolens_core::VERSION,
    }))
}
