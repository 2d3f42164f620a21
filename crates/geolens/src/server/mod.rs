//! Axum HTTP server exposing the analysis pipeline.

mod error;
mod routes;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use geolens_core::{Analyzer, Config};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

/// Create the application router.
///
/// CORS admits exactly `cors_origin`, with credentials. Requests from any
/// other origin get no CORS headers at all.
pub fn build_router(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    let origin = HeaderValue::from_str(cors_origin)
        .with_context(|| format!("Invalid CORS origin: {cors_origin}"))?;
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/analyze", post(routes::analyze))
        .route("/health", get(routes::health))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

/// Run the server until Ctrl-C / SIGTERM.
pub async fn run(config: Config) -> anyhow::Result<()> {
    warn_missing_keys(&config);

    let analyzer = Analyzer::from_config(&config)?;
    let app = build_router(AppState::new(analyzer), &config.server.cors_origin)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Geolens listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Keys are optional at startup, but the service is mostly useless without them.
fn warn_missing_keys(config: &Config) {
    if geolens_core::config::resolve_env_var(&config.lens.api_key).is_none() {
        tracing::warn!("No Lens API key configured; lookups will return no results");
    }
    if geolens_core::config::resolve_env_var(&config.openai().api_key).is_none() {
        tracing::warn!("No OpenAI API key configured; analyses will fall back to defaults");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutting down");
}
