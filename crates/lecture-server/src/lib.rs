//! Lecture summary server library logic.

pub mod api;
pub mod api_pipeline;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use lecture_voice::Pipeline;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Headroom on top of the audio limit for multipart framing.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Maximum body size for the JSON endpoints (1 MiB).
const MAX_JSON_BODY_BYTES: usize = 1024 * 1024;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The three-stage inference pipeline.
    pub pipeline: Arc<Pipeline>,
    /// Largest accepted audio upload.
    pub max_audio_bytes: usize,
    /// Directory holding the presentation page.
    pub static_dir: String,
}

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let upload_routes = Router::new()
        .route("/process", post(api_pipeline::process_handler))
        .route("/stt", post(api_pipeline::stt_handler))
        .layer(DefaultBodyLimit::max(
            state.max_audio_bytes + MULTIPART_OVERHEAD_BYTES,
        ));

    let router = Router::new()
        .route("/health", get(health))
        .route("/chat", post(api_pipeline::chat_handler))
        .route("/tts", post(api_pipeline::tts_handler))
        .layer(DefaultBodyLimit::max(MAX_JSON_BODY_BYTES))
        .merge(upload_routes);

    let index = std::path::Path::new(&state.static_dir).join("index.html");
    let router = if index.exists() {
        tracing::info!(path = %state.static_dir, "serving static files");
        router.fallback_service(ServeDir::new(&state.static_dir).fallback(ServeFile::new(index)))
    } else {
        tracing::info!(path = %state.static_dir, "static directory not found, skipping static file serving");
        router
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
