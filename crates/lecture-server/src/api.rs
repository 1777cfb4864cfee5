//! Error responses for the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lecture_types::Stage;
use lecture_voice::PipelineError;
use serde_json::json;
use thiserror::Error;

/// API error type mapping to HTTP status codes.
///
/// Every variant renders as `{"error": <code>, "details": <text>}`; stage
/// failures add `stage` and, when the inference service answered,
/// `upstream_status`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller did not supply the required file or field.
    #[error("{0}")]
    InputMissing(String),
    /// The request could not be parsed.
    #[error("invalid request: {0}")]
    BadRequest(String),
    /// A pipeline stage failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ApiError {
    /// Maps a failure of a stage fed directly by the request body.
    ///
    /// Input the stage rejected is the caller's fault (400); anything else
    /// stays a stage failure. Stages fed by an earlier stage's output must
    /// use `From<PipelineError>` instead, so their input errors remain 500.
    pub fn from_caller_input(err: PipelineError) -> Self {
        if err.source.is_input_error() {
            Self::BadRequest(err.source.to_string())
        } else {
            Self::Pipeline(err)
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InputMissing(_) => "input_missing",
            Self::BadRequest(_) => "invalid_request",
            Self::Pipeline(e) => match e.stage {
                Stage::Transcription => "transcription_error",
                Stage::Summarization => "summarization_error",
                Stage::Synthesis => "synthesis_error",
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InputMissing(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let body = match &self {
            ApiError::InputMissing(msg) | ApiError::BadRequest(msg) => json!({
                "error": code,
                "details": msg,
            }),
            ApiError::Pipeline(e) => {
                tracing::error!(stage = e.stage.as_str(), error = %e.source, "request failed");
                // Upstream bodies are passed through verbatim for diagnosis.
                let details = e
                    .source
                    .upstream_body()
                    .map(str::to_string)
                    .unwrap_or_else(|| e.source.to_string());
                let mut body = json!({
                    "error": code,
                    "stage": e.stage,
                    "details": details,
                });
                if let Some(upstream) = e.source.upstream_status() {
                    body["upstream_status"] = json!(upstream);
                }
                body
            }
        };

        (status, Json(body)).into_response()
    }
}
