//! Pipeline handlers: the combined `/process` endpoint and the per-stage
//! `/stt`, `/chat` and `/tts` endpoints.

use crate::{api::ApiError, AppState};
use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Extension, Multipart},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use lecture_types::{AudioInput, AudioOutput, Stage, WAV_MEDIA_TYPE};
use lecture_voice::PipelineError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Multipart field carrying the uploaded recording.
const FILE_FIELD: &str = "file";

/// Request body for `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Response body for `POST /chat`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub summary: String,
}

/// Request body for `POST /tts`.
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Pulls the `file` part out of a multipart upload.
async fn read_audio_field(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<AudioInput, ApiError> {
    let mut multipart =
        multipart.map_err(|_| ApiError::InputMissing("No file uploaded".to_string()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("multipart error: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().unwrap_or("audio").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read upload: {}", e)))?;

        if data.is_empty() {
            return Err(ApiError::InputMissing("Uploaded file is empty".to_string()));
        }

        return Ok(AudioInput::new(data.to_vec(), content_type.as_deref()).with_file_name(file_name));
    }

    Err(ApiError::InputMissing("No file uploaded".to_string()))
}

fn wav_response(audio: AudioOutput) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, WAV_MEDIA_TYPE)],
        audio.into_bytes(),
    )
        .into_response()
}

/// Handler for `POST /process`.
///
/// Runs the full pipeline and answers with the synthesized WAV only.
pub async fn process_handler(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let input = read_audio_field(multipart).await?;
    // Only the transcription stage sees the upload itself; later stages are
    // fed by upstream output.
    let audio = state.pipeline.run(input).await.map_err(|e| match e.stage {
        Stage::Transcription => ApiError::from_caller_input(e),
        _ => ApiError::Pipeline(e),
    })?;
    Ok(wav_response(audio))
}

/// Handler for `POST /stt`.
///
/// Returns the transcription service's JSON unmodified.
pub async fn stt_handler(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let input = read_audio_field(multipart).await?;
    let raw = state
        .pipeline
        .stt()
        .transcribe_raw(&input)
        .await
        .map_err(|e| ApiError::from_caller_input(PipelineError::new(Stage::Transcription, e)))?;
    Ok(Json(raw))
}

/// Handler for `POST /chat`.
///
/// Sends the prompt to the text-generation service verbatim.
pub async fn chat_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let prompt = request
        .prompt
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::InputMissing("No prompt provided".to_string()))?;

    let summary = state
        .pipeline
        .summarizer()
        .generate(&prompt)
        .await
        .map_err(|e| ApiError::from_caller_input(PipelineError::new(Stage::Summarization, e)))?;

    Ok(Json(ChatResponse {
        summary: summary.into_inner(),
    }))
}

/// Handler for `POST /tts`.
pub async fn tts_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let text = request
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::InputMissing("No text provided".to_string()))?;

    let audio = state
        .pipeline
        .tts()
        .synthesize_text(&text)
        .await
        .map_err(|e| ApiError::from_caller_input(PipelineError::new(Stage::Synthesis, e)))?;

    Ok(wav_response(audio))
}
