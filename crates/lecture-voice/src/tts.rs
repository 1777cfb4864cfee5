use crate::config::InferenceConfig;
use crate::error::StageError;
use crate::http::read_body;
use lecture_types::{AudioOutput, Summary};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    inputs: &'a str,
}

/// Text-to-speech over a hosted synthesis endpoint.
///
/// The service answers with WAV bytes, returned untouched.
#[derive(Debug, Clone)]
pub struct TtsService {
    config: Arc<InferenceConfig>,
    client: Client,
}

impl TtsService {
    pub fn new(config: Arc<InferenceConfig>, client: Client) -> Self {
        Self { config, client }
    }

    /// Renders a summary to speech.
    pub async fn synthesize(&self, summary: &Summary) -> Result<AudioOutput, StageError> {
        self.synthesize_text(summary.as_str()).await
    }

    /// Renders arbitrary non-empty text to speech.
    ///
    /// Any status other than `200 OK` is an error carrying the upstream
    /// status and body.
    pub async fn synthesize_text(&self, text: &str) -> Result<AudioOutput, StageError> {
        if text.trim().is_empty() {
            return Err(StageError::EmptyInput);
        }
        if text.len() > self.config.max_text_bytes {
            return Err(StageError::InputTooLarge {
                size: text.len(),
                limit: self.config.max_text_bytes,
            });
        }

        let response = self
            .client
            .post(&self.config.tts_url)
            .bearer_auth(&self.config.token)
            .json(&SynthesisRequest { inputs: text })
            .send()
            .await?;

        let audio = read_body(response, |status| status == StatusCode::OK).await?;
        tracing::info!(bytes = audio.len(), "synthesis complete");
        Ok(AudioOutput::new(audio))
    }
}
