use crate::config::InferenceConfig;
use crate::decode::ResponseShape;
use crate::error::StageError;
use crate::http::read_body;
use lecture_types::{AudioInput, Transcript};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::sync::Arc;

/// Speech-to-text over a hosted transcription endpoint.
#[derive(Debug, Clone)]
pub struct SttService {
    config: Arc<InferenceConfig>,
    client: Client,
}

impl SttService {
    pub fn new(config: Arc<InferenceConfig>, client: Client) -> Self {
        Self { config, client }
    }

    /// Transcribes `audio`, failing if the service yields no text.
    pub async fn transcribe(&self, audio: &AudioInput) -> Result<Transcript, StageError> {
        let body = self.request(audio).await?;
        let text = ResponseShape::parse(&body)?.text_field("text")?;
        let transcript = Transcript::new(text).ok_or(StageError::EmptyText)?;
        tracing::info!(
            chars = transcript.as_str().chars().count(),
            "transcription complete"
        );
        Ok(transcript)
    }

    /// Forwards `audio` and returns the service's JSON unmodified.
    pub async fn transcribe_raw(
        &self,
        audio: &AudioInput,
    ) -> Result<serde_json::Value, StageError> {
        let body = self.request(audio).await?;
        serde_json::from_slice(&body)
            .map_err(|e| StageError::UnexpectedShape(format!("response is not JSON: {}", e)))
    }

    async fn request(&self, audio: &AudioInput) -> Result<Vec<u8>, StageError> {
        if audio.is_empty() {
            return Err(StageError::EmptyInput);
        }
        if audio.len() > self.config.max_audio_bytes {
            return Err(StageError::InputTooLarge {
                size: audio.len(),
                limit: self.config.max_audio_bytes,
            });
        }

        let part = Part::bytes(audio.data.clone())
            .file_name(audio.file_name.clone())
            .mime_str(&audio.media_type)?;
        let form = Form::new().part("file", part);

        tracing::debug!(
            bytes = audio.len(),
            media_type = %audio.media_type,
            "sending audio for transcription"
        );

        let response = self
            .client
            .post(&self.config.stt_url)
            .bearer_auth(&self.config.token)
            .multipart(form)
            .send()
            .await?;

        read_body(response, |status| status.is_success()).await
    }
}
