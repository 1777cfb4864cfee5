use crate::config::InferenceConfig;
use crate::decode::ResponseShape;
use crate::error::StageError;
use crate::http::read_body;
use lecture_types::{Summary, Transcript};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;

/// Instruction placed ahead of every transcript.
pub const SUMMARY_INSTRUCTION: &str = "Summarize this classroom lecture transcript:";

/// Builds the text-generation prompt for a transcript.
pub fn build_prompt(transcript: &Transcript) -> String {
    format!("{}\n\n{}", SUMMARY_INSTRUCTION, transcript.as_str())
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
}

/// Summarization over a hosted text-generation endpoint.
#[derive(Debug, Clone)]
pub struct SummaryService {
    config: Arc<InferenceConfig>,
    client: Client,
}

impl SummaryService {
    pub fn new(config: Arc<InferenceConfig>, client: Client) -> Self {
        Self { config, client }
    }

    /// Summarizes a lecture transcript.
    pub async fn summarize(&self, transcript: &Transcript) -> Result<Summary, StageError> {
        let prompt = build_prompt(transcript);
        let summary = self.generate(&prompt).await?;
        tracing::info!(
            chars = summary.as_str().chars().count(),
            "summarization complete"
        );
        Ok(summary)
    }

    /// Runs `prompt` through the model as-is.
    ///
    /// Models that echo the prompt back have it stripped from the result.
    pub async fn generate(&self, prompt: &str) -> Result<Summary, StageError> {
        if prompt.trim().is_empty() {
            return Err(StageError::EmptyInput);
        }
        if prompt.len() > self.config.max_text_bytes {
            return Err(StageError::InputTooLarge {
                size: prompt.len(),
                limit: self.config.max_text_bytes,
            });
        }

        let response = self
            .client
            .post(&self.config.llm_url)
            .bearer_auth(&self.config.token)
            .json(&GenerationRequest { inputs: prompt })
            .send()
            .await?;

        let body = read_body(response, |status| status.is_success()).await?;
        let generated = ResponseShape::parse(&body)?.text_field("generated_text")?;
        let text = generated.strip_prefix(prompt).unwrap_or(&generated);
        Summary::new(text).ok_or(StageError::EmptyText)
    }
}
