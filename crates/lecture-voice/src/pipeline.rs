//! The three-stage sequencer.
//!
//! A run moves through [`PipelineState`] one stage at a time. Each stage
//! consumes its predecessor's complete output; a failure ends the run with
//! [`PipelineState::Failed`] and no later stage is attempted.

use crate::config::InferenceConfig;
use crate::error::PipelineError;
use crate::http::build_client;
use crate::stt::SttService;
use crate::summarize::SummaryService;
use crate::tts::TtsService;
use lecture_types::{AudioInput, AudioOutput, Stage, Summary, Transcript};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug)]
pub enum PipelineState {
    Received(AudioInput),
    Transcribed(Transcript),
    Summarized(Summary),
    /// Terminal success.
    Synthesized(AudioOutput),
    /// Terminal failure.
    Failed(PipelineError),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Synthesized(_) | Self::Failed(_))
    }

    /// The stage that runs when this state is advanced.
    pub fn pending_stage(&self) -> Option<Stage> {
        match self {
            Self::Received(_) => Some(Stage::Transcription),
            Self::Transcribed(_) => Some(Stage::Summarization),
            Self::Summarized(_) => Some(Stage::Synthesis),
            Self::Synthesized(_) | Self::Failed(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Received(_) => "received",
            Self::Transcribed(_) => "transcribed",
            Self::Summarized(_) => "summarized",
            Self::Synthesized(_) => "synthesized",
            Self::Failed(_) => "failed",
        }
    }
}

/// Chains transcription, summarization and synthesis.
///
/// Holds no per-request state; a single instance serves every request.
#[derive(Debug, Clone)]
pub struct Pipeline {
    stt: SttService,
    summarizer: SummaryService,
    tts: TtsService,
}

impl Pipeline {
    /// Builds all three services around one shared HTTP client.
    pub fn new(config: InferenceConfig) -> reqwest::Result<Self> {
        let client = build_client(&config)?;
        let config = Arc::new(config);
        Ok(Self {
            stt: SttService::new(config.clone(), client.clone()),
            summarizer: SummaryService::new(config.clone(), client.clone()),
            tts: TtsService::new(config, client),
        })
    }

    pub fn stt(&self) -> &SttService {
        &self.stt
    }

    pub fn summarizer(&self) -> &SummaryService {
        &self.summarizer
    }

    pub fn tts(&self) -> &TtsService {
        &self.tts
    }

    /// Runs the pending stage of `state`. Terminal states are returned as-is.
    pub async fn advance(&self, state: PipelineState) -> PipelineState {
        let Some(stage) = state.pending_stage() else {
            return state;
        };
        let next = match state {
            PipelineState::Received(audio) => self
                .stt
                .transcribe(&audio)
                .await
                .map(PipelineState::Transcribed),
            PipelineState::Transcribed(transcript) => self
                .summarizer
                .summarize(&transcript)
                .await
                .map(PipelineState::Summarized),
            PipelineState::Summarized(summary) => self
                .tts
                .synthesize(&summary)
                .await
                .map(PipelineState::Synthesized),
            terminal => return terminal,
        };

        next.unwrap_or_else(|source| {
            tracing::warn!(stage = stage.as_str(), error = %source, "pipeline stage failed");
            PipelineState::Failed(PipelineError::new(stage, source))
        })
    }

    /// Turns a lecture recording into a spoken summary.
    pub async fn run(&self, input: AudioInput) -> Result<AudioOutput, PipelineError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("pipeline", %request_id);

        async move {
            tracing::info!(bytes = input.len(), "pipeline started");
            let mut state = PipelineState::Received(input);
            loop {
                state = match self.advance(state).await {
                    PipelineState::Synthesized(audio) => {
                        tracing::info!(bytes = audio.data.len(), "pipeline finished");
                        return Ok(audio);
                    }
                    PipelineState::Failed(err) => return Err(err),
                    next => {
                        tracing::debug!(state = next.name(), "pipeline advanced");
                        next
                    }
                };
            }
        }
        .instrument(span)
        .await
    }
}
