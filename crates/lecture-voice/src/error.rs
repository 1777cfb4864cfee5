use lecture_types::Stage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StageError {
    #[error("request to inference service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("inference service returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("inference service returned no text")]
    EmptyText,

    #[error("input is empty")]
    EmptyInput,

    #[error("input exceeds maximum size: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge { size: usize, limit: usize },
}

impl StageError {
    /// HTTP status reported by the inference service, if it answered.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::UpstreamStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Response body of a failed upstream call, verbatim.
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            Self::UpstreamStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    /// True when the caller supplied unusable input, as opposed to an
    /// upstream failure.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::InputTooLarge { .. })
    }
}

/// A pipeline run that stopped at `stage`.
#[derive(Error, Debug)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    pub source: StageError,
}

impl PipelineError {
    pub fn new(stage: Stage, source: StageError) -> Self {
        Self { stage, source }
    }
}
