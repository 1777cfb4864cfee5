//! Shared types for the lecture summary pipeline.
//!
//! Every value in this crate is transient: it is produced by one pipeline
//! stage, consumed by the next, and dropped when the request finishes. Text
//! values can only be constructed non-empty, so a stage can never hand an
//! empty transcript or summary to its successor.

use serde::{Deserialize, Serialize};

mod audio;
mod text;

pub use audio::{AudioInput, AudioOutput, DEFAULT_UPLOAD_MEDIA_TYPE, WAV_MEDIA_TYPE};
pub use text::{Summary, Transcript};

/// The three stages of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Speech-to-text.
    Transcription,
    /// Language-model summarization of the transcript.
    Summarization,
    /// Text-to-speech rendering of the summary.
    Synthesis,
}

impl Stage {
    /// Returns the string label for this stage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transcription => "transcription",
            Self::Summarization => "summarization",
            Self::Synthesis => "synthesis",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
