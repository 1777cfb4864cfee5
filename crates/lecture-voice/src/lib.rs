//! Inference stages for the lecture summary pipeline.
//!
//! Wraps three hosted inference endpoints (speech-to-text, text
//! generation and text-to-speech) behind typed services, and chains them
//! in [`Pipeline`]. Every service decodes its upstream response through an
//! explicit set of accepted shapes and fails closed on anything else, so a
//! failed stage can never leak an empty string into the next one.

pub mod config;
mod decode;
pub mod error;
mod http;
pub mod pipeline;
pub mod stt;
pub mod summarize;
pub mod tts;

pub use config::{InferenceConfig, DEFAULT_LLM_URL, DEFAULT_STT_URL, DEFAULT_TTS_URL};
pub use error::{PipelineError, StageError};
pub use http::build_client;
pub use pipeline::{Pipeline, PipelineState};
pub use stt::SttService;
pub use summarize::{build_prompt, SummaryService, SUMMARY_INSTRUCTION};
pub use tts::TtsService;
