use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_STT_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/wav2vec2-large-960h";
pub const DEFAULT_LLM_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.3";
pub const DEFAULT_TTS_URL: &str =
    "https://api-inference.huggingface.co/models/neuphonic/neutts-air";

fn default_stt_url() -> String {
    DEFAULT_STT_URL.to_string()
}

fn default_llm_url() -> String {
    DEFAULT_LLM_URL.to_string()
}

fn default_tts_url() -> String {
    DEFAULT_TTS_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_max_audio_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_max_text_bytes() -> usize {
    64 * 1024
}

/// Endpoints, credential and limits for the three inference services.
///
/// Built once at startup and shared read-only by every request.
#[derive(Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_stt_url")]
    pub stt_url: String,
    #[serde(default = "default_llm_url")]
    pub llm_url: String,
    #[serde(default = "default_tts_url")]
    pub tts_url: String,
    /// Bearer token sent on every outbound call. Never read from or written
    /// to a config file.
    #[serde(skip)]
    pub token: String,
    /// Per-call timeout in seconds. Default: 120.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Largest accepted upload. Default: 25 MiB.
    #[serde(default = "default_max_audio_bytes")]
    pub max_audio_bytes: usize,
    /// Largest accepted prompt or synthesis text. Default: 64 KiB.
    #[serde(default = "default_max_text_bytes")]
    pub max_text_bytes: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            stt_url: default_stt_url(),
            llm_url: default_llm_url(),
            tts_url: default_tts_url(),
            token: String::new(),
            timeout_seconds: default_timeout_seconds(),
            max_audio_bytes: default_max_audio_bytes(),
            max_text_bytes: default_max_text_bytes(),
        }
    }
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("stt_url", &self.stt_url)
            .field("llm_url", &self.llm_url)
            .field("tts_url", &self.tts_url)
            .field("token", &"[REDACTED]")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_audio_bytes", &self.max_audio_bytes)
            .field("max_text_bytes", &self.max_text_bytes)
            .finish()
    }
}

impl InferenceConfig {
    /// Default endpoints and limits with the given bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Points all three stages at the given URLs.
    pub fn with_endpoints(
        mut self,
        stt_url: impl Into<String>,
        llm_url: impl Into<String>,
        tts_url: impl Into<String>,
    ) -> Self {
        self.stt_url = stt_url.into();
        self.llm_url = llm_url.into();
        self.tts_url = tts_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }
}
