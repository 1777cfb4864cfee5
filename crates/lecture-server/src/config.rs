//! Server configuration loading from file and environment variables.

use lecture_voice::InferenceConfig;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Environment variable holding the bearer credential for the inference
/// services. Required.
pub const CREDENTIAL_ENV_VAR: &str = "HF_TOKEN";

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Inference endpoints, timeout and size limits.
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Static page served at `/`.
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "lecture_voice=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// Directory containing `index.html`.
    #[serde(default = "default_static_dir")]
    pub dir: String,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            dir: default_static_dir(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The bearer credential is not set.
    #[error("HF_TOKEN not set: the inference credential is required")]
    MissingCredential,

    /// An inference endpoint is not an absolute http(s) URL.
    #[error("invalid {field} URL {value:?}: {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Loads configuration from a TOML file and the process environment.
///
/// Environment variable overrides:
/// - `LECTURE_HOST` overrides `server.host`
/// - `LECTURE_PORT` overrides `server.port`
/// - `LECTURE_LOG_LEVEL` overrides `logging.level`
/// - `LECTURE_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `LECTURE_STT_URL`, `LECTURE_LLM_URL`, `LECTURE_TTS_URL` override the
///   inference endpoints
/// - `LECTURE_TIMEOUT_SECONDS` overrides `inference.timeout_seconds`
/// - `LECTURE_STATIC_DIR` overrides `static_files.dir`
///
/// The credential is read from `HF_TOKEN` only.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed, if
/// the credential is missing, or if an endpoint URL is invalid.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// [`load_config`] with an explicit environment lookup.
pub fn load_config_with(
    path: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    if let Some(host) = env("LECTURE_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = env("LECTURE_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(level) = env("LECTURE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = env("LECTURE_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(url) = env("LECTURE_STT_URL") {
        config.inference.stt_url = url;
    }
    if let Some(url) = env("LECTURE_LLM_URL") {
        config.inference.llm_url = url;
    }
    if let Some(url) = env("LECTURE_TTS_URL") {
        config.inference.tts_url = url;
    }
    if let Some(timeout) = env("LECTURE_TIMEOUT_SECONDS") {
        if let Ok(parsed) = timeout.parse() {
            config.inference.timeout_seconds = parsed;
        }
    }
    if let Some(dir) = env("LECTURE_STATIC_DIR") {
        config.static_files.dir = dir;
    }

    config.inference.token = env(CREDENTIAL_ENV_VAR)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(ConfigError::MissingCredential)?;

    validate_url("stt_url", &config.inference.stt_url)?;
    validate_url("llm_url", &config.inference.llm_url)?;
    validate_url("tts_url", &config.inference.tts_url)?;

    Ok(config)
}

fn validate_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        reason,
    };
    let parsed = url::Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {:?}", other))),
    }
}
