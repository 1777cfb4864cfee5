//! Audio payloads entering and leaving the pipeline.

/// Media type of every artifact the synthesis stage returns.
pub const WAV_MEDIA_TYPE: &str = "audio/wav";

/// Media type assumed for uploads that do not declare one.
pub const DEFAULT_UPLOAD_MEDIA_TYPE: &str = "application/octet-stream";

/// An uploaded recording, as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioInput {
    /// Raw audio bytes.
    pub data: Vec<u8>,
    /// Declared media type of `data`.
    pub media_type: String,
    /// Original file name, forwarded on the outbound multipart part.
    pub file_name: String,
}

impl AudioInput {
    pub fn new(data: impl Into<Vec<u8>>, media_type: Option<&str>) -> Self {
        Self {
            data: data.into(),
            media_type: media_type
                .filter(|mt| !mt.trim().is_empty())
                .unwrap_or(DEFAULT_UPLOAD_MEDIA_TYPE)
                .to_string(),
            file_name: "audio".to_string(),
        }
    }

    /// Sets the file name reported to the transcription service.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.file_name = name;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// Synthesized speech. Always WAV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioOutput {
    pub data: Vec<u8>,
}

impl AudioOutput {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn media_type(&self) -> &'static str {
        WAV_MEDIA_TYPE
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
