//! Speech Recognizer Port - Interface for transcription services.
//!
//! Turns a caller's recorded audio into text. Each call is a single-shot
//! request; the orchestrator never streams and never retries a request on
//! its own, it re-prompts the caller instead.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::prompt::Transcript;

/// Port for speech-to-text services.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribes recorded audio.
    async fn recognize(
        &self,
        audio: &[u8],
        options: &RecognitionOptions,
    ) -> Result<Transcript, SpeechError>;
}

/// Per-request recognition options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionOptions {
    /// Locale override, e.g. `en-US`. Unset uses the service default.
    pub language: Option<String>,
}

impl RecognitionOptions {
    /// Sets the recognition locale.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Transcription failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpeechError {
    /// The audio contained no speech.
    #[error("No speech detected")]
    NoSpeech,

    /// Speech was heard but did not match anything recognizable.
    #[error("Speech could not be recognized")]
    FalseRecognition,

    /// The service could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with an error.
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The service answered with something we could not read.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request took too long.
    #[error("Request timed out")]
    Timeout,
}

impl SpeechError {
    /// Returns true if the failure is about the caller's audio rather than the service.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, SpeechError::NoSpeech | SpeechError::FalseRecognition)
    }
}
