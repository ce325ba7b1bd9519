//! Prompt configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::prompt::{RecordPromptOptions, RetryPrompts, DEFAULT_MAX_RETRIES};

/// Upper bound on retries a prompt may be configured with.
pub const MAX_RETRIES_CEILING: u32 = 10;

/// Retry prompt texts and prompt defaults
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PromptsConfig {
    /// Played when nothing was said before the recording timed out
    #[serde(default = "default_record_silence")]
    pub record_silence: String,

    /// Played when speech could not be recognized or understood
    #[serde(default = "default_invalid_recognize")]
    pub invalid_recognize: String,

    /// Played when the recording was unusable
    #[serde(default = "default_invalid_recording")]
    pub invalid_recording: String,

    /// Played when the answer matched no choice; `{choice}` is replaced
    /// by what the caller said
    #[serde(default = "default_invalid_choice")]
    pub invalid_choice: String,

    /// Retries granted to prompts that do not set their own
    #[serde(default = "default_max_retries")]
    pub default_max_retries: u32,
}

impl PromptsConfig {
    /// Retry texts for the orchestrator
    pub fn retry_prompts(&self) -> RetryPrompts {
        RetryPrompts {
            record_silence: self.record_silence.clone(),
            invalid_recognize: self.invalid_recognize.clone(),
            invalid_recording: self.invalid_recording.clone(),
            invalid_choice: self.invalid_choice.clone(),
        }
    }

    /// Prompt options carrying the configured retry default
    pub fn prompt_options(&self) -> RecordPromptOptions {
        RecordPromptOptions::default().with_max_retries(self.default_max_retries)
    }

    /// Validate prompt configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let texts = [
            ("PROMPTS__RECORD_SILENCE", &self.record_silence),
            ("PROMPTS__INVALID_RECOGNIZE", &self.invalid_recognize),
            ("PROMPTS__INVALID_RECORDING", &self.invalid_recording),
            ("PROMPTS__INVALID_CHOICE", &self.invalid_choice),
        ];
        if let Some((name, _)) = texts.into_iter().find(|(_, text)| text.trim().is_empty()) {
            return Err(ValidationError::EmptyPrompt(name));
        }

        if self.default_max_retries > MAX_RETRIES_CEILING {
            return Err(ValidationError::TooManyRetries {
                max: MAX_RETRIES_CEILING,
                actual: self.default_max_retries,
            });
        }
        Ok(())
    }
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            record_silence: default_record_silence(),
            invalid_recognize: default_invalid_recognize(),
            invalid_recording: default_invalid_recording(),
            invalid_choice: default_invalid_choice(),
            default_max_retries: default_max_retries(),
        }
    }
}

fn default_record_silence() -> String {
    RetryPrompts::default().record_silence
}

fn default_invalid_recognize() -> String {
    RetryPrompts::default().invalid_recognize
}

fn default_invalid_recording() -> String {
    RetryPrompts::default().invalid_recording
}

fn default_invalid_choice() -> String {
    RetryPrompts::default().invalid_choice
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}
