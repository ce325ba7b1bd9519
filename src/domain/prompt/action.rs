//! Action descriptors sent to the caller.
//!
//! The record action is a thin data object: a prompt to play, audio capture
//! options, and the flags that mark it for speech-to-text and intent
//! understanding. The host owns what those options actually do.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Something to play to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayPrompt {
    /// A single text to speak.
    Text(String),
    /// Several texts spoken in order.
    Texts(Vec<String>),
    /// A host-specific action passed through untouched.
    Action(Value),
}

impl PlayPrompt {
    /// Creates a text prompt.
    pub fn text(text: impl Into<String>) -> Self {
        PlayPrompt::Text(text.into())
    }
}

impl From<&str> for PlayPrompt {
    fn from(value: &str) -> Self {
        PlayPrompt::Text(value.to_string())
    }
}

impl From<String> for PlayPrompt {
    fn from(value: String) -> Self {
        PlayPrompt::Text(value)
    }
}

impl From<Vec<String>> for PlayPrompt {
    fn from(value: Vec<String>) -> Self {
        PlayPrompt::Texts(value)
    }
}

/// Audio capture options merged into a record action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_in_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_silence_timeout_in_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_silence_timeout_in_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_beep: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_tones: Option<Vec<String>>,
}

/// Options accepted by the speech prompt entry points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPromptOptions {
    /// Capture options for the record action.
    pub record: RecordOptions,
    /// How many times a bad recording is re-prompted. Defaults to 2.
    pub max_retries: Option<u32>,
}

impl RecordPromptOptions {
    /// Sets the retry bound.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets the capture options.
    pub fn with_record(mut self, record: RecordOptions) -> Self {
        self.record = record;
        self
    }
}

/// Record action sent to the host to capture the caller's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAction {
    pub play_prompt: PlayPrompt,
    #[serde(default)]
    pub speech_to_text: bool,
    #[serde(default)]
    pub understand: bool,
    #[serde(flatten)]
    pub options: RecordOptions,
}

impl RecordAction {
    /// A record action whose audio is transcribed.
    pub fn recognize_speech(play_prompt: PlayPrompt) -> Self {
        Self {
            play_prompt,
            speech_to_text: true,
            understand: false,
            options: RecordOptions::default(),
        }
    }

    /// A record action whose transcript is also classified for intent.
    pub fn understand_speech(play_prompt: PlayPrompt) -> Self {
        Self {
            understand: true,
            ..Self::recognize_speech(play_prompt)
        }
    }

    /// Merges capture options into the action.
    pub fn with_options(mut self, options: RecordOptions) -> Self {
        self.options = options;
        self
    }
}

/// Message queued on the host's outbound batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "camelCase")]
pub enum OutboundMessage {
    /// Play a prompt without recording.
    Prompt(PlayPrompt),
    /// Play a prompt and record the answer.
    Record(RecordAction),
}
