//! Per-invocation prompt configuration.

use serde::{Deserialize, Serialize};

use super::action::RecordAction;
use crate::domain::foundation::ValidationError;

/// Retry bound used when the caller does not set one.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Kind of prompt being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PromptType {
    Action,
    Confirm,
    Choice,
    Digits,
    Record,
    /// Transcribe the answer only.
    SpeechToText,
    /// Transcribe, then classify intent.
    Understanding,
    /// Transcribe, classify intent, then pick one of a set of choices.
    UnderstandingChoice,
}

impl PromptType {
    /// Returns true if the transcript is sent to the intent classifier.
    pub fn requires_understanding(&self) -> bool {
        matches!(self, Self::Understanding | Self::UnderstandingChoice)
    }

    /// Returns true if the transcript must match one of the request's choices.
    pub fn selects_choice(&self) -> bool {
        matches!(self, Self::UnderstandingChoice)
    }
}

/// A named option the caller can pick by voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub name: String,
    /// Other spoken forms accepted for this choice.
    #[serde(default)]
    pub variants: Vec<String>,
}

impl Choice {
    /// Creates a choice with no extra variants.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("choice.name"));
        }
        Ok(Self {
            name,
            variants: Vec::new(),
        })
    }

    /// Adds an accepted variant.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variants.push(variant.into());
        self
    }
}

/// Everything the orchestrator needs to run one prompt.
///
/// Persisted on the flow's durable state; `max_retries` counts down as
/// retries are spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    pub prompt_type: PromptType,
    pub action: RecordAction,
    pub max_retries: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

impl PromptRequest {
    /// Creates a request without choices.
    pub fn new(prompt_type: PromptType, action: RecordAction, max_retries: u32) -> Self {
        Self {
            prompt_type,
            action,
            max_retries,
            choices: Vec::new(),
        }
    }

    /// Attaches the choices for a choice prompt.
    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }

    /// Spends one retry. Returns false when none are left.
    pub fn consume_retry(&mut self) -> bool {
        if self.max_retries > 0 {
            self.max_retries -= 1;
            true
        } else {
            false
        }
    }
}
