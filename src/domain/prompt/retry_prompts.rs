//! Texts played to the caller before a prompt is repeated.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the caller's words in the invalid-choice text.
pub const CHOICE_PLACEHOLDER: &str = "{choice}";

/// Retry prompt texts, one per kind of recoverable failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPrompts {
    /// Nothing was said before the recording timed out.
    pub record_silence: String,
    /// Speech was heard but could not be recognized or understood.
    pub invalid_recognize: String,
    /// The recording itself was unusable.
    pub invalid_recording: String,
    /// The answer matched none of the offered choices.
    pub invalid_choice: String,
}

impl Default for RetryPrompts {
    fn default() -> Self {
        Self {
            record_silence: "I couldn't hear anything.".to_string(),
            invalid_recognize: "I'm sorry. I didn't understand.".to_string(),
            invalid_recording: "I'm sorry. There was a problem with your recording.".to_string(),
            invalid_choice: format!("Sorry, I don't understand {} as a valid option.", CHOICE_PLACEHOLDER),
        }
    }
}

impl RetryPrompts {
    /// Renders the invalid-choice text for what the caller said.
    pub fn invalid_choice_for(&self, spoken: &str) -> String {
        self.invalid_choice.replace(CHOICE_PLACEHOLDER, spoken)
    }
}
