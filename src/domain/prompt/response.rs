//! Per-pass working result and the response payload it accumulates.

use serde::{Deserialize, Serialize};

use super::request::Choice;
use crate::domain::foundation::{StateMachine, ValidationError};
use crate::domain::intent::LanguageResult;

/// State of one pass through the prompt pipeline.
///
/// Every pass starts `Completed`. A stage that finds a problem moves it to
/// one of the other states, and from there nothing moves it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseState {
    /// The answer is usable so far.
    #[default]
    Completed,
    /// Re-prompt the caller if retries remain.
    Retry,
    /// The prompt was abandoned.
    Canceled,
    /// The caller hung up.
    Terminated,
    /// The recording service failed.
    Failed,
}

impl StateMachine for ResponseState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ResponseState::*;
        matches!(
            (self, target),
            (Completed, Retry) | (Completed, Canceled) | (Completed, Terminated) | (Completed, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ResponseState::*;
        match self {
            Completed => vec![Retry, Canceled, Terminated, Failed],
            Retry | Canceled | Terminated | Failed => vec![],
        }
    }
}

/// Text recognized from the caller's recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Transcript {
    /// Creates a transcript without a confidence score.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
        }
    }

    /// Sets the recognizer's confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Response payload delivered to the parent flow.
///
/// Fields fill in as pipeline stages succeed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    #[serde(default)]
    pub recorded_audio: Vec<u8>,
    #[serde(default)]
    pub length_of_recording_in_secs: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<Transcript>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice: Option<Choice>,
    #[serde(default)]
    pub intercepted: bool,
}

impl PromptResponse {
    /// Creates a payload for a successful recording.
    pub fn recorded(recorded_audio: Vec<u8>, length_of_recording_in_secs: f64) -> Self {
        Self {
            recorded_audio,
            length_of_recording_in_secs,
            ..Default::default()
        }
    }

    /// The recognized text, if transcription succeeded.
    pub fn transcript_text(&self) -> Option<&str> {
        self.speech.as_ref().map(|s| s.text.as_str())
    }
}

/// Working record for one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationResult {
    state: ResponseState,
    retry_prompt: Option<String>,
    pub response: PromptResponse,
}

impl OperationResult {
    /// Starts a pass in the `Completed` state with an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a pass from a payload a previous pass already built.
    pub fn resume(response: PromptResponse) -> Self {
        Self {
            response,
            ..Self::default()
        }
    }

    /// Current state of the pass.
    pub fn state(&self) -> ResponseState {
        self.state
    }

    /// Text to play before re-prompting, when retrying.
    pub fn retry_prompt(&self) -> Option<&str> {
        self.retry_prompt.as_deref()
    }

    /// Returns true while every stage so far succeeded.
    pub fn is_completed(&self) -> bool {
        self.state == ResponseState::Completed
    }

    /// Moves the pass to `Retry` with the text to play first.
    pub fn retry(&mut self, prompt: impl Into<String>) -> Result<(), ValidationError> {
        self.state = self.state.transition_to(ResponseState::Retry)?;
        self.retry_prompt = Some(prompt.into());
        Ok(())
    }

    /// Moves the pass to `Failed`.
    pub fn fail(&mut self) -> Result<(), ValidationError> {
        self.state = self.state.transition_to(ResponseState::Failed)?;
        Ok(())
    }

    /// Moves the pass to `Terminated`.
    pub fn terminate(&mut self) -> Result<(), ValidationError> {
        self.state = self.state.transition_to(ResponseState::Terminated)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod response_state {
        use super::*;

        #[test]
        fn default_state_is_completed() {
            assert_eq!(ResponseState::default(), ResponseState::Completed);
        }

        #[test]
        fn completed_can_move_to_every_other_state() {
            let targets = ResponseState::Completed.valid_transitions();
            assert_eq!(targets.len(), 4);
            assert!(!targets.contains(&ResponseState::Completed));
        }

        #[test]
        fn non_completed_states_are_terminal_for_the_pass() {
            for state in [
                ResponseState::Retry,
                ResponseState::Canceled,
                ResponseState::Terminated,
                ResponseState::Failed,
            ] {
                assert!(state.is_terminal(), "{:?} should be terminal", state);
            }
        }

        #[test]
        fn failed_cannot_be_overwritten_by_retry() {
            assert!(ResponseState::Failed.transition_to(ResponseState::Retry).is_err());
        }
    }

    mod operation_result {
        use super::*;

        #[test]
        fn retry_records_prompt() {
            let mut result = OperationResult::new();
            result.retry("Say again").unwrap();
            assert_eq!(result.state(), ResponseState::Retry);
            assert_eq!(result.retry_prompt(), Some("Say again"));
        }

        #[test]
        fn second_transition_is_rejected_and_keeps_first() {
            let mut result = OperationResult::new();
            result.fail().unwrap();
            assert!(result.retry("Say again").is_err());
            assert_eq!(result.state(), ResponseState::Failed);
            assert_eq!(result.retry_prompt(), None);
        }

        #[test]
        fn resume_starts_completed_with_given_payload() {
            let payload = PromptResponse {
                speech: Some(Transcript::new("yes")),
                ..Default::default()
            };
            let result = OperationResult::resume(payload.clone());
            assert!(result.is_completed());
            assert_eq!(result.response, payload);
        }
    }

    mod prompt_response {
        use super::*;

        #[test]
        fn recorded_payload_has_no_transcript_yet() {
            let response = PromptResponse::recorded(vec![1, 2, 3], 1.5);
            assert_eq!(response.transcript_text(), None);
            assert_eq!(response.length_of_recording_in_secs, 1.5);
        }

        #[test]
        fn serializes_with_camel_case_keys() {
            let mut response = PromptResponse::recorded(vec![], 2.0);
            response.speech = Some(Transcript::new("hello"));
            let value = serde_json::to_value(&response).unwrap();
            assert_eq!(value["lengthOfRecordingInSecs"], 2.0);
            assert_eq!(value["speech"]["text"], "hello");
            assert_eq!(value["intercepted"], false);
            assert!(value.get("language").is_none());
        }
    }
}
