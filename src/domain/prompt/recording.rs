//! Recording outcomes delivered by the host and their classification.

use serde::{Deserialize, Serialize};

use super::response::{OperationResult, PromptResponse};
use super::retry_prompts::RetryPrompts;
use crate::domain::foundation::ValidationError;

/// Why the host stopped recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionReason {
    #[serde(rename = "completedSilenceDetected")]
    SilenceDetected,
    #[serde(rename = "completedStopToneDetected")]
    StopToneDetected,
    #[serde(rename = "maxRecordingTimeout")]
    MaxDurationReached,
    #[serde(rename = "callTerminated")]
    CallTerminated,
    #[serde(rename = "temporarySystemFailure")]
    TemporarySystemFailure,
    #[serde(rename = "initialSilenceTimeout")]
    InitialSilenceTimeout,
    /// Any reason this crate does not know about.
    #[serde(other)]
    Other,
}

/// Outcome of one recording attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingOutcome {
    pub completion_reason: CompletionReason,
    #[serde(default)]
    pub length_of_recording_in_secs: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl RecordingOutcome {
    /// Creates an outcome with the given reason and no audio length.
    pub fn new(completion_reason: CompletionReason) -> Self {
        Self {
            completion_reason,
            length_of_recording_in_secs: 0.0,
            failure_reason: None,
        }
    }

    /// Sets the recording length.
    pub fn with_length(mut self, secs: f64) -> Self {
        self.length_of_recording_in_secs = secs;
        self
    }
}

/// Reply the host delivers after a record action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_outcome: Option<RecordingOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_audio: Option<Vec<u8>>,
}

impl ConversationReply {
    /// A reply carrying an outcome and the captured audio.
    pub fn recorded(outcome: RecordingOutcome, audio: Vec<u8>) -> Self {
        Self {
            operation_outcome: Some(outcome),
            recorded_audio: Some(audio),
        }
    }

    /// A reply carrying an outcome but no audio.
    pub fn outcome(outcome: RecordingOutcome) -> Self {
        Self {
            operation_outcome: Some(outcome),
            recorded_audio: None,
        }
    }
}

/// Classifies a recording outcome into the state a pass starts from.
///
/// `TemporarySystemFailure` is fatal for the prompt and is not retried.
pub fn receive_record_outcome(
    outcome: &RecordingOutcome,
    recorded_audio: Option<&[u8]>,
    prompts: &RetryPrompts,
) -> Result<OperationResult, ValidationError> {
    let mut result = OperationResult::new();

    match outcome.completion_reason {
        // TODO: let callers opt into treating MaxDurationReached as a retry
        CompletionReason::SilenceDetected
        | CompletionReason::StopToneDetected
        | CompletionReason::MaxDurationReached => {
            result.response = PromptResponse::recorded(
                recorded_audio.map(<[u8]>::to_vec).unwrap_or_default(),
                outcome.length_of_recording_in_secs,
            );
        }
        CompletionReason::CallTerminated => result.terminate()?,
        CompletionReason::TemporarySystemFailure => result.fail()?,
        CompletionReason::InitialSilenceTimeout => result.retry(prompts.record_silence.clone())?,
        CompletionReason::Other => result.retry(prompts.invalid_recording.clone())?,
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prompt::ResponseState;

    fn classify(reason: CompletionReason) -> OperationResult {
        let outcome = RecordingOutcome::new(reason).with_length(3.5);
        receive_record_outcome(&outcome, Some(&[7u8, 8, 9][..]), &RetryPrompts::default()).unwrap()
    }

    mod completed_reasons {
        use super::*;

        #[test]
        fn silence_stop_tone_and_max_duration_complete_with_audio() {
            for reason in [
                CompletionReason::SilenceDetected,
                CompletionReason::StopToneDetected,
                CompletionReason::MaxDurationReached,
            ] {
                let result = classify(reason);
                assert_eq!(result.state(), ResponseState::Completed, "{:?}", reason);
                assert_eq!(result.response.recorded_audio, vec![7, 8, 9]);
                assert_eq!(result.response.length_of_recording_in_secs, 3.5);
                assert_eq!(result.retry_prompt(), None);
            }
        }

        #[test]
        fn missing_audio_gives_empty_payload() {
            let outcome = RecordingOutcome::new(CompletionReason::SilenceDetected);
            let result = receive_record_outcome(&outcome, None, &RetryPrompts::default()).unwrap();
            assert!(result.response.recorded_audio.is_empty());
        }
    }

    mod failing_reasons {
        use super::*;

        #[test]
        fn call_terminated_terminates() {
            let result = classify(CompletionReason::CallTerminated);
            assert_eq!(result.state(), ResponseState::Terminated);
            assert_eq!(result.retry_prompt(), None);
        }

        #[test]
        fn temporary_system_failure_fails_without_retry() {
            let result = classify(CompletionReason::TemporarySystemFailure);
            assert_eq!(result.state(), ResponseState::Failed);
            assert_eq!(result.retry_prompt(), None);
        }

        #[test]
        fn initial_silence_retries_with_silence_prompt() {
            let result = classify(CompletionReason::InitialSilenceTimeout);
            assert_eq!(result.state(), ResponseState::Retry);
            assert_eq!(result.retry_prompt(), Some("I couldn't hear anything."));
        }

        #[test]
        fn unknown_reason_retries_with_invalid_recording_prompt() {
            let result = classify(CompletionReason::Other);
            assert_eq!(result.state(), ResponseState::Retry);
            assert_eq!(
                result.retry_prompt(),
                Some("I'm sorry. There was a problem with your recording.")
            );
        }
    }

    mod wire_format {
        use super::*;

        #[test]
        fn unrecognized_reason_deserializes_as_other() {
            let outcome: RecordingOutcome =
                serde_json::from_str(r#"{"completionReason":"somethingNew"}"#).unwrap();
            assert_eq!(outcome.completion_reason, CompletionReason::Other);
        }

        #[test]
        fn known_reason_uses_host_name() {
            let outcome: RecordingOutcome = serde_json::from_str(
                r#"{"completionReason":"completedStopToneDetected","lengthOfRecordingInSecs":2.0}"#,
            )
            .unwrap();
            assert_eq!(outcome.completion_reason, CompletionReason::StopToneDetected);
            assert_eq!(outcome.length_of_recording_in_secs, 2.0);
        }
    }
}
