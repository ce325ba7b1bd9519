//! Results flows hand back to whoever launched them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FlowError;

/// Key added to a response payload when an intent flow took over the prompt.
pub const INTERCEPTED_KEY: &str = "intercepted";

/// Why a flow returned control to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResumeReason {
    /// The flow produced a response.
    Completed,
    /// The flow gave up without a response.
    NotCompleted,
    /// The flow was canceled.
    Canceled,
}

/// Outcome of a flow, delivered to its parent frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowResult {
    pub resumed: ResumeReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FlowError>,
}

impl FlowResult {
    /// A completed result carrying a response.
    pub fn completed(response: Value) -> Self {
        Self {
            resumed: ResumeReason::Completed,
            response: Some(response),
            error: None,
        }
    }

    /// A not-completed result without an error (e.g. retries exhausted).
    pub fn not_completed() -> Self {
        Self {
            resumed: ResumeReason::NotCompleted,
            response: None,
            error: None,
        }
    }

    /// A not-completed result carrying an error.
    pub fn failed(error: FlowError) -> Self {
        Self {
            resumed: ResumeReason::NotCompleted,
            response: None,
            error: Some(error),
        }
    }

    /// A canceled result.
    pub fn canceled() -> Self {
        Self {
            resumed: ResumeReason::Canceled,
            response: None,
            error: None,
        }
    }

    /// Returns true when the flow completed with a response.
    pub fn is_completed(&self) -> bool {
        self.resumed == ResumeReason::Completed
    }

    /// Flags the response payload as produced by an intercepting flow.
    ///
    /// Object payloads gain `"intercepted": true`; a missing payload becomes
    /// an object holding only the flag. Scalar payloads are left as they are.
    pub fn mark_intercepted(&mut self) {
        match self.response.get_or_insert_with(|| Value::Object(Default::default())) {
            Value::Object(map) => {
                map.insert(INTERCEPTED_KEY.to_string(), Value::Bool(true));
            }
            other => {
                tracing::debug!(payload = %other, "Intercepted payload is not an object, leaving unmarked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn completed_result_carries_response() {
        let result = FlowResult::completed(json!({"choice": "one"}));
        assert!(result.is_completed());
        assert_eq!(result.response, Some(json!({"choice": "one"})));
        assert!(result.error.is_none());
    }

    #[test]
    fn not_completed_has_neither_response_nor_error() {
        let result = FlowResult::not_completed();
        assert_eq!(result.resumed, ResumeReason::NotCompleted);
        assert!(result.response.is_none());
        assert!(result.error.is_none());
    }

    #[test]
    fn failed_result_is_not_completed_with_error() {
        let result = FlowResult::failed(FlowError::temporary_failure());
        assert_eq!(result.resumed, ResumeReason::NotCompleted);
        assert!(result.error.is_some());
    }

    #[test]
    fn mark_intercepted_adds_flag_and_keeps_other_fields() {
        let mut result = FlowResult::completed(json!({"order": 42}));
        result.mark_intercepted();
        assert_eq!(result.response, Some(json!({"order": 42, "intercepted": true})));
    }

    #[test]
    fn mark_intercepted_creates_payload_when_missing() {
        let mut result = FlowResult::canceled();
        result.mark_intercepted();
        assert_eq!(result.response, Some(json!({"intercepted": true})));
        assert_eq!(result.resumed, ResumeReason::Canceled);
    }

    #[test]
    fn mark_intercepted_leaves_scalar_payload_alone() {
        let mut result = FlowResult::completed(json!("done"));
        result.mark_intercepted();
        assert_eq!(result.response, Some(json!("done")));
    }

    #[test]
    fn resume_reason_serializes_camel_case() {
        let json = serde_json::to_string(&ResumeReason::NotCompleted).unwrap();
        assert_eq!(json, "\"notCompleted\"");
    }
}
