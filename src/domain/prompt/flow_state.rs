//! Durable per-flow state of a speech prompt.
//!
//! The host persists this between lifecycle calls. `pending` records why the
//! flow is suspended, which is how a resumption is routed back to the right
//! continuation.

use serde::{Deserialize, Serialize};

use super::request::PromptRequest;
use super::response::PromptResponse;
use crate::domain::foundation::FlowId;

/// Which kind of intent matcher fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterceptKind {
    /// Start the matched flow on top of this one.
    Trigger,
    /// Unwind the matched flow's frame from the call stack.
    Cancel,
}

/// What a suspended prompt is waiting for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suspension {
    /// A prompt was sent; the host will deliver the recording.
    AwaitingRecording,
    /// The caller was asked to confirm an interception.
    ///
    /// Holds the pass that triggered it so the pass can be replayed once the
    /// answer arrives.
    AwaitingConfirmation {
        flow: FlowId,
        intercept: InterceptKind,
        response: PromptResponse,
    },
    /// Control was handed to an intent flow.
    AwaitingChild { flow: FlowId },
}

/// State stored in the host's per-flow data slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFlowState {
    pub request: PromptRequest,
    /// The caller's answer to the last confirmation, if one was asked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
    pub pending: Suspension,
}

impl PromptFlowState {
    /// State for a freshly started prompt.
    pub fn new(request: PromptRequest) -> Self {
        Self {
            request,
            confirmed: None,
            pending: Suspension::AwaitingRecording,
        }
    }

    /// Interception is allowed until the caller explicitly declines it.
    pub fn can_match(&self) -> bool {
        self.confirmed != Some(false)
    }

    /// Returns true if an interception still needs the caller's go-ahead.
    pub fn needs_confirmation(&self) -> bool {
        self.confirmed.is_none()
    }
}
