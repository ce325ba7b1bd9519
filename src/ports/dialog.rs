//! Dialog Port - The installable flow unit the host drives.
//!
//! The host calls `begin` when a frame for the flow is pushed,
//! `reply_received` when the caller's reply to something the flow sent
//! arrives, and `resumed` when a child frame the flow started ends.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::{CallSession, HostError};
use crate::domain::foundation::{FlowResult, ValidationError};

/// Errors a flow can raise from a lifecycle call.
#[derive(Debug, Error)]
pub enum DialogError {
    /// The host failed while the flow was talking to it.
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Arguments or durable state could not be (de)serialized.
    #[error("Invalid flow state: {0}")]
    State(#[from] serde_json::Error),

    /// The flow was woken without any durable state.
    #[error("Flow state missing; was begin called?")]
    MissingState,

    /// A state transition the flow's state machine forbids.
    #[error("Invalid transition: {0}")]
    InvalidTransition(#[from] ValidationError),
}

/// Port implemented by every flow the host can run.
#[async_trait]
pub trait Dialog: Send + Sync {
    /// Called when a frame for this flow is pushed.
    async fn begin(&self, session: &dyn CallSession, args: Value) -> Result<(), DialogError>;

    /// Called when the caller's reply arrives.
    async fn reply_received(&self, session: &dyn CallSession) -> Result<(), DialogError>;

    /// Called when a child frame started by this flow ends.
    async fn resumed(&self, session: &dyn CallSession, result: FlowResult) -> Result<(), DialogError>;
}
