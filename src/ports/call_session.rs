//! Call Session Port - Interface to the conversation host.
//!
//! The host owns the call, the dialog call stack and message delivery. A
//! flow sees the host only through this port: it reads the reply that woke
//! it, reads and writes its own durable data slot, queues outbound messages,
//! and asks the host to start, end or replace frames.
//!
//! # Design
//!
//! - Reads (`message`, `dialog_data`, `call_stack`) are synchronous; the host
//!   already holds them in memory when it invokes a flow
//! - Everything that talks to the call or moves the stack is async and
//!   failable with `HostError`
//! - The namespace methods (`has_flow`, `install_flow`) let libraries install
//!   flows lazily under a `FlowRef`

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::Dialog;
use crate::domain::foundation::{CallId, FlowError, FlowRef, FlowResult};
use crate::domain::prompt::{ConversationReply, OutboundMessage};

/// Errors raised by the conversation host.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    /// The call is gone; nothing more can be sent.
    #[error("Call disconnected")]
    Disconnected,

    /// The host refused the operation.
    #[error("Host rejected operation: {0}")]
    Rejected(String),

    /// No flow is installed under the requested reference.
    #[error("Unknown flow: {0}")]
    UnknownFlow(FlowRef),

    /// The host failed internally.
    #[error("Host error: {0}")]
    Internal(String),
}

/// Port for the conversation host's per-call session.
#[async_trait]
pub trait CallSession: Send + Sync {
    /// Identifier of the call this session belongs to.
    fn call_id(&self) -> CallId;

    /// Reply that triggered the current lifecycle call, if any.
    fn message(&self) -> Option<ConversationReply>;

    /// Durable data of the active frame.
    fn dialog_data(&self) -> Option<Value>;

    /// Replaces the durable data of the active frame.
    fn set_dialog_data(&self, data: Value);

    /// Active frames, bottom of the stack first.
    fn call_stack(&self) -> Vec<FlowRef>;

    /// Returns true if a flow is installed under `flow`.
    fn has_flow(&self, flow: &FlowRef) -> bool;

    /// Installs a flow under `flow`, replacing any previous one.
    fn install_flow(&self, flow: FlowRef, dialog: Arc<dyn Dialog>);

    /// Queues a message on the outbound batch.
    async fn send(&self, message: OutboundMessage) -> Result<(), HostError>;

    /// Flushes the outbound batch to the caller.
    async fn send_batch(&self) -> Result<(), HostError>;

    /// Pushes a new frame running `flow` with the given arguments.
    async fn begin_flow(&self, flow: &FlowRef, args: Value) -> Result<(), HostError>;

    /// Starts the host's built-in yes/no prompt as a child frame.
    ///
    /// The answer arrives through `Dialog::resumed` as a boolean response.
    async fn confirm(&self, prompt: &str) -> Result<(), HostError>;

    /// Pops the active frame and resumes its parent with `result`.
    async fn end_flow_with_result(&self, result: FlowResult) -> Result<(), HostError>;

    /// Hangs up the call.
    async fn end_call(&self) -> Result<(), HostError>;

    /// Unwinds the stack so `flow`'s frame becomes the active one.
    async fn replace_active_flow(&self, flow: &FlowRef) -> Result<(), HostError>;

    /// Pops the active frame and passes `error` to its parent.
    async fn error(&self, error: FlowError) -> Result<(), HostError>;
}
