//! In-memory conversation host for testing.
//!
//! Records everything a flow asks of the host and models the call stack
//! just far enough for stack-aware logic to be exercised: `begin_flow`
//! pushes a frame, ending a flow pops one, and `replace_active_flow`
//! unwinds to the requested frame. Nothing is dispatched to the flows
//! themselves; tests drive lifecycle calls explicitly.
//!
//! # Panics
//!
//! Methods panic if the internal lock is poisoned. This adapter should NOT
//! be used in production.
//!
//! # Example
//!
//! ```ignore
//! let session = InMemoryCallSession::new()
//!     .with_stack(vec![FlowRef::named("menu"), FlowRef::SpeechPrompts]);
//!
//! dialog.begin(&session, args).await?;
//! session.set_message(reply);
//! dialog.reply_received(&session).await?;
//!
//! assert!(session.last_result().unwrap().is_completed());
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, RwLock};

use crate::domain::foundation::{CallId, FlowError, FlowRef, FlowResult};
use crate::domain::prompt::{ConversationReply, OutboundMessage};
use crate::ports::{CallSession, Dialog, HostError};

#[derive(Default)]
struct Recorded {
    message: Option<ConversationReply>,
    dialog_data: Option<Value>,
    pending: Vec<OutboundMessage>,
    batches: Vec<Vec<OutboundMessage>>,
    begun: Vec<(FlowRef, Value)>,
    results: Vec<FlowResult>,
    confirms: Vec<String>,
    errors: Vec<FlowError>,
    replaced: Vec<FlowRef>,
    call_ended: bool,
    stack: Vec<FlowRef>,
    installed: Vec<(FlowRef, Arc<dyn Dialog>)>,
    install_count: usize,
    disconnected: bool,
}

/// Recording `CallSession` double.
pub struct InMemoryCallSession {
    call_id: CallId,
    state: RwLock<Recorded>,
}

impl Default for InMemoryCallSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCallSession {
    /// Creates a session with an empty stack.
    pub fn new() -> Self {
        Self {
            call_id: CallId::new(),
            state: RwLock::new(Recorded::default()),
        }
    }

    /// Seeds the call stack, bottom first.
    pub fn with_stack(self, stack: Vec<FlowRef>) -> Self {
        self.write().stack = stack;
        self
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Recorded> {
        self.state
            .read()
            .expect("InMemoryCallSession: lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Recorded> {
        self.state
            .write()
            .expect("InMemoryCallSession: lock poisoned")
    }

    fn ensure_connected(&self) -> Result<(), HostError> {
        if self.read().disconnected {
            return Err(HostError::Disconnected);
        }
        Ok(())
    }

    // === Test Helpers ===

    /// Sets the reply the next lifecycle call will see.
    pub fn set_message(&self, reply: ConversationReply) {
        self.write().message = Some(reply);
    }

    /// Makes every subsequent host operation fail with `Disconnected`.
    pub fn disconnect(&self) {
        self.write().disconnected = true;
    }

    /// Flushed batches, oldest first.
    pub fn sent_batches(&self) -> Vec<Vec<OutboundMessage>> {
        self.read().batches.clone()
    }

    /// Flows started with `begin_flow` and their arguments.
    pub fn begun_flows(&self) -> Vec<(FlowRef, Value)> {
        self.read().begun.clone()
    }

    /// Results flows ended with, oldest first.
    pub fn results(&self) -> Vec<FlowResult> {
        self.read().results.clone()
    }

    /// The most recent result a flow ended with.
    pub fn last_result(&self) -> Option<FlowResult> {
        self.read().results.last().cloned()
    }

    /// Confirmation questions asked.
    pub fn confirms(&self) -> Vec<String> {
        self.read().confirms.clone()
    }

    /// Errors passed to parent flows.
    pub fn errors(&self) -> Vec<FlowError> {
        self.read().errors.clone()
    }

    /// Targets of `replace_active_flow`.
    pub fn replaced_flows(&self) -> Vec<FlowRef> {
        self.read().replaced.clone()
    }

    /// Returns true once the call was hung up.
    pub fn call_ended(&self) -> bool {
        self.read().call_ended
    }

    /// References installed in the namespace, in installation order.
    pub fn installed_flows(&self) -> Vec<FlowRef> {
        self.read().installed.iter().map(|(r, _)| r.clone()).collect()
    }

    /// Number of `install_flow` calls.
    pub fn install_count(&self) -> usize {
        self.read().install_count
    }

    /// The flow installed under `flow`.
    pub fn installed_dialog(&self, flow: &FlowRef) -> Option<Arc<dyn Dialog>> {
        self.read()
            .installed
            .iter()
            .find(|(r, _)| r == flow)
            .map(|(_, d)| Arc::clone(d))
    }
}

#[async_trait]
impl CallSession for InMemoryCallSession {
    fn call_id(&self) -> CallId {
        self.call_id
    }

    fn message(&self) -> Option<ConversationReply> {
        self.read().message.clone()
    }

    fn dialog_data(&self) -> Option<Value> {
        self.read().dialog_data.clone()
    }

    fn set_dialog_data(&self, data: Value) {
        self.write().dialog_data = Some(data);
    }

    fn call_stack(&self) -> Vec<FlowRef> {
        self.read().stack.clone()
    }

    fn has_flow(&self, flow: &FlowRef) -> bool {
        self.read().installed.iter().any(|(r, _)| r == flow)
    }

    fn install_flow(&self, flow: FlowRef, dialog: Arc<dyn Dialog>) {
        let mut state = self.write();
        state.installed.retain(|(r, _)| *r != flow);
        state.installed.push((flow, dialog));
        state.install_count += 1;
    }

    async fn send(&self, message: OutboundMessage) -> Result<(), HostError> {
        self.ensure_connected()?;
        self.write().pending.push(message);
        Ok(())
    }

    async fn send_batch(&self) -> Result<(), HostError> {
        self.ensure_connected()?;
        let mut state = self.write();
        let batch = std::mem::take(&mut state.pending);
        state.batches.push(batch);
        Ok(())
    }

    async fn begin_flow(&self, flow: &FlowRef, args: Value) -> Result<(), HostError> {
        self.ensure_connected()?;
        let mut state = self.write();
        state.stack.push(flow.clone());
        state.begun.push((flow.clone(), args));
        Ok(())
    }

    async fn confirm(&self, prompt: &str) -> Result<(), HostError> {
        self.ensure_connected()?;
        self.write().confirms.push(prompt.to_string());
        Ok(())
    }

    async fn end_flow_with_result(&self, result: FlowResult) -> Result<(), HostError> {
        self.ensure_connected()?;
        let mut state = self.write();
        state.stack.pop();
        state.results.push(result);
        Ok(())
    }

    async fn end_call(&self) -> Result<(), HostError> {
        self.ensure_connected()?;
        let mut state = self.write();
        state.stack.clear();
        state.call_ended = true;
        Ok(())
    }

    async fn replace_active_flow(&self, flow: &FlowRef) -> Result<(), HostError> {
        self.ensure_connected()?;
        let mut state = self.write();
        let position = state
            .stack
            .iter()
            .position(|frame| frame == flow)
            .ok_or_else(|| HostError::UnknownFlow(flow.clone()))?;
        state.stack.truncate(position + 1);
        state.replaced.push(flow.clone());
        Ok(())
    }

    async fn error(&self, error: FlowError) -> Result<(), HostError> {
        self.ensure_connected()?;
        let mut state = self.write();
        state.stack.pop();
        state.errors.push(error);
        Ok(())
    }
}
