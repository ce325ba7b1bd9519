//! Intent interception of a completed pass.
//!
//! A trigger match starts the matched flow on top of the prompt. A cancel
//! match unwinds the call stack to the frame below the matched flow's
//! frame. Either can first require the caller to confirm.
//!
//! Once the caller rejects a confirmation, interception stays off for the
//! rest of the prompt.

use crate::domain::intent::{IntentMatcher, RegisteredFlow};
use crate::domain::prompt::{
    InterceptKind, OperationResult, PromptFlowState, PromptResponse, Suspension,
};
use crate::ports::{CallSession, DialogError};

use super::dialog::{save_state, SpeechPromptDialog};

impl SpeechPromptDialog {
    /// Hands the pass to a matching intent flow.
    ///
    /// Returns true if control left the prompt, in which case the caller
    /// must not finalize.
    pub(super) async fn intercept(
        &self,
        session: &dyn CallSession,
        state: &mut PromptFlowState,
        result: &OperationResult,
    ) -> Result<bool, DialogError> {
        let Some(language) = &result.response.language else {
            return Ok(false);
        };
        if !state.can_match() {
            tracing::debug!(call_id = %session.call_id(), "Interception declined earlier, skipping");
            return Ok(false);
        }

        let intent = Some(&language.top_scoring_intent);
        if let Some(flow) = self.registry.find_trigger(session, intent) {
            self.trigger(session, state, &flow, &result.response).await?;
            return Ok(true);
        }
        if let Some(flow) = self.registry.find_cancel(session, intent) {
            return self.cancel(session, state, &flow, &result.response).await;
        }
        Ok(false)
    }

    async fn trigger(
        &self,
        session: &dyn CallSession,
        state: &mut PromptFlowState,
        flow: &RegisteredFlow,
        response: &PromptResponse,
    ) -> Result<(), DialogError> {
        let kind = InterceptKind::Trigger;
        if confirm_first(session, state, flow, flow.trigger(), kind, response).await? {
            return Ok(());
        }

        tracing::info!(
            call_id = %session.call_id(),
            flow = %flow.flow_ref(),
            "Intent triggered flow"
        );
        state.pending = Suspension::AwaitingChild { flow: flow.id() };
        save_state(session, state)?;
        session
            .begin_flow(&flow.flow_ref(), serde_json::to_value(response)?)
            .await?;
        Ok(())
    }

    async fn cancel(
        &self,
        session: &dyn CallSession,
        state: &mut PromptFlowState,
        flow: &RegisteredFlow,
        response: &PromptResponse,
    ) -> Result<bool, DialogError> {
        let stack = session.call_stack();
        let target = flow.flow_ref();

        let Some(position) = stack.iter().position(|frame| *frame == target) else {
            tracing::debug!(flow = %target, "Cancelled flow is not active");
            return Ok(false);
        };
        let Some(return_to) = position.checked_sub(1).and_then(|below| stack.get(below)) else {
            tracing::debug!(flow = %target, "Cancelled flow has no parent frame");
            return Ok(false);
        };

        let kind = InterceptKind::Cancel;
        if confirm_first(session, state, flow, flow.cancel(), kind, response).await? {
            return Ok(true);
        }

        tracing::info!(
            call_id = %session.call_id(),
            flow = %target,
            return_to = %return_to,
            "Intent cancelled flow"
        );
        session.replace_active_flow(return_to).await?;
        Ok(true)
    }
}

/// Asks the matcher's confirmation question if one is due.
async fn confirm_first(
    session: &dyn CallSession,
    state: &mut PromptFlowState,
    flow: &RegisteredFlow,
    matcher: Option<&IntentMatcher>,
    intercept: InterceptKind,
    response: &PromptResponse,
) -> Result<bool, DialogError> {
    let Some(prompt) = matcher.and_then(|m| m.confirm_prompt.as_deref()) else {
        return Ok(false);
    };
    if !state.needs_confirmation() {
        return Ok(false);
    }

    tracing::info!(flow = %flow.flow_ref(), ?intercept, "Confirming interception");
    state.pending = Suspension::AwaitingConfirmation {
        flow: flow.id(),
        intercept,
        response: response.clone(),
    };
    save_state(session, state)?;
    session.confirm(prompt).await?;
    Ok(true)
}
