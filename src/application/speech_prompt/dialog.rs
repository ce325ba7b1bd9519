//! SpeechPromptDialog - Records, transcribes and understands a caller's answer.
//!
//! One pass of the pipeline runs per recording the host delivers:
//!
//! 1. Outcome classification (`receive_record_outcome`)
//! 2. Transcription through the `SpeechRecognizer` port
//! 3. Intent classification through the `IntentRecognizer` port, for
//!    understanding prompts only
//! 4. Routing: interception, choice selection, then finalization
//!
//! Any stage that leaves the `completed` state skips straight to routing.
//! Adapter failures never escape; they become retry prompts.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::foundation::{FlowError, FlowRef, FlowResult, ValidationError};
use crate::domain::intent::IntentRegistry;
use crate::domain::prompt::{
    normalize_transcript, receive_record_outcome, select_choice, OperationResult, OutboundMessage,
    PlayPrompt, PromptFlowState, PromptRequest, ResponseState, RetryPrompts, Suspension,
};
use crate::ports::{
    CallSession, Dialog, DialogError, IntentRecognizer, RecognitionOptions, SpeechError,
    SpeechRecognizer,
};

/// The prompt orchestrator installed under `Speech:Prompts`.
pub struct SpeechPromptDialog {
    speech: Arc<dyn SpeechRecognizer>,
    intents: Arc<dyn IntentRecognizer>,
    pub(super) registry: Arc<IntentRegistry>,
    prompts: RetryPrompts,
    recognition: RecognitionOptions,
}

impl SpeechPromptDialog {
    pub fn new(
        speech: Arc<dyn SpeechRecognizer>,
        intents: Arc<dyn IntentRecognizer>,
        registry: Arc<IntentRegistry>,
    ) -> Self {
        Self {
            speech,
            intents,
            registry,
            prompts: RetryPrompts::default(),
            recognition: RecognitionOptions::default(),
        }
    }

    /// Overrides the texts played before a prompt is repeated.
    pub fn with_retry_prompts(mut self, prompts: RetryPrompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Options passed to every transcription request.
    pub fn with_recognition_options(mut self, options: RecognitionOptions) -> Self {
        self.recognition = options;
        self
    }

    pub fn retry_prompts(&self) -> &RetryPrompts {
        &self.prompts
    }

    /// Exposes this orchestrator in the session's namespace under `Speech:Prompts`.
    ///
    /// Does nothing if a flow is already installed there.
    pub fn install(self: &Arc<Self>, session: &dyn CallSession) {
        if !session.has_flow(&FlowRef::SpeechPrompts) {
            session.install_flow(FlowRef::SpeechPrompts, Arc::clone(self) as Arc<dyn Dialog>);
        }
    }

    /// Runs stages 2 and 3 on a pass that is still `completed`.
    async fn recognize(
        &self,
        request: &PromptRequest,
        result: &mut OperationResult,
    ) -> Result<(), ValidationError> {
        if !result.is_completed() {
            return Ok(());
        }

        match self
            .speech
            .recognize(&result.response.recorded_audio, &self.recognition)
            .await
        {
            Ok(transcript) => {
                tracing::debug!(
                    text = %transcript.text,
                    confidence = ?transcript.confidence,
                    "Transcribed recording"
                );
                result.response.speech = Some(transcript);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Speech recognition failed");
                let prompt = match err {
                    SpeechError::NoSpeech => &self.prompts.record_silence,
                    SpeechError::FalseRecognition => &self.prompts.invalid_recognize,
                    _ => &self.prompts.invalid_recording,
                };
                return result.retry(prompt.clone());
            }
        }

        if !request.prompt_type.requires_understanding() {
            return Ok(());
        }

        let text = result.response.transcript_text().unwrap_or_default().to_string();
        match self.intents.recognize(&text).await {
            Ok(language) => {
                tracing::debug!(
                    intent = %language.top_scoring_intent.name,
                    score = language.top_scoring_intent.score,
                    "Classified transcript"
                );
                result.response.language = Some(language);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Intent classification failed");
                result.retry(self.prompts.invalid_recognize.clone())
            }
        }
    }

    /// Routes a finished pass until it reaches a decision.
    ///
    /// A failed choice match turns the pass into a retry and routes again.
    pub(super) async fn route(
        &self,
        session: &dyn CallSession,
        mut state: PromptFlowState,
        mut result: OperationResult,
    ) -> Result<(), DialogError> {
        loop {
            tracing::debug!(
                call_id = %session.call_id(),
                state = ?result.state(),
                retries_left = state.request.max_retries,
                "Routing prompt response"
            );

            match result.state() {
                ResponseState::Canceled => {
                    session.end_flow_with_result(FlowResult::canceled()).await?;
                }
                ResponseState::Completed => {
                    if self.intercept(session, &mut state, &result).await? {
                        return Ok(());
                    }

                    if state.request.prompt_type.selects_choice() {
                        let spoken = result.response.transcript_text().unwrap_or_default();
                        match select_choice(spoken, &state.request.choices) {
                            Some(choice) => result.response.choice = Some(choice.clone()),
                            None => {
                                let prompt =
                                    self.prompts.invalid_choice_for(&normalize_transcript(spoken));
                                tracing::debug!(spoken = %spoken, "Answer matched no choice");
                                result.retry(prompt)?;
                                continue;
                            }
                        }
                    }

                    tracing::info!(call_id = %session.call_id(), "Prompt completed");
                    let response = serde_json::to_value(&result.response)?;
                    session.end_flow_with_result(FlowResult::completed(response)).await?;
                }
                ResponseState::Failed => {
                    tracing::info!(call_id = %session.call_id(), "Prompt failed");
                    session
                        .end_flow_with_result(FlowResult::failed(FlowError::temporary_failure()))
                        .await?;
                }
                ResponseState::Retry => {
                    if state.request.consume_retry() {
                        let prompt = result.retry_prompt().unwrap_or_default();
                        state.pending = Suspension::AwaitingRecording;
                        save_state(session, &state)?;
                        session.send(OutboundMessage::Prompt(PlayPrompt::text(prompt))).await?;
                        session
                            .send(OutboundMessage::Record(state.request.action.clone()))
                            .await?;
                        session.send_batch().await?;
                    } else {
                        tracing::info!(call_id = %session.call_id(), "Retries exhausted");
                        session.end_flow_with_result(FlowResult::not_completed()).await?;
                    }
                }
                ResponseState::Terminated => {
                    tracing::info!(call_id = %session.call_id(), "Caller hung up");
                    session.end_call().await?;
                }
            }

            return Ok(());
        }
    }
}

pub(super) fn load_state(session: &dyn CallSession) -> Result<PromptFlowState, DialogError> {
    let data = session.dialog_data().ok_or(DialogError::MissingState)?;
    Ok(serde_json::from_value(data)?)
}

pub(super) fn save_state(
    session: &dyn CallSession,
    state: &PromptFlowState,
) -> Result<(), DialogError> {
    session.set_dialog_data(serde_json::to_value(state)?);
    Ok(())
}

#[async_trait]
impl Dialog for SpeechPromptDialog {
    async fn begin(&self, session: &dyn CallSession, args: Value) -> Result<(), DialogError> {
        let request: PromptRequest = serde_json::from_value(args)?;
        tracing::debug!(
            call_id = %session.call_id(),
            prompt_type = ?request.prompt_type,
            retries_left = request.max_retries,
            "Starting speech prompt"
        );

        let action = request.action.clone();
        save_state(session, &PromptFlowState::new(request))?;
        session.send(OutboundMessage::Record(action)).await?;
        session.send_batch().await?;
        Ok(())
    }

    async fn reply_received(&self, session: &dyn CallSession) -> Result<(), DialogError> {
        let mut state = load_state(session)?;
        state.pending = Suspension::AwaitingRecording;

        let message = session.message();
        let Some(outcome) = message.as_ref().and_then(|m| m.operation_outcome.as_ref()) else {
            tracing::warn!(call_id = %session.call_id(), "Reply carried no recording outcome");
            session
                .end_flow_with_result(FlowResult::failed(FlowError::missing_outcome()))
                .await?;
            return Ok(());
        };

        let audio = message.as_ref().and_then(|m| m.recorded_audio.as_deref());
        let mut result = receive_record_outcome(outcome, audio, &self.prompts)?;
        tracing::debug!(
            reason = ?outcome.completion_reason,
            state = ?result.state(),
            "Classified recording outcome"
        );

        self.recognize(&state.request, &mut result).await?;
        self.route(session, state, result).await
    }

    /// Handles the end of an intent flow or of a confirmation question.
    ///
    /// An intent flow's result is passed up as the prompt's result, flagged
    /// with `"intercepted": true`. The flag is only added to object or
    /// missing payloads; a scalar payload (a bare string, number or bool) is
    /// passed up unmarked, so parents cannot rely on the flag being present.
    async fn resumed(&self, session: &dyn CallSession, result: FlowResult) -> Result<(), DialogError> {
        if let Some(error) = &result.error {
            tracing::warn!(call_id = %session.call_id(), error = %error, "Child flow failed");
            session.error(error.clone()).await?;
            return Ok(());
        }

        let mut state = load_state(session)?;
        match std::mem::replace(&mut state.pending, Suspension::AwaitingRecording) {
            Suspension::AwaitingChild { flow } => {
                tracing::info!(flow = %FlowRef::Intent(flow), "Intent flow returned");
                let mut result = result;
                result.mark_intercepted();
                session.end_flow_with_result(result).await?;
                Ok(())
            }
            Suspension::AwaitingConfirmation { flow, response, .. } => {
                let confirmed = result.response.as_ref().and_then(Value::as_bool).unwrap_or(false);
                tracing::info!(flow = %FlowRef::Intent(flow), confirmed, "Interception answered");
                state.confirmed = Some(confirmed);
                save_state(session, &state)?;
                self.route(session, state, OperationResult::resume(response)).await
            }
            Suspension::AwaitingRecording => {
                tracing::warn!(
                    call_id = %session.call_id(),
                    resumed = ?result.resumed,
                    "Unexpected resumption, starting pass over"
                );
                self.reply_received(session).await
            }
        }
    }
}
