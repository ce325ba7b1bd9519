//! Entry points that start a speech prompt on a call.
//!
//! Each pushes a `Speech:Prompts` frame; the orchestrator must already be
//! installed in the session (see `SpeechPromptDialog::install`). The
//! parent flow receives the outcome through its own `resumed` callback.

use crate::domain::foundation::FlowRef;
use crate::domain::prompt::{
    expand_choice_variants, Choice, PlayPrompt, PromptRequest, PromptType, RecordAction,
    RecordPromptOptions, DEFAULT_MAX_RETRIES,
};
use crate::ports::{CallSession, DialogError};

/// Records the caller and transcribes what they said.
pub async fn recognize_speech(
    session: &dyn CallSession,
    prompt: impl Into<PlayPrompt>,
    options: RecordPromptOptions,
) -> Result<(), DialogError> {
    let action = RecordAction::recognize_speech(prompt.into());
    launch(session, request(PromptType::SpeechToText, action, options)).await
}

/// Records the caller, transcribes, and classifies the intent.
pub async fn understand_speech(
    session: &dyn CallSession,
    prompt: impl Into<PlayPrompt>,
    options: RecordPromptOptions,
) -> Result<(), DialogError> {
    let action = RecordAction::understand_speech(prompt.into());
    launch(session, request(PromptType::Understanding, action, options)).await
}

/// Like `understand_speech`, and also picks one of `choices` from the answer.
///
/// Every choice also accepts its zero-based ordinal and its lowercased name.
pub async fn understand_choice(
    session: &dyn CallSession,
    prompt: impl Into<PlayPrompt>,
    options: RecordPromptOptions,
    mut choices: Vec<Choice>,
) -> Result<(), DialogError> {
    expand_choice_variants(&mut choices);
    let action = RecordAction::understand_speech(prompt.into());
    let request = request(PromptType::UnderstandingChoice, action, options).with_choices(choices);
    launch(session, request).await
}

fn request(
    prompt_type: PromptType,
    action: RecordAction,
    options: RecordPromptOptions,
) -> PromptRequest {
    let max_retries = options.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
    PromptRequest::new(prompt_type, action.with_options(options.record), max_retries)
}

async fn launch(session: &dyn CallSession, request: PromptRequest) -> Result<(), DialogError> {
    tracing::debug!(
        call_id = %session.call_id(),
        prompt_type = ?request.prompt_type,
        retries_left = request.max_retries,
        "Launching speech prompt"
    );
    let args = serde_json::to_value(&request)?;
    session.begin_flow(&FlowRef::SpeechPrompts, args).await?;
    Ok(())
}
