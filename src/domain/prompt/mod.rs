//! Speech prompt domain.
//!
//! Types and pure logic behind a prompt pass: the request and its record
//! action, recording outcomes and how they are classified, the per-pass
//! working result, choice selection, and the durable flow state.

mod action;
mod choice;
mod flow_state;
mod recording;
mod request;
mod response;
mod retry_prompts;

pub use action::{OutboundMessage, PlayPrompt, RecordAction, RecordOptions, RecordPromptOptions};
pub use choice::{expand_choice_variants, normalize_transcript, select_choice};
pub use flow_state::{InterceptKind, PromptFlowState, Suspension};
pub use recording::{receive_record_outcome, CompletionReason, ConversationReply, RecordingOutcome};
pub use request::{Choice, PromptRequest, PromptType, DEFAULT_MAX_RETRIES};
pub use response::{OperationResult, PromptResponse, ResponseState, Transcript};
pub use retry_prompts::{RetryPrompts, CHOICE_PLACEHOLDER};
