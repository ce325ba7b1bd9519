//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, flow results, error types and the state machine
//! trait that form the vocabulary of the speech prompt domain.

mod errors;
mod flow_result;
mod ids;
mod state_machine;

pub use errors::{ErrorCode, FlowError, ValidationError};
pub use flow_result::{FlowResult, ResumeReason, INTERCEPTED_KEY};
pub use ids::{CallId, FlowId, FlowRef, INTENT_LIBRARY_NAME, SPEECH_LIBRARY_NAME};
pub use state_machine::StateMachine;
