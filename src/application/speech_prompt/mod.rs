//! Speech prompt orchestration.
//!
//! - `dialog` - The resumable prompt flow and its record/transcribe/classify pipeline
//! - `interception` - Handing a completed pass to trigger and cancel flows
//! - `launch` - Entry points that start a prompt in one of three modes

mod dialog;
mod interception;
mod launch;

pub use dialog::SpeechPromptDialog;
pub use launch::{recognize_speech, understand_choice, understand_speech};
