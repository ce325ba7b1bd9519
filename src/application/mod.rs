//! Application layer - Flows that coordinate the domain and the ports.
//!
//! The speech prompt orchestrator lives here. It owns no I/O of its own;
//! everything it does to the call goes through `CallSession`, and every
//! service it consults sits behind a port.

pub mod speech_prompt;

pub use speech_prompt::{
    recognize_speech, understand_choice, understand_speech, SpeechPromptDialog,
};
