//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the prompt logic and the outside world. Adapters implement these ports.
//!
//! ## Host Ports
//!
//! - `CallSession` - The conversation host's per-call session
//! - `Dialog` - The flow unit the host installs and drives
//!
//! ## Cognitive Service Ports
//!
//! - `SpeechRecognizer` - Speech-to-text transcription
//! - `IntentRecognizer` - Intent classification of transcripts

mod call_session;
mod dialog;
mod intent_recognizer;
mod speech_recognizer;

pub use call_session::{CallSession, HostError};
pub use dialog::{Dialog, DialogError};
pub use intent_recognizer::{IntentError, IntentRecognizer};
pub use speech_recognizer::{RecognitionOptions, SpeechError, SpeechRecognizer};
