//! Speech Recognizer Adapters.
//!
//! - `BingSpeechRecognizer` - Hosted speech-to-text REST API
//! - `MockSpeechRecognizer` - Configurable mock for testing

mod bing_recognizer;
mod mock_recognizer;

pub use bing_recognizer::{BingSpeechConfig, BingSpeechRecognizer, DEFAULT_SPEECH_ENDPOINT};
pub use mock_recognizer::{MockSpeechRecognizer, DEFAULT_MOCK_TRANSCRIPT};
