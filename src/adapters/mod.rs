//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the prompt logic to external systems:
//! - `speech` - Speech-to-text services (hosted REST API, mock)
//! - `intent` - Intent classification services (LUIS, mock)
//! - `host` - Conversation host doubles (in-memory session)

pub mod host;
pub mod intent;
pub mod speech;

pub use host::{InMemoryCallSession, NoopDialog};
pub use intent::{LuisConfig, LuisIntentRecognizer, MockIntentRecognizer};
pub use speech::{BingSpeechConfig, BingSpeechRecognizer, MockSpeechRecognizer};
