//! Intent Recognizer Adapters.
//!
//! - `LuisIntentRecognizer` - LUIS v2 prediction REST API
//! - `MockIntentRecognizer` - Configurable mock for testing

mod luis_recognizer;
mod mock_recognizer;

pub use luis_recognizer::{LuisConfig, LuisIntentRecognizer, DEFAULT_LUIS_ENDPOINT};
pub use mock_recognizer::{MockIntentRecognizer, DEFAULT_MOCK_INTENT};
