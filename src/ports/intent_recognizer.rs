//! Intent Recognizer Port - Interface for intent classification services.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::intent::LanguageResult;

/// Port for language-understanding services.
#[async_trait]
pub trait IntentRecognizer: Send + Sync {
    /// Classifies the intent of a transcript.
    async fn recognize(&self, text: &str) -> Result<LanguageResult, IntentError>;
}

/// Intent classification failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntentError {
    /// The service could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with an error.
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The service answered with something we could not read.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request took too long.
    #[error("Request timed out")]
    Timeout,
}
