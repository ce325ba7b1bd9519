//! Mock Speech Recognizer for testing.
//!
//! Returns queued transcripts or errors in order and records the audio of
//! every request. Once the queue is empty it answers with a fixed default
//! transcript.
//!
//! # Example
//!
//! ```ignore
//! let speech = MockSpeechRecognizer::new()
//!     .with_error(SpeechError::NoSpeech)
//!     .with_transcript("three");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::prompt::Transcript;
use crate::ports::{RecognitionOptions, SpeechError, SpeechRecognizer};

/// Transcript returned once the queue runs dry.
pub const DEFAULT_MOCK_TRANSCRIPT: &str = "mock transcript";

/// Mock speech recognizer. Clones share their queue and call history.
#[derive(Debug, Clone, Default)]
pub struct MockSpeechRecognizer {
    responses: Arc<Mutex<VecDeque<Result<Transcript, SpeechError>>>>,
    calls: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockSpeechRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful transcription.
    pub fn with_transcript(self, text: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(Transcript::new(text)));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: SpeechError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Number of recognition requests made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Audio of every request, in order.
    pub fn get_calls(&self) -> Vec<Vec<u8>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechRecognizer for MockSpeechRecognizer {
    async fn recognize(
        &self,
        audio: &[u8],
        _options: &RecognitionOptions,
    ) -> Result<Transcript, SpeechError> {
        self.calls.lock().unwrap().push(audio.to_vec());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Transcript::new(DEFAULT_MOCK_TRANSCRIPT)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let speech = MockSpeechRecognizer::new()
            .with_error(SpeechError::FalseRecognition)
            .with_transcript("two");
        let options = RecognitionOptions::default();

        assert_eq!(
            speech.recognize(&[1], &options).await,
            Err(SpeechError::FalseRecognition)
        );
        assert_eq!(speech.recognize(&[2], &options).await.unwrap().text, "two");
        assert_eq!(
            speech.recognize(&[3], &options).await.unwrap().text,
            DEFAULT_MOCK_TRANSCRIPT
        );
        assert_eq!(speech.get_calls(), vec![vec![1], vec![2], vec![3]]);
    }

    #[tokio::test]
    async fn clones_share_history() {
        let speech = MockSpeechRecognizer::new();
        let clone = speech.clone();

        clone
            .recognize(&[], &RecognitionOptions::default())
            .await
            .unwrap();

        assert_eq!(speech.call_count(), 1);
    }
}
