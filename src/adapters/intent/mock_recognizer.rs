//! Mock Intent Recognizer for testing.
//!
//! Returns queued classifications or errors in order and records every
//! query. Once the queue is empty it classifies everything as `None`.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::intent::{IntentMatch, LanguageResult};
use crate::ports::{IntentError, IntentRecognizer};

/// Intent returned once the queue runs dry.
pub const DEFAULT_MOCK_INTENT: &str = "None";

#[derive(Debug, Clone)]
enum MockClassification {
    Intent { name: String, score: f64 },
    Error(IntentError),
}

/// Mock intent recognizer. Clones share their queue and call history.
#[derive(Debug, Clone, Default)]
pub struct MockIntentRecognizer {
    responses: Arc<Mutex<VecDeque<MockClassification>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockIntentRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a classification whose top intent is `name`.
    pub fn with_intent(self, name: impl Into<String>, score: f64) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockClassification::Intent {
                name: name.into(),
                score,
            });
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: IntentError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockClassification::Error(error));
        self
    }

    /// Number of classification requests made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Every query, in order.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IntentRecognizer for MockIntentRecognizer {
    async fn recognize(&self, text: &str) -> Result<LanguageResult, IntentError> {
        self.calls.lock().unwrap().push(text.to_string());

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockClassification::Intent { name, score }) => {
                Ok(LanguageResult::new(text, IntentMatch::new(name, score)))
            }
            Some(MockClassification::Error(err)) => Err(err),
            None => Ok(LanguageResult::new(
                text,
                IntentMatch::new(DEFAULT_MOCK_INTENT, 0.0),
            )),
        }
    }
}
