//! LUIS Intent Recognizer - IntentRecognizer over the LUIS v2 REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = LuisConfig::new(app_id, subscription_key)
//!     .with_endpoint("https://westeurope.api.cognitive.microsoft.com");
//!
//! let recognizer = LuisIntentRecognizer::new(config);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::config::{IntentConfig, ValidationError};
use crate::domain::intent::{IntentMatch, LanguageResult};
use crate::ports::{IntentError, IntentRecognizer};

/// Regional endpoint used when none is configured.
pub const DEFAULT_LUIS_ENDPOINT: &str = "https://westus.api.cognitive.microsoft.com";

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Configuration for the LUIS recognizer.
#[derive(Debug, Clone)]
pub struct LuisConfig {
    /// Application to query.
    pub app_id: String,
    subscription_key: Secret<String>,
    /// Regional endpoint, without the `/luis/...` path.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl LuisConfig {
    /// Creates a configuration for the given application.
    pub fn new(app_id: impl Into<String>, subscription_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            subscription_key: Secret::new(subscription_key.into()),
            endpoint: DEFAULT_LUIS_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Builds the adapter configuration from the loaded settings.
    pub fn from_settings(settings: &IntentConfig) -> Result<Self, ValidationError> {
        let app_id = settings
            .app_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::MissingRequired("INTENT__APP_ID"))?;
        let key = settings
            .subscription_key()
            .ok_or(ValidationError::MissingRequired("INTENT__SUBSCRIPTION_KEY"))?;
        Ok(Self::new(app_id, key)
            .with_endpoint(settings.endpoint.clone())
            .with_timeout(settings.timeout()))
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn subscription_key(&self) -> &str {
        self.subscription_key.expose_secret()
    }
}

/// Intent recognizer backed by a published LUIS application.
pub struct LuisIntentRecognizer {
    config: LuisConfig,
    client: Client,
}

impl LuisIntentRecognizer {
    pub fn new(config: LuisConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the prediction URL for the configured application.
    fn prediction_url(&self) -> String {
        format!(
            "{}/luis/v2.0/apps/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.app_id
        )
    }
}

#[async_trait]
impl IntentRecognizer for LuisIntentRecognizer {
    async fn recognize(&self, text: &str) -> Result<LanguageResult, IntentError> {
        tracing::debug!(query = text, "Classifying transcript");

        let response = self
            .client
            .get(self.prediction_url())
            .query(&[("q", text), ("verbose", "true")])
            .header(SUBSCRIPTION_KEY_HEADER, self.config.subscription_key())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IntentError::Timeout
                } else {
                    IntentError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IntentError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: LuisResponse = response
            .json()
            .await
            .map_err(|e| IntentError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        body.try_into()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuisResponse {
    query: String,
    top_scoring_intent: Option<LuisIntent>,
    #[serde(default)]
    intents: Vec<LuisIntent>,
}

#[derive(Debug, Deserialize)]
struct LuisIntent {
    intent: String,
    score: f64,
}

impl From<LuisIntent> for IntentMatch {
    fn from(value: LuisIntent) -> Self {
        IntentMatch::new(value.intent, value.score)
    }
}

impl TryFrom<LuisResponse> for LanguageResult {
    type Error = IntentError;

    fn try_from(value: LuisResponse) -> Result<Self, Self::Error> {
        let top = value
            .top_scoring_intent
            .ok_or_else(|| IntentError::InvalidResponse("missing topScoringIntent".to_string()))?;

        let mut result = LanguageResult::new(value.query, top.into());
        result.intents = value.intents.into_iter().map(IntentMatch::from).collect();
        Ok(result)
    }
}
