//! Intent classification service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::speech::is_http_url;

/// Intent classification (LUIS) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IntentConfig {
    /// Regional endpoint, without the `/luis/...` path
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Published application id
    pub app_id: Option<String>,

    /// Subscription key for the application
    pub subscription_key: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl IntentConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The subscription key, if one is configured and non-empty
    pub fn subscription_key(&self) -> Option<&str> {
        self.subscription_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
    }

    /// Validate intent configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.endpoint) {
            return Err(ValidationError::InvalidUrl("INTENT__ENDPOINT"));
        }
        if self.app_id.as_ref().map_or(true, |id| id.trim().is_empty()) {
            return Err(ValidationError::MissingRequired("INTENT__APP_ID"));
        }
        if self.subscription_key().is_none() {
            return Err(ValidationError::MissingRequired("INTENT__SUBSCRIPTION_KEY"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout("INTENT__TIMEOUT_SECS"));
        }
        Ok(())
    }
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            app_id: None,
            subscription_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://westus.api.cognitive.microsoft.com".to_string()
}

fn default_timeout() -> u64 {
    10
}
