//! Speech recognition service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Speech-to-text service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// Recognition endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Subscription key for the recognition service
    pub subscription_key: Option<Secret<String>>,

    /// Recognition locale
    #[serde(default = "default_language")]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SpeechConfig {
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

    /// Validate speech configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.endpoint) {
            return Err(ValidationError::InvalidUrl("SPEECH__ENDPOINT"));
        }
        if self.subscription_key().is_none() {
            return Err(ValidationError::MissingRequired("SPEECH__SUBSCRIPTION_KEY"));
        }
        if self.language.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SPEECH__LANGUAGE"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout("SPEECH__TIMEOUT_SECS"));
        }
        Ok(())
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            subscription_key: None,
            language: default_language(),
            timeout_secs: default_timeout(),
        }
    }
}

pub(super) fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn default_endpoint() -> String {
    "https://speech.platform.bing.com/speech/recognition/interactive/cognitiveservices/v1"
        .to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> SpeechConfig {
        SpeechConfig {
            subscription_key: Some(Secret::new("speech-key".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_speech_config_defaults() {
        let config = SpeechConfig::default();
        assert_eq!(config.language, "en-US");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.endpoint.starts_with("https://"));
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let config = SpeechConfig {
            subscription_key: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(config.subscription_key().is_none());
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("SPEECH__SUBSCRIPTION_KEY"))
        );
    }

    #[test]
    fn test_validation_rejects_non_http_endpoint() {
        let config = SpeechConfig {
            endpoint: "ftp://speech.example.com".to_string(),
            ..configured()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidUrl("SPEECH__ENDPOINT")));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = SpeechConfig {
            timeout_secs: 0,
            ..configured()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(configured().validate().is_ok());
    }
}
