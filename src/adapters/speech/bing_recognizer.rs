//! Bing Speech Recognizer - SpeechRecognizer over the speech REST API.
//!
//! Posts the whole recording in one request and reads the `simple` output
//! format.
//!
//! # Configuration
//!
//! ```ignore
//! let config = BingSpeechConfig::new(subscription_key)
//!     .with_language("en-GB")
//!     .with_timeout(Duration::from_secs(5));
//!
//! let recognizer = BingSpeechRecognizer::new(config);
//! ```

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::config::{SpeechConfig, ValidationError};
use crate::domain::prompt::Transcript;
use crate::ports::{RecognitionOptions, SpeechError, SpeechRecognizer};

/// Interactive recognition endpoint of the hosted service.
pub const DEFAULT_SPEECH_ENDPOINT: &str =
    "https://speech.platform.bing.com/speech/recognition/interactive/cognitiveservices/v1";

/// Header carrying the subscription key.
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Configuration for the speech recognizer.
#[derive(Debug, Clone)]
pub struct BingSpeechConfig {
    subscription_key: Secret<String>,
    /// Recognition endpoint URL.
    pub endpoint: String,
    /// Locale used when a request does not override it.
    pub language: String,
    /// Content type of the posted audio.
    pub content_type: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl BingSpeechConfig {
    /// Creates a configuration with the given subscription key.
    pub fn new(subscription_key: impl Into<String>) -> Self {
        Self {
            subscription_key: Secret::new(subscription_key.into()),
            endpoint: DEFAULT_SPEECH_ENDPOINT.to_string(),
            language: "en-US".to_string(),
            content_type: "audio/wav; codec=audio/pcm; samplerate=16000".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Builds the adapter configuration from the loaded settings.
    pub fn from_settings(settings: &SpeechConfig) -> Result<Self, ValidationError> {
        let key = settings
            .subscription_key()
            .ok_or(ValidationError::MissingRequired("SPEECH__SUBSCRIPTION_KEY"))?;
        Ok(Self::new(key)
            .with_endpoint(settings.endpoint.clone())
            .with_language(settings.language.clone())
            .with_timeout(settings.timeout()))
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
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

/// Speech recognizer backed by the hosted REST API.
pub struct BingSpeechRecognizer {
    config: BingSpeechConfig,
    client: Client,
}

impl BingSpeechRecognizer {
    pub fn new(config: BingSpeechConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn map_transport_error(err: reqwest::Error) -> SpeechError {
        if err.is_timeout() {
            SpeechError::Timeout
        } else if err.is_connect() {
            SpeechError::Network(format!("Connection failed: {}", err))
        } else {
            SpeechError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl SpeechRecognizer for BingSpeechRecognizer {
    async fn recognize(
        &self,
        audio: &[u8],
        options: &RecognitionOptions,
    ) -> Result<Transcript, SpeechError> {
        let language = options.language.as_deref().unwrap_or(&self.config.language);
        tracing::debug!(bytes = audio.len(), language, "Sending audio for recognition");

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("language", language), ("format", "simple")])
            .header(SUBSCRIPTION_KEY_HEADER, self.config.subscription_key())
            .header(CONTENT_TYPE, self.config.content_type.as_str())
            .header(ACCEPT, "application/json")
            .body(audio.to_vec())
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SpeechError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: SimpleRecognition = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        transcript_from(body)
    }
}

/// Body of a `format=simple` recognition response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SimpleRecognition {
    recognition_status: RecognitionStatus,
    #[serde(default)]
    display_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
enum RecognitionStatus {
    Success,
    NoMatch,
    InitialSilenceTimeout,
    BabbleTimeout,
    Error,
    #[serde(other)]
    Unknown,
}

fn transcript_from(body: SimpleRecognition) -> Result<Transcript, SpeechError> {
    match body.recognition_status {
        RecognitionStatus::Success => body
            .display_text
            .filter(|text| !text.trim().is_empty())
            .map(Transcript::new)
            .ok_or(SpeechError::NoSpeech),
        RecognitionStatus::InitialSilenceTimeout => Err(SpeechError::NoSpeech),
        RecognitionStatus::NoMatch | RecognitionStatus::BabbleTimeout => {
            Err(SpeechError::FalseRecognition)
        }
        RecognitionStatus::Error => Err(SpeechError::Service {
            status: 200,
            message: "recognition service reported an error".to_string(),
        }),
        RecognitionStatus::Unknown => Err(SpeechError::InvalidResponse(
            "unrecognized RecognitionStatus".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Transcript, SpeechError> {
        transcript_from(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn config_builder_works() {
        let config = BingSpeechConfig::new("key-123")
            .with_endpoint("https://speech.example.com/v1")
            .with_language("de-DE")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.endpoint, "https://speech.example.com/v1");
        assert_eq!(config.language, "de-DE");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.subscription_key(), "key-123");
    }

    #[test]
    fn debug_output_hides_subscription_key() {
        let config = BingSpeechConfig::new("very-secret");
        assert!(!format!("{:?}", config).contains("very-secret"));
    }

    #[test]
    fn from_settings_requires_subscription_key() {
        let err = BingSpeechConfig::from_settings(&SpeechConfig::default()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingRequired(_)));
    }

    mod responses {
        use super::*;

        #[test]
        fn success_yields_display_text() {
            let transcript =
                parse(r#"{"RecognitionStatus":"Success","DisplayText":"Three.","Offset":0}"#)
                    .unwrap();
            assert_eq!(transcript.text, "Three.");
        }

        #[test]
        fn success_without_text_is_no_speech() {
            let err = parse(r#"{"RecognitionStatus":"Success","DisplayText":"  "}"#).unwrap_err();
            assert_eq!(err, SpeechError::NoSpeech);
        }

        #[test]
        fn silence_is_no_speech() {
            let err = parse(r#"{"RecognitionStatus":"InitialSilenceTimeout"}"#).unwrap_err();
            assert_eq!(err, SpeechError::NoSpeech);
        }

        #[test]
        fn no_match_and_babble_are_false_recognitions() {
            for status in ["NoMatch", "BabbleTimeout"] {
                let json = format!(r#"{{"RecognitionStatus":"{}"}}"#, status);
                assert_eq!(parse(&json).unwrap_err(), SpeechError::FalseRecognition);
            }
        }

        #[test]
        fn service_error_is_not_a_caller_error() {
            let err = parse(r#"{"RecognitionStatus":"Error"}"#).unwrap_err();
            assert!(!err.is_caller_error());
        }

        #[test]
        fn unknown_status_is_invalid_response() {
            let err = parse(r#"{"RecognitionStatus":"Dictation"}"#).unwrap_err();
            assert!(matches!(err, SpeechError::InvalidResponse(_)));
        }
    }
}
