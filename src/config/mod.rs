//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SPEECH_PROMPTS_` prefix and nested values use double underscores as separators.
//!
//! Every section has defaults, so an empty environment loads. Validation is
//! where missing service credentials are reported.
//!
//! # Example
//!
//! ```no_run
//! use speech_prompts::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging);
//! ```

mod error;
mod intent;
mod logging;
mod prompts;
mod speech;

pub use error::{ConfigError, ValidationError};
pub use intent::IntentConfig;
pub use logging::{init_tracing, LoggingConfig};
pub use prompts::{PromptsConfig, MAX_RETRIES_CEILING};
pub use speech::SpeechConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Retry prompt texts and retry budget defaults
    #[serde(default)]
    pub prompts: PromptsConfig,

    /// Speech-to-text service
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Intent classification service
    #[serde(default)]
    pub intent: IntentConfig,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SPEECH_PROMPTS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SPEECH_PROMPTS__SPEECH__LANGUAGE=en-GB` -> `speech.language = "en-GB"`
    /// - `SPEECH_PROMPTS__PROMPTS__DEFAULT_MAX_RETRIES=3` -> `prompts.default_max_retries = 3`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SPEECH_PROMPTS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.prompts.validate()?;
        self.speech.validate()?;
        self.intent.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
