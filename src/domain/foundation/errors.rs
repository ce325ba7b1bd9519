//! Error types for the domain layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes carried on flow results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The host delivered a reply without a recording outcome.
    MissingOutcome,
    /// The recording service reported a temporary system failure.
    TemporaryFailure,
    /// Any other failure.
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MissingOutcome => "MISSING_OUTCOME",
            ErrorCode::TemporaryFailure => "TEMPORARY_FAILURE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Error delivered upward on a flow result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl FlowError {
    /// Creates a new flow error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// The host replied to a prompt without telling us how the recording went.
    pub fn missing_outcome() -> Self {
        Self::new(
            ErrorCode::MissingOutcome,
            "prompt error: Message missing operationOutcome.",
        )
    }

    /// The recording service failed temporarily.
    pub fn temporary_failure() -> Self {
        Self::new(
            ErrorCode::TemporaryFailure,
            "prompt error: service encountered a temporary failure",
        )
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for FlowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("intent_name");
        assert_eq!(format!("{}", err), "Field 'intent_name' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("min_score", 0.0, 1.0, 1.5);
        assert_eq!(
            format!("{}", err),
            "Field 'min_score' must be between 0 and 1, got 1.5"
        );
    }

    #[test]
    fn flow_error_displays_code_and_message() {
        let err = FlowError::temporary_failure();
        assert_eq!(
            format!("{}", err),
            "[TEMPORARY_FAILURE] prompt error: service encountered a temporary failure"
        );
    }

    #[test]
    fn missing_outcome_error_names_the_missing_field() {
        let err = FlowError::missing_outcome();
        assert_eq!(err.code, ErrorCode::MissingOutcome);
        assert!(err.message.contains("operationOutcome"));
    }

    #[test]
    fn flow_error_with_detail_adds_detail() {
        let err = FlowError::new(ErrorCode::InternalError, "child failed")
            .with_detail("flow", "LUIS:1");
        assert_eq!(err.details.get("flow"), Some(&"LUIS:1".to_string()));
    }

    #[test]
    fn flow_error_serializes_code_in_screaming_snake_case() {
        let json = serde_json::to_value(FlowError::missing_outcome()).unwrap();
        assert_eq!(json["code"], "MISSING_OUTCOME");
        assert!(json.get("details").is_none());
    }
}
