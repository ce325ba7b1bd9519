//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Namespace of the speech prompt library inside the host.
pub const SPEECH_LIBRARY_NAME: &str = "Speech";

/// Namespace intent flows are installed under.
pub const INTENT_LIBRARY_NAME: &str = "LUIS";

/// Unique identifier for a phone call handled by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(Uuid);

impl CallId {
    /// Creates a new random CallId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a CallId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CallId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Ordinal identifier assigned to an intent flow at registration.
///
/// Ordinals start at 1 and are unique within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowId(u64);

impl FlowId {
    /// Creates a FlowId from a registration ordinal.
    pub fn from_ordinal(ordinal: u64) -> Self {
        Self(ordinal)
    }

    /// Returns the registration ordinal.
    pub fn ordinal(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FlowId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| ValidationError::invalid_format("flow_id", format!("'{}' is not an ordinal", s)))
    }
}

/// Address of a flow in the host's dialog namespace.
///
/// Frames on the host's call stack are identified by the same references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FlowRef {
    /// The speech prompt orchestrator (`Speech:Prompts`).
    SpeechPrompts,
    /// A flow from the intent registry (`LUIS:<id>`).
    Intent(FlowId),
    /// Any other flow owned by the host application.
    Named(String),
}

impl FlowRef {
    /// Creates a reference to a host-owned flow.
    pub fn named(name: impl Into<String>) -> Self {
        FlowRef::Named(name.into())
    }
}

impl fmt::Display for FlowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowRef::SpeechPrompts => write!(f, "{}:Prompts", SPEECH_LIBRARY_NAME),
            FlowRef::Intent(id) => write!(f, "{}:{}", INTENT_LIBRARY_NAME, id),
            FlowRef::Named(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for FlowRef {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ValidationError::empty_field("flow_ref"));
        }
        if s == format!("{}:Prompts", SPEECH_LIBRARY_NAME) {
            return Ok(FlowRef::SpeechPrompts);
        }
        match s.split_once(':') {
            Some((INTENT_LIBRARY_NAME, id)) => Ok(FlowRef::Intent(id.parse()?)),
            _ => Ok(FlowRef::Named(s.to_string())),
        }
    }
}

impl TryFrom<String> for FlowRef {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FlowRef> for String {
    fn from(value: FlowRef) -> Self {
        value.to_string()
    }
}
