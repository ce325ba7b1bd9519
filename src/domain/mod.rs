//! Domain layer containing the prompt logic and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, flow results, errors, state machine)
//! - `prompt` - Prompt requests, recording outcomes, retries and choice selection
//! - `intent` - Intent matchers and the interception registry

pub mod foundation;
pub mod intent;
pub mod prompt;
