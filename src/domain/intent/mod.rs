//! Intent interception domain.
//!
//! - `matcher` - Classified intents and the rules that match them
//! - `registry` - Ordered catalog of flows that react to intents

mod matcher;
mod registry;

pub use matcher::{IntentMatch, IntentMatcher, LanguageResult};
pub use registry::{IntentFlow, IntentRegistry, RegisteredFlow};
