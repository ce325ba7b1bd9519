//! Conversation host adapters.
//!
//! - `InMemoryCallSession` - Recording session double for tests
//! - `NoopDialog` - Placeholder flow for registry tests

mod in_memory;
mod noop_dialog;

pub use in_memory::InMemoryCallSession;
pub use noop_dialog::NoopDialog;
