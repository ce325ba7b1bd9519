//! Speech Prompts - Spoken-answer prompts for conversational voice flows
//!
//! This crate records a caller's answer, transcribes it, classifies its
//! intent, and hands the result back to the flow that asked. Recognized
//! intents may be intercepted by registered flows that either start on top
//! of the prompt or unwind the call stack.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
