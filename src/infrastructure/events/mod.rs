//! Event Sink Implementations
//!
//! - JsonEventSink: NDJSON output for CI/automation
//! - TracingEventSink: progress as log lines

mod json;
mod log;

pub use json::JsonEventSink;
pub use log::TracingEventSink;
