//! Event Sink Implementations
//!
//! Provides concrete implementations of ResolveEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - ConsoleEventSink: Human-readable progress on stderr

mod console;
mod json;

pub use console::{render_event, ConsoleEventSink};
pub use json::{event_json, JsonEventSink};
