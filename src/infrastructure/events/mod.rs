//! Event Sink Implementations
//!
//! Provides concrete implementations of RunEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - ConsoleEventSink lives in `ui::events` (it needs the terminal theme)

mod json;

pub use json::{plan_json, JsonEventSink};
