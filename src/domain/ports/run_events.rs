//! Run Event Port
//!
//! Observable detail emitted while adapters run: file previews, privileged
//! command listings, declined confirmations and best-effort failures.
//! Per-adapter outcomes are returned by the orchestrator, not sent here.

use std::cell::RefCell;

use crate::domain::services::PatchPlan;

/// Event emitted during an orchestration pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// An adapter is about to run
    AdapterStarted { name: String },

    /// A file change was computed (written unless `simulated`)
    FilePlanned { plan: PatchPlan, simulated: bool },

    /// Privileged commands shown instead of run (dry run)
    CommandsSimulated {
        operation: String,
        commands: Vec<String>,
    },

    /// Privileged commands shown ahead of confirmation/execution
    CommandsPending {
        operation: String,
        commands: Vec<String>,
        removal: bool,
    },

    /// User said no; commands were left for manual execution
    ConfirmationDeclined { operation: String },

    /// A best-effort teardown command failed and was skipped over
    CommandFailed {
        operation: String,
        command: String,
        error: String,
    },

    /// Free-form hint from an adapter (manual steps, caveats)
    Note { operation: String, message: String },
}

/// Trait for receiving run events
///
/// Implementations:
/// - `ConsoleEventSink`: human-readable terminal output
/// - `JsonEventSink`: NDJSON event stream
/// - `NoopEventSink`: silent operation
pub trait RunEventSink {
    fn on_event(&self, event: RunEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl RunEventSink for NoopEventSink {
    fn on_event(&self, _event: RunEvent) {}
}

/// Sink that records every event (tests, previews)
#[derive(Default)]
pub struct CollectingEventSink {
    events: RefCell<Vec<RunEvent>>,
}

impl CollectingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RunEvent> {
        self.events.borrow().clone()
    }
}

impl RunEventSink for CollectingEventSink {
    fn on_event(&self, event: RunEvent) {
        self.events.borrow_mut().push(event);
    }
}
