//! NDJSON shapes for command results
//!
//! Run events stream through `JsonEventSink`; these are the summary events
//! a command writes once its pass is over.

use std::io::{self, Write};

use serde_json::{json, Value};

use crate::application::{ApplyOutcome, InventoryEntry, RunReport, StatusEntry, StatusState};
use crate::domain::entities::Enablement;

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &Value) -> io::Result<()> {
    let line = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Convenience helper that writes to stdout.
pub fn emit(event: Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}

fn outcome_json(name: &str, outcome: &ApplyOutcome) -> Value {
    let label = match outcome {
        ApplyOutcome::Configured => "configured",
        ApplyOutcome::Removed => "removed",
        ApplyOutcome::SkippedDisabled => "skipped_disabled",
        ApplyOutcome::SkippedUnavailable => "skipped_unavailable",
        ApplyOutcome::SkippedDeclined => "skipped_declined",
        ApplyOutcome::SkippedManual => "skipped_manual",
        ApplyOutcome::Failed(_) => "failed",
    };
    let mut value = json!({
        "adapter": name,
        "outcome": label,
    });
    if let ApplyOutcome::Failed(err) = outcome {
        value["error"] = json!(err.to_string());
    }
    value
}

/// `complete` event for an apply/remove pass
pub fn run_report_json(report: &RunReport) -> Value {
    let status = if report.failures() == 0 { "success" } else { "partial" };
    json!({
        "event": "complete",
        "command": report.operation.as_str(),
        "status": status,
        "dry_run": report.dry_run,
        "succeeded": report.succeeded(),
        "skipped": report.skipped(),
        "failed": report.failures(),
        "adapters": report
            .reports
            .iter()
            .map(|r| outcome_json(r.name, &r.outcome))
            .collect::<Vec<_>>(),
    })
}

pub fn status_json(entries: &[StatusEntry]) -> Value {
    let adapters: Vec<Value> = entries
        .iter()
        .map(|entry| match &entry.state {
            StatusState::Disabled => json!({"adapter": entry.name, "status": "disabled"}),
            StatusState::Unavailable => json!({"adapter": entry.name, "status": "not installed"}),
            StatusState::Failed(err) => {
                json!({"adapter": entry.name, "status": "error", "error": err.to_string()})
            }
            StatusState::Reported(status) => json!({
                "adapter": entry.name,
                "status": status.label.as_str(),
                "detail": status.detail,
            }),
        })
        .collect();
    json!({
        "event": "status",
        "adapters": adapters,
    })
}

pub fn inventory_json(entries: &[InventoryEntry]) -> Value {
    let adapters: Vec<Value> = entries
        .iter()
        .map(|entry| {
            json!({
                "adapter": entry.name,
                "enabled": entry.enabled(),
                "explicit": entry.enablement != Enablement::Absent,
                "available": entry.available,
            })
        })
        .collect();
    json!({
        "event": "list",
        "adapters": adapters,
    })
}
