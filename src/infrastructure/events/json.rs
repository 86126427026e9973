//! JSON Event Sink
//!
//! Outputs run events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use serde_json::json;

use crate::domain::ports::{RunEvent, RunEventSink};
use crate::domain::services::PatchPlan;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Write one line; also used by commands for their summary events
    pub fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON shape of a patch plan
pub fn plan_json(plan: &PatchPlan) -> serde_json::Value {
    json!({
        "path": plan.path.display().to_string(),
        "action": plan.action.as_str(),
        "changes": plan.writes(),
        "before": plan.before,
        "after": plan.after,
    })
}

impl RunEventSink for JsonEventSink {
    fn on_event(&self, event: RunEvent) {
        let json = match event {
            RunEvent::AdapterStarted { name } => {
                json!({
                    "event": "adapter_start",
                    "adapter": name,
                })
            }

            RunEvent::FilePlanned { plan, simulated } => {
                json!({
                    "event": "file_planned",
                    "simulated": simulated,
                    "plan": plan_json(&plan),
                })
            }

            RunEvent::CommandsSimulated {
                operation,
                commands,
            } => {
                json!({
                    "event": "commands_simulated",
                    "operation": operation,
                    "commands": commands,
                })
            }

            RunEvent::CommandsPending {
                operation,
                commands,
                removal,
            } => {
                let mode = if removal { "best_effort" } else { "required" };
                json!({
                    "event": "commands_pending",
                    "operation": operation,
                    "commands": commands,
                    "mode": mode,
                })
            }

            RunEvent::ConfirmationDeclined { operation } => {
                json!({
                    "event": "confirmation_declined",
                    "operation": operation,
                })
            }

            RunEvent::CommandFailed {
                operation,
                command,
                error,
            } => {
                json!({
                    "event": "command_failed",
                    "operation": operation,
                    "command": command,
                    "error": error,
                })
            }

            RunEvent::Note { operation, message } => {
                json!({
                    "event": "note",
                    "operation": operation,
                    "message": message,
                })
            }
        };

        self.write_event(json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::PatchAction;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<serde_json::Value> {
        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn json_sink_outputs_file_plan() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(RunEvent::FilePlanned {
            plan: PatchPlan {
                path: PathBuf::from("/home/dev/.curlrc"),
                action: PatchAction::Create,
                before: None,
                after: Some("proxy=http://p:8080\n".into()),
            },
            simulated: true,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "file_planned");
        assert_eq!(events[0]["simulated"], true);
        assert_eq!(events[0]["plan"]["path"], "/home/dev/.curlrc");
        assert_eq!(events[0]["plan"]["action"], "create");
        assert_eq!(events[0]["plan"]["changes"], true);
        assert!(events[0]["plan"]["before"].is_null());
    }

    #[test]
    fn json_sink_outputs_pending_commands_with_mode() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(RunEvent::CommandsPending {
            operation: "system_ca".into(),
            commands: vec!["sudo sh -c 'update-ca-certificates'".into()],
            removal: true,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "commands_pending");
        assert_eq!(events[0]["mode"], "best_effort");
        assert_eq!(events[0]["commands"][0], "sudo sh -c 'update-ca-certificates'");
    }

    #[test]
    fn json_sink_writes_one_line_per_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(RunEvent::AdapterStarted { name: "git".into() });
        sink.on_event(RunEvent::Note {
            operation: "docker".into(),
            message: "restart Docker Desktop".into(),
        });
        sink.write_event(json!({"event": "complete"}));

        let events = lines(&buffer);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["adapter"], "git");
        assert_eq!(events[1]["message"], "restart Docker Desktop");
        assert_eq!(events[2]["event"], "complete");
    }
}
