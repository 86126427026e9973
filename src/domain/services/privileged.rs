//! Privileged command gateway
//!
//! Adapters that touch system-owned paths hand an ordered batch of shell
//! commands to this gateway. It previews them in a dry run, otherwise lists
//! them, asks for confirmation at most once per invocation and runs each
//! one as `sudo sh -c <cmd>`.

use std::cell::OnceCell;

use tracing::{info, warn};

use crate::domain::ports::{
    AdapterEffect, AdapterError, CommandRunner, Confirmer, RunEvent, RunEventSink,
};
use crate::domain::value_objects::ExecutionContext;

const CONFIRM_PROMPT: &str = "Run these commands now?";

pub struct PrivilegedGateway<'a> {
    runner: &'a dyn CommandRunner,
    confirmer: &'a dyn Confirmer,
    exec: ExecutionContext,
    events: &'a dyn RunEventSink,
    decision: OnceCell<bool>,
}

impl<'a> PrivilegedGateway<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        confirmer: &'a dyn Confirmer,
        exec: ExecutionContext,
        events: &'a dyn RunEventSink,
    ) -> Self {
        Self {
            runner,
            confirmer,
            exec,
            events,
            decision: OnceCell::new(),
        }
    }

    /// Run a batch where any failure aborts the rest
    pub fn run(&self, operation: &str, commands: &[String]) -> Result<AdapterEffect, AdapterError> {
        if !self.prepare(operation, commands, false) {
            return Ok(AdapterEffect::Declined);
        }
        if self.exec.dry_run {
            return Ok(AdapterEffect::Done);
        }

        for command in commands {
            self.execute(command)?;
        }
        Ok(AdapterEffect::Done)
    }

    /// Run a teardown batch; failures are reported and skipped over
    pub fn run_removal(
        &self,
        operation: &str,
        commands: &[String],
    ) -> Result<AdapterEffect, AdapterError> {
        if !self.prepare(operation, commands, true) {
            return Ok(AdapterEffect::Declined);
        }
        if self.exec.dry_run {
            return Ok(AdapterEffect::Done);
        }

        for command in commands {
            if let Err(err) = self.execute(command) {
                warn!(operation, %err, "best-effort command failed");
                self.events.on_event(RunEvent::CommandFailed {
                    operation: operation.to_string(),
                    command: display_command(command),
                    error: err.to_string(),
                });
            }
        }
        Ok(AdapterEffect::Done)
    }

    /// Show the batch and settle confirmation; false means declined
    ///
    /// Every batch is listed, but only the first one asks: later batches in
    /// the same pass reuse that answer, a "no" included.
    fn prepare(&self, operation: &str, commands: &[String], removal: bool) -> bool {
        if commands.is_empty() {
            return true;
        }

        let listed: Vec<String> = commands.iter().map(|c| display_command(c)).collect();
        if self.exec.dry_run {
            self.events.on_event(RunEvent::CommandsSimulated {
                operation: operation.to_string(),
                commands: listed,
            });
            return true;
        }

        self.events.on_event(RunEvent::CommandsPending {
            operation: operation.to_string(),
            commands: listed,
            removal,
        });

        let approved = self.exec.auto_confirm
            || *self
                .decision
                .get_or_init(|| self.confirmer.confirm(CONFIRM_PROMPT));
        if !approved {
            info!(operation, "privileged commands declined");
            self.events.on_event(RunEvent::ConfirmationDeclined {
                operation: operation.to_string(),
            });
        }
        approved
    }

    fn execute(&self, command: &str) -> Result<(), AdapterError> {
        info!(command, "running privileged command");
        let failed = |detail: String| AdapterError::CommandFailed {
            command: display_command(command),
            detail,
        };
        match self.runner.interactive("sudo", &["sh", "-c", command]) {
            Ok(true) => Ok(()),
            Ok(false) => Err(failed("non-zero exit status".to_string())),
            Err(err) => Err(failed(err.to_string())),
        }
    }
}

/// How a command is shown to the user
pub fn display_command(command: &str) -> String {
    format!("sudo sh -c {}", shell_quote(command))
}

/// Wrap `s` in single quotes for safe embedding in a shell command
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CollectingEventSink, CommandOutput, FixedAnswer, NoopEventSink};
    use std::cell::{Cell, RefCell};
    use std::io;

    /// Records commands; fails any command containing `fail_on`
    #[derive(Default)]
    struct FakeRunner {
        ran: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl CommandRunner for FakeRunner {
        fn output(&self, _program: &str, _args: &[&str]) -> io::Result<CommandOutput> {
            Ok(CommandOutput::failed())
        }

        fn interactive(&self, program: &str, args: &[&str]) -> io::Result<bool> {
            let line = format!("{} {}", program, args.join(" "));
            self.ran.borrow_mut().push(line.clone());
            Ok(!self.fail_on.is_some_and(|needle| line.contains(needle)))
        }
    }

    struct CountingConfirmer {
        asked: Cell<usize>,
        answer: bool,
    }

    impl Confirmer for CountingConfirmer {
        fn confirm(&self, _prompt: &str) -> bool {
            self.asked.set(self.asked.get() + 1);
            self.answer
        }
    }

    fn cmds(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("plain"), "'plain'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn dry_run_lists_without_running() {
        let runner = FakeRunner::default();
        let sink = CollectingEventSink::new();
        let gateway = PrivilegedGateway::new(
            &runner,
            &FixedAnswer(false),
            ExecutionContext::new().with_dry_run(true),
            &sink,
        );

        let effect = gateway.run("apt", &cmds(&["echo hi"])).unwrap();

        assert_eq!(effect, AdapterEffect::Done);
        assert!(runner.ran.borrow().is_empty());
        assert_eq!(
            sink.events(),
            vec![RunEvent::CommandsSimulated {
                operation: "apt".into(),
                commands: vec!["sudo sh -c 'echo hi'".into()],
            }]
        );
    }

    #[test]
    fn confirmation_is_asked_once_per_gateway() {
        let runner = FakeRunner::default();
        let confirmer = CountingConfirmer {
            asked: Cell::new(0),
            answer: true,
        };
        let sink = CollectingEventSink::new();
        let gateway = PrivilegedGateway::new(&runner, &confirmer, ExecutionContext::new(), &sink);

        gateway.run("system_ca", &cmds(&["a"])).unwrap();
        gateway.run("apt", &cmds(&["b"])).unwrap();

        assert_eq!(confirmer.asked.get(), 1);
        assert_eq!(
            *runner.ran.borrow(),
            vec!["sudo sh -c a".to_string(), "sudo sh -c b".to_string()]
        );
    }

    #[test]
    fn auto_confirm_never_asks() {
        let runner = FakeRunner::default();
        let confirmer = CountingConfirmer {
            asked: Cell::new(0),
            answer: false,
        };
        let gateway = PrivilegedGateway::new(
            &runner,
            &confirmer,
            ExecutionContext::new().with_auto_confirm(true),
            &NoopEventSink,
        );

        assert_eq!(gateway.run("yum", &cmds(&["x"])).unwrap(), AdapterEffect::Done);
        assert_eq!(confirmer.asked.get(), 0);
        assert_eq!(runner.ran.borrow().len(), 1);
    }

    #[test]
    fn declining_is_not_an_error() {
        let runner = FakeRunner::default();
        let sink = CollectingEventSink::new();
        let gateway =
            PrivilegedGateway::new(&runner, &FixedAnswer(false), ExecutionContext::new(), &sink);

        let effect = gateway.run("snap", &cmds(&["snap set system proxy.http=x"])).unwrap();

        assert_eq!(effect, AdapterEffect::Declined);
        assert!(runner.ran.borrow().is_empty());
        assert!(sink
            .events()
            .contains(&RunEvent::ConfirmationDeclined { operation: "snap".into() }));
    }

    #[test]
    fn later_batches_reuse_a_declined_answer() {
        let runner = FakeRunner::default();
        let confirmer = CountingConfirmer {
            asked: Cell::new(0),
            answer: false,
        };
        let sink = CollectingEventSink::new();
        let gateway = PrivilegedGateway::new(&runner, &confirmer, ExecutionContext::new(), &sink);

        assert_eq!(gateway.run("system_ca", &cmds(&["a"])).unwrap(), AdapterEffect::Declined);
        assert_eq!(gateway.run_removal("apt", &cmds(&["b"])).unwrap(), AdapterEffect::Declined);

        assert_eq!(confirmer.asked.get(), 1);
        assert!(runner.ran.borrow().is_empty());
        assert_eq!(
            sink.events(),
            vec![
                RunEvent::CommandsPending {
                    operation: "system_ca".into(),
                    commands: vec!["sudo sh -c 'a'".into()],
                    removal: false,
                },
                RunEvent::ConfirmationDeclined {
                    operation: "system_ca".into(),
                },
                RunEvent::CommandsPending {
                    operation: "apt".into(),
                    commands: vec!["sudo sh -c 'b'".into()],
                    removal: true,
                },
                RunEvent::ConfirmationDeclined {
                    operation: "apt".into(),
                },
            ]
        );
    }

    #[test]
    fn required_batch_stops_at_first_failure() {
        let runner = FakeRunner {
            fail_on: Some("second"),
            ..Default::default()
        };
        let gateway = PrivilegedGateway::new(
            &runner,
            &FixedAnswer(true),
            ExecutionContext::new(),
            &NoopEventSink,
        );

        let err = gateway
            .run("system_ca", &cmds(&["first", "second", "third"]))
            .unwrap_err();

        assert!(matches!(err, AdapterError::CommandFailed { ref command, .. } if command == "sudo sh -c 'second'"));
        assert_eq!(runner.ran.borrow().len(), 2);
    }

    #[test]
    fn removal_batch_continues_after_failure() {
        let runner = FakeRunner {
            fail_on: Some("second"),
            ..Default::default()
        };
        let sink = CollectingEventSink::new();
        let gateway =
            PrivilegedGateway::new(&runner, &FixedAnswer(true), ExecutionContext::new(), &sink);

        let effect = gateway
            .run_removal("apt", &cmds(&["first", "second", "third"]))
            .unwrap();

        assert_eq!(effect, AdapterEffect::Done);
        assert_eq!(runner.ran.borrow().len(), 3);
        assert!(sink
            .events()
            .iter()
            .any(|e| matches!(e, RunEvent::CommandFailed { command, .. } if command == "sudo sh -c 'second'")));
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let runner = FakeRunner::default();
        let confirmer = CountingConfirmer {
            asked: Cell::new(0),
            answer: false,
        };
        let gateway = PrivilegedGateway::new(
            &runner,
            &confirmer,
            ExecutionContext::new(),
            &NoopEventSink,
        );

        assert_eq!(gateway.run("apt", &[]).unwrap(), AdapterEffect::Done);
        assert_eq!(confirmer.asked.get(), 0);
    }
}
