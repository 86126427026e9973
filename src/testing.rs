//! Shared fakes for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::Path;

use crate::domain::ports::{
    AdapterContext, CollectingEventSink, CommandOutput, CommandRunner, FixedAnswer,
};
use crate::domain::services::{PrivilegedGateway, TextRegionPatcher};
use crate::domain::value_objects::{Environment, ExecutionContext};
use crate::infrastructure::fs::LocalFs;

/// Runner that records every call and answers from a script
#[derive(Default)]
pub struct ScriptedRunner {
    calls: RefCell<Vec<String>>,
    outputs: RefCell<HashMap<String, CommandOutput>>,
    failing: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `program args...` with `output`
    pub fn respond(&self, command: &str, output: CommandOutput) {
        self.outputs.borrow_mut().insert(command.to_string(), output);
    }

    /// Make any command containing `needle` fail
    pub fn fail_on(&self, needle: &str) {
        self.failing.borrow_mut().push(needle.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, program: &str, args: &[&str]) -> String {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.borrow_mut().push(line.clone());
        line
    }

    fn fails(&self, line: &str) -> bool {
        self.failing.borrow().iter().any(|n| line.contains(n.as_str()))
    }
}

impl CommandRunner for ScriptedRunner {
    fn output(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        let line = self.record(program, args);
        if self.fails(&line) {
            return Ok(CommandOutput::failed());
        }
        Ok(self
            .outputs
            .borrow()
            .get(&line)
            .cloned()
            .unwrap_or_else(|| CommandOutput::ok("")))
    }

    fn interactive(&self, program: &str, args: &[&str]) -> io::Result<bool> {
        let line = self.record(program, args);
        Ok(!self.fails(&line))
    }
}

/// Everything an adapter needs, rooted in a temp home
pub struct Harness {
    pub env: Environment,
    pub exec: ExecutionContext,
    pub runner: ScriptedRunner,
    pub events: CollectingEventSink,
    pub answer: bool,
}

impl Harness {
    pub fn new<I, S>(home: &Path, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            env: Environment::fixed(home, commands),
            exec: ExecutionContext::new().with_auto_confirm(true),
            runner: ScriptedRunner::new(),
            events: CollectingEventSink::new(),
            answer: true,
        }
    }

    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.exec = self.exec.with_dry_run(true);
        self
    }

    /// Require an interactive answer instead of auto-confirming
    pub fn answering(mut self, answer: bool) -> Self {
        self.exec = self.exec.with_auto_confirm(false);
        self.answer = answer;
        self
    }

    pub fn run<R>(&self, f: impl FnOnce(&AdapterContext<'_>) -> R) -> R {
        let confirmer = FixedAnswer(self.answer);
        let patcher = TextRegionPatcher::new(&LocalFs, self.exec, &self.events);
        let gateway = PrivilegedGateway::new(&self.runner, &confirmer, self.exec, &self.events);
        let ctx = AdapterContext {
            exec: self.exec,
            env: &self.env,
            patcher: &patcher,
            gateway: &gateway,
            runner: &self.runner,
            events: &self.events,
        };
        f(&ctx)
    }
}
