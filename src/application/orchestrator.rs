//! Apply orchestrator
//!
//! One sequential pass over the registry per invocation. Each adapter is
//! either skipped (disabled, unavailable) or run, and its outcome recorded;
//! a failing adapter never stops the ones after it.

use tracing::{debug, warn};

use crate::domain::entities::{Enablement, EnablementMap, Settings};
use crate::domain::ports::{
    AdapterContext, AdapterEffect, AdapterError, CommandRunner, Confirmer, FileSystem,
    NoopEventSink, RunEvent, RunEventSink, ToolAdapter,
};
use crate::domain::services::{AdapterRegistry, PrivilegedGateway, TextRegionPatcher};
use crate::domain::value_objects::{Environment, ExecutionContext, ProxySettings, ToolStatus};

/// Which half of the adapter contract to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Apply,
    Remove,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Apply => "apply",
            Operation::Remove => "remove",
        }
    }

    fn done(&self) -> ApplyOutcome {
        match self {
            Operation::Apply => ApplyOutcome::Configured,
            Operation::Remove => ApplyOutcome::Removed,
        }
    }
}

/// Result of one adapter within a pass
#[derive(Debug)]
pub enum ApplyOutcome {
    Configured,
    Removed,
    SkippedDisabled,
    SkippedUnavailable,
    /// Privileged confirmation declined; manual instructions were printed
    SkippedDeclined,
    /// No automated path on this platform; manual instructions were printed
    SkippedManual,
    Failed(AdapterError),
}

impl ApplyOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ApplyOutcome::Configured => "configured",
            ApplyOutcome::Removed => "removed",
            ApplyOutcome::SkippedDisabled => "skipped (disabled)",
            ApplyOutcome::SkippedUnavailable => "skipped (not installed)",
            ApplyOutcome::SkippedDeclined => "skipped (declined)",
            ApplyOutcome::SkippedManual => "skipped (manual steps)",
            ApplyOutcome::Failed(_) => "failed",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ApplyOutcome::Failed(_))
    }

    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            ApplyOutcome::SkippedDisabled
                | ApplyOutcome::SkippedUnavailable
                | ApplyOutcome::SkippedDeclined
                | ApplyOutcome::SkippedManual
        )
    }
}

#[derive(Debug)]
pub struct AdapterReport {
    pub name: &'static str,
    pub outcome: ApplyOutcome,
}

/// Ordered outcomes of one pass
#[derive(Debug)]
pub struct RunReport {
    pub operation: Operation,
    pub dry_run: bool,
    pub reports: Vec<AdapterReport>,
}

impl RunReport {
    pub fn failures(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_failure()).count()
    }

    pub fn skipped(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_skip()).count()
    }

    pub fn succeeded(&self) -> usize {
        self.reports.len() - self.failures() - self.skipped()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// Status answer for one adapter
#[derive(Debug)]
pub enum StatusState {
    Disabled,
    Unavailable,
    Reported(ToolStatus),
    Failed(AdapterError),
}

#[derive(Debug)]
pub struct StatusEntry {
    pub name: &'static str,
    pub state: StatusState,
}

/// One row of `ezproxy list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub name: &'static str,
    pub enablement: Enablement,
    pub available: bool,
}

impl InventoryEntry {
    pub fn enabled(&self) -> bool {
        self.enablement.is_enabled()
    }
}

/// Drives adapters through apply/remove/status
///
/// Parameterized by the file system port so tests can swap it out; the
/// other ports are borrowed trait objects shared with the rest of the run.
pub struct ApplyOrchestrator<'a, FS>
where
    FS: FileSystem,
{
    registry: &'a AdapterRegistry,
    env: &'a Environment,
    file_system: FS,
    runner: &'a dyn CommandRunner,
    confirmer: &'a dyn Confirmer,
    events: &'a dyn RunEventSink,
    exec: ExecutionContext,
}

impl<'a, FS> ApplyOrchestrator<'a, FS>
where
    FS: FileSystem,
{
    pub fn new(
        registry: &'a AdapterRegistry,
        env: &'a Environment,
        file_system: FS,
        runner: &'a dyn CommandRunner,
        confirmer: &'a dyn Confirmer,
    ) -> Self {
        Self {
            registry,
            env,
            file_system,
            runner,
            confirmer,
            events: &NoopEventSink,
            exec: ExecutionContext::new(),
        }
    }

    pub fn with_events(mut self, events: &'a dyn RunEventSink) -> Self {
        self.events = events;
        self
    }

    pub fn with_execution(mut self, exec: ExecutionContext) -> Self {
        self.exec = exec;
        self
    }

    pub fn execution(&self) -> ExecutionContext {
        self.exec
    }

    pub fn registry(&self) -> &AdapterRegistry {
        self.registry
    }

    /// Full pass: disabled -> skip, unavailable -> skip, otherwise run
    pub fn run(&self, operation: Operation, settings: &Settings) -> RunReport {
        let proxy = settings.proxy_settings(self.env);
        let reports = self.with_context(|ctx| {
            self.registry
                .iter()
                .map(|adapter| {
                    let outcome = if !settings.tools.is_enabled(adapter.name()) {
                        debug!(adapter = adapter.name(), "skipped: disabled");
                        ApplyOutcome::SkippedDisabled
                    } else {
                        self.run_available(adapter, operation, &proxy, ctx)
                    };
                    AdapterReport {
                        name: adapter.name(),
                        outcome,
                    }
                })
                .collect()
        });
        self.report(operation, reports)
    }

    /// Apply `enabled`, then remove `disabled`, ignoring enablement
    ///
    /// Used right after a toggle, where newly disabled adapters still need
    /// their configuration removed. Both halves share one gateway, so the
    /// privileged confirmation is asked at most once. Unknown names are
    /// ignored.
    pub fn run_deltas(
        &self,
        settings: &Settings,
        enabled: &[String],
        disabled: &[String],
    ) -> (RunReport, RunReport) {
        let proxy = settings.proxy_settings(self.env);
        let (applied, removed) = self.with_context(|ctx| {
            (
                self.run_named(Operation::Apply, &proxy, enabled, ctx),
                self.run_named(Operation::Remove, &proxy, disabled, ctx),
            )
        });
        (
            self.report(Operation::Apply, applied),
            self.report(Operation::Remove, removed),
        )
    }

    /// Read-only status of every registered adapter
    pub fn status(&self, settings: &Settings) -> Vec<StatusEntry> {
        let proxy = settings.proxy_settings(self.env);
        self.with_context(|ctx| {
            self.registry
                .iter()
                .map(|adapter| {
                    let state = if !settings.tools.is_enabled(adapter.name()) {
                        StatusState::Disabled
                    } else if !adapter.is_available(self.env) {
                        StatusState::Unavailable
                    } else {
                        match adapter.status(&proxy, ctx) {
                            Ok(status) => StatusState::Reported(status),
                            Err(err) => StatusState::Failed(err),
                        }
                    };
                    StatusEntry {
                        name: adapter.name(),
                        state,
                    }
                })
                .collect()
        })
    }

    /// Registered adapters with stored enablement and availability
    pub fn inventory(&self, tools: &EnablementMap) -> Vec<InventoryEntry> {
        self.registry
            .iter()
            .map(|adapter| InventoryEntry {
                name: adapter.name(),
                enablement: tools.state(adapter.name()),
                available: adapter.is_available(self.env),
            })
            .collect()
    }

    fn run_named(
        &self,
        operation: Operation,
        proxy: &ProxySettings,
        names: &[String],
        ctx: &AdapterContext<'_>,
    ) -> Vec<AdapterReport> {
        self.registry
            .iter()
            .filter(|adapter| names.iter().any(|n| n == adapter.name()))
            .map(|adapter| AdapterReport {
                name: adapter.name(),
                outcome: self.run_available(adapter, operation, proxy, ctx),
            })
            .collect()
    }

    fn run_available(
        &self,
        adapter: &dyn ToolAdapter,
        operation: Operation,
        proxy: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> ApplyOutcome {
        if !adapter.is_available(self.env) {
            debug!(adapter = adapter.name(), "skipped: not installed");
            return ApplyOutcome::SkippedUnavailable;
        }

        self.events.on_event(RunEvent::AdapterStarted {
            name: adapter.name().to_string(),
        });
        let result = match operation {
            Operation::Apply => adapter.apply(proxy, ctx),
            Operation::Remove => adapter.remove(ctx),
        };
        match result {
            Ok(AdapterEffect::Done) => operation.done(),
            Ok(AdapterEffect::Declined) => ApplyOutcome::SkippedDeclined,
            Ok(AdapterEffect::Manual) => ApplyOutcome::SkippedManual,
            Err(err) => {
                warn!(adapter = adapter.name(), error = %err, "{} failed", operation.as_str());
                ApplyOutcome::Failed(err)
            }
        }
    }

    /// One patcher and one gateway per pass, so confirmation is asked once
    fn with_context<R>(&self, f: impl FnOnce(&AdapterContext<'_>) -> R) -> R {
        let patcher = TextRegionPatcher::new(&self.file_system, self.exec, self.events);
        let gateway = PrivilegedGateway::new(self.runner, self.confirmer, self.exec, self.events);
        let ctx = AdapterContext {
            exec: self.exec,
            env: self.env,
            patcher: &patcher,
            gateway: &gateway,
            runner: self.runner,
            events: self.events,
        };
        f(&ctx)
    }

    fn report(&self, operation: Operation, reports: Vec<AdapterReport>) -> RunReport {
        RunReport {
            operation,
            dry_run: self.exec.dry_run,
            reports,
        }
    }
}
