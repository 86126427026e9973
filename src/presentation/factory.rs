//! Runtime Factory
//!
//! Wires production infrastructure into the application layer.
//! This is the dependency injection point for the binary.

use tracing::debug;

use super::cli::Cli;
use crate::application::ApplyOrchestrator;
use crate::domain::entities::Settings;
use crate::domain::ports::{RunEvent, RunEventSink, SettingsRepository};
use crate::domain::services::AdapterRegistry;
use crate::domain::value_objects::{Environment, ExecutionContext};
use crate::error::EzproxyResult;
use crate::infrastructure::{
    builtin_registry, environment, DialoguerConfirmer, JsonEventSink, LocalFs, SystemRunner,
    YamlSettingsRepository,
};
use crate::ui::context::UiContext;
use crate::ui::events::ConsoleEventSink;
use crate::ui::output::print_settings_warnings;

/// Where run events and command summaries go
pub enum Output {
    Json(JsonEventSink),
    Console(ConsoleEventSink),
}

impl Output {
    pub fn for_ui(ui: UiContext) -> Self {
        if ui.json {
            Output::Json(JsonEventSink::stdout())
        } else {
            Output::Console(ConsoleEventSink::stdout(ui))
        }
    }

    /// Print a summary: the JSON value in `--json` mode, the text otherwise
    pub fn summary(&self, json: impl FnOnce() -> serde_json::Value, text: impl FnOnce() -> String) {
        match self {
            Output::Json(sink) => sink.write_event(json()),
            Output::Console(_) => print!("{}", text()),
        }
    }
}

impl RunEventSink for Output {
    fn on_event(&self, event: RunEvent) {
        match self {
            Output::Json(sink) => sink.on_event(event),
            Output::Console(sink) => sink.on_event(event),
        }
    }
}

/// Everything a command needs, built once per invocation
pub struct Runtime {
    pub ui: UiContext,
    pub exec: ExecutionContext,
    pub env: Environment,
    pub registry: AdapterRegistry,
    pub repository: YamlSettingsRepository,
    pub output: Output,
    runner: SystemRunner,
    confirmer: DialoguerConfirmer,
}

impl Runtime {
    pub fn from_cli(cli: &Cli) -> EzproxyResult<Self> {
        let ui = UiContext::new(cli.json, cli.verbose, cli.color);
        let exec = cli.execution_context();
        let env = environment::detect()?;
        debug!(?env, ?exec, "runtime ready");

        Ok(Self {
            ui,
            exec,
            env,
            registry: builtin_registry(),
            repository: YamlSettingsRepository::at_default_path()?,
            output: Output::for_ui(ui),
            runner: SystemRunner,
            confirmer: DialoguerConfirmer::new(ui.unicode),
        })
    }

    pub fn orchestrator(&self) -> ApplyOrchestrator<'_, LocalFs> {
        ApplyOrchestrator::new(
            &self.registry,
            &self.env,
            LocalFs::new(),
            &self.runner,
            &self.confirmer,
        )
        .with_events(&self.output)
        .with_execution(self.exec)
    }

    /// Load the settings document, surfacing unknown keys as warnings
    pub fn load_settings(&self) -> EzproxyResult<Settings> {
        let (settings, warnings) = self.repository.load()?;
        print_settings_warnings(&warnings, &self.ui);
        Ok(settings)
    }
}
