//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod command_runner;
pub mod confirmer;
pub mod file_system;
pub mod run_events;
pub mod settings_repository;
pub mod tool_adapter;

pub use command_runner::{CommandOutput, CommandRunner};
pub use confirmer::{Confirmer, FixedAnswer};
pub use file_system::{FileSystem, FsError, FsResult};
pub use run_events::{CollectingEventSink, NoopEventSink, RunEvent, RunEventSink};
pub use settings_repository::{SettingsRepository, SettingsWarning};
pub use tool_adapter::{AdapterContext, AdapterEffect, AdapterError, ToolAdapter};
