//! ToolAdapter port - the capability contract every target tool implements
//!
//! An adapter knows how to put proxy/CA settings into one tool's own
//! configuration surface and take them out again. The orchestrator drives
//! adapters; adapters never drive each other.
//!
//! Contract:
//! - `name` is stable across releases; it keys the enablement map.
//! - `is_available` is a pure probe and must not mutate anything.
//! - `apply`/`remove` are idempotent and must not assume `is_available`
//!   was checked.
//! - `status` is read-only.

use std::path::PathBuf;

use thiserror::Error;

use super::command_runner::CommandRunner;
use super::file_system::FsError;
use super::run_events::{RunEvent, RunEventSink};
use crate::domain::services::{PrivilegedGateway, TextRegionPatcher};
use crate::domain::value_objects::{Environment, ExecutionContext, ProxySettings, ToolStatus};

/// Errors an adapter can surface for itself
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("command failed: {command}: {detail}")]
    CommandFailed { command: String, detail: String },

    #[error("no CA cert configured")]
    MissingCaCert,

    #[error("cert file not found: {}", path.display())]
    CaCertNotFound { path: PathBuf },

    #[error("invalid proxy URL '{url}'")]
    InvalidProxyUrl { url: String },

    #[error("cannot parse {}: {message}", path.display())]
    InvalidDocument { path: PathBuf, message: String },

    #[error("no shell profile found")]
    NoShellProfile,
}

/// What a successful apply/remove amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterEffect {
    /// Changes committed (or previewed, in a dry run)
    Done,
    /// Privileged confirmation declined; manual instructions were printed
    Declined,
    /// Nothing automated exists for this platform; manual steps were printed
    Manual,
}

/// Everything an adapter may use while running
pub struct AdapterContext<'a> {
    pub exec: ExecutionContext,
    pub env: &'a Environment,
    pub patcher: &'a TextRegionPatcher<'a>,
    pub gateway: &'a PrivilegedGateway<'a>,
    pub runner: &'a dyn CommandRunner,
    pub events: &'a dyn RunEventSink,
}

impl AdapterContext<'_> {
    /// Emit a free-form hint for the user
    pub fn note(&self, operation: &str, message: impl Into<String>) {
        self.events.on_event(RunEvent::Note {
            operation: operation.to_string(),
            message: message.into(),
        });
    }
}

/// Capability interface for one target tool
pub trait ToolAdapter {
    /// Stable unique key
    fn name(&self) -> &'static str;

    /// Value written into a freshly created enablement map
    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Whether the tool is present on this machine
    fn is_available(&self, env: &Environment) -> bool;

    fn apply(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<AdapterEffect, AdapterError>;

    fn remove(&self, ctx: &AdapterContext<'_>) -> Result<AdapterEffect, AdapterError>;

    fn status(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<ToolStatus, AdapterError>;
}
