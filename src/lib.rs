//! ezproxy - corporate proxy and CA trust across developer tools
//!
//! ezproxy writes proxy URLs, no-proxy lists and a corporate CA certificate
//! into the configuration of shells, package managers, container engines
//! and the system trust store, and takes them out again. Every file edit
//! lives inside a marked block so user content is never touched.

pub mod application;
pub mod commands;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use application::{ApplyOrchestrator, ApplyOutcome, Operation, ToggleUseCase};
pub use domain::entities::{EnablementMap, Settings};
pub use domain::services::{AdapterRegistry, MarkerStyle, StateDiff, TextRegionPatcher};
pub use error::{EzproxyError, EzproxyResult};
pub use infrastructure::builtin_registry;
