//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `adapters/` - Tool adapters and the built-in registry
//! - `config/` - YAML settings repository
//! - `environment` - OS, distro, shell and command probing
//! - `events/` - Run event sinks (NDJSON)
//! - `fs/` - Local file system and home resolution
//! - `process/` - Subprocess execution
//! - `prompt/` - Interactive confirmation

pub mod adapters;
pub mod config;
pub mod environment;
pub mod events;
pub mod fs;
pub mod process;
pub mod prompt;

// Re-export for convenience
pub use adapters::builtin_registry;
pub use config::YamlSettingsRepository;
pub use events::JsonEventSink;
pub use fs::LocalFs;
pub use process::SystemRunner;
pub use prompt::DialoguerConfirmer;
