//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod environment;
mod execution;
mod proxy_settings;
mod tool_status;

pub use environment::{CommandProbe, DistroFamily, Environment, FixedCommands, OsKind};
pub use execution::ExecutionContext;
pub use proxy_settings::{ProxyEndpoint, ProxySettings};
pub use tool_status::{StatusLabel, ToolStatus};
