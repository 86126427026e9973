//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Wiring production infrastructure into the application services
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Builds the runtime (environment, registry, sinks)

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands};
pub use factory::Runtime;
