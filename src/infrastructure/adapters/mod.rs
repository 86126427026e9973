//! Tool Adapters
//!
//! Concrete implementations of the `ToolAdapter` port, one per tool, and
//! the built-in registry that fixes their order.

pub mod brew;
pub mod bundler;
pub mod docker;
pub mod env_vars;
pub mod git;
pub mod go;
pub mod line_block;
pub mod packages;
pub mod system_ca;
pub mod yarn;

pub use brew::BrewAdapter;
pub use bundler::BundlerAdapter;
pub use docker::DockerAdapter;
pub use env_vars::EnvVarsAdapter;
pub use git::GitAdapter;
pub use go::GoAdapter;
pub use line_block::LineBlockAdapter;
pub use packages::{AptAdapter, SnapAdapter, YumAdapter};
pub use system_ca::SystemCaAdapter;
pub use yarn::YarnAdapter;

use crate::domain::services::AdapterRegistry;

/// Every shipped adapter, in apply order
pub fn builtin_registry() -> AdapterRegistry {
    AdapterRegistry::new(vec![
        Box::new(SystemCaAdapter::default()),
        Box::new(EnvVarsAdapter),
        Box::new(GitAdapter),
        Box::new(line_block::PIP),
        Box::new(line_block::NPM),
        Box::new(YarnAdapter),
        Box::new(DockerAdapter),
        Box::new(line_block::PODMAN),
        Box::new(line_block::CURL),
        Box::new(line_block::WGET),
        Box::new(line_block::CARGO),
        Box::new(line_block::CONDA),
        Box::new(GoAdapter),
        Box::new(line_block::GRADLE),
        Box::new(BundlerAdapter),
        Box::new(BrewAdapter),
        Box::new(SnapAdapter),
        Box::new(AptAdapter::default()),
        Box::new(YumAdapter::default()),
        Box::new(line_block::SSH),
    ])
}
