//! Domain Entities
//!
//! The persisted settings document and its enablement map.

mod enablement;
mod settings;

pub use enablement::{Enablement, EnablementMap};
pub use settings::{ProxyConfig, Settings};
