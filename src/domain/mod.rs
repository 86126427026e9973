//! Domain Layer
//!
//! The core of ezproxy: settings, enablement, the adapter contract and the
//! marker-block rules shared by every adapter.
//!
//! ## Structure
//!
//! - `entities/` - Persisted documents (Settings, EnablementMap)
//! - `value_objects/` - Immutable value types (ProxySettings, ToolStatus, Environment)
//! - `services/` - Marker blocks, region patcher, privileged gateway, state diff
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **Ports & Adapters** - All I/O goes through trait-defined ports
//! 2. **Pure text rules** - Marker block placement is computed on strings first

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
