//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ApplyOrchestrator` - Apply/remove/status passes over the registry
//! - `ToggleUseCase` - Persist a new enablement selection, then act on the diff

pub mod orchestrator;
pub mod toggle;

pub use orchestrator::{
    AdapterReport, ApplyOrchestrator, ApplyOutcome, InventoryEntry, Operation, RunReport,
    StatusEntry, StatusState,
};
pub use toggle::{ToggleOutcome, ToggleUseCase};
