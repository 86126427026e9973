//! Domain Services
//!
//! - `marker_block` - pure string rules for the delimited ezproxy region
//! - `patcher` - applies those rules to files, honoring dry runs
//! - `registry` - the ordered adapter list
//! - `privileged` - confirmation and execution of elevated commands
//! - `state_diff` - enable/disable deltas between stored and desired state

pub mod marker_block;
pub mod patcher;
pub mod privileged;
pub mod registry;
pub mod state_diff;

pub use marker_block::{MarkerStyle, END_SENTINEL, START_SENTINEL};
pub use patcher::{PatchAction, PatchPlan, TextRegionPatcher};
pub use privileged::{display_command, shell_quote, PrivilegedGateway};
pub use registry::AdapterRegistry;
pub use state_diff::StateDiff;
