//! File System Implementations
//!
//! Concrete implementation of the FileSystem port plus home resolution.

mod home;
mod local;

pub use home::{ezproxy_home_dir, EZPROXY_HOME_VAR};
pub use local::{atomic_write, LocalFs};
