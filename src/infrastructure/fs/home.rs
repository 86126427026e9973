//! Home directory resolution with test isolation support.
//!
//! `dirs::home_dir()` ignores `HOME` on Windows, so integration tests point
//! `EZPROXY_HOME` at a temp dir instead. Everything that builds a path under
//! the user's home goes through `ezproxy_home_dir()`.

use std::path::PathBuf;

/// Environment variable overriding the home directory.
pub const EZPROXY_HOME_VAR: &str = "EZPROXY_HOME";

pub fn ezproxy_home_dir() -> Option<PathBuf> {
    std::env::var_os(EZPROXY_HOME_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}
