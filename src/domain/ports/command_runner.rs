//! Command runner port - executes external programs
//!
//! Used by adapters that configure tools through their own CLI (`git config`)
//! and by the privileged gateway (`sudo sh -c ...`).

use std::io;

/// Captured result of a non-interactive command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }
}

pub trait CommandRunner {
    /// Run with captured output
    fn output(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput>;

    /// Run attached to the terminal (so `sudo` can ask for a password).
    /// Returns whether the command exited successfully.
    fn interactive(&self, program: &str, args: &[&str]) -> io::Result<bool>;
}
