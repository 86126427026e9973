use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::ports::{CommandOutput, CommandRunner};

/// Runs real programs on the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn output(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        debug!(program, ?args, "running command");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    fn interactive(&self, program: &str, args: &[&str]) -> io::Result<bool> {
        debug!(program, ?args, "running interactive command");
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        Ok(status.success())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_status() {
        let out = SystemRunner.output("sh", &["-c", "printf hello"]).unwrap();
        assert!(out.success);
        assert_eq!(out.stdout, "hello");

        let out = SystemRunner.output("sh", &["-c", "exit 3"]).unwrap();
        assert!(!out.success);
    }

    #[test]
    fn missing_program_is_io_error() {
        assert!(SystemRunner
            .output("ezproxy-definitely-not-installed", &[])
            .is_err());
    }
}
