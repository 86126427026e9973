//! Isolated environment for running the ezproxy binary.
//!
//! Every run gets its own home directory, a settings path inside it and an
//! empty `$PATH`, so no real tool is ever detected and no `sudo` can run.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running an ezproxy CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse each stdout line as a JSON event
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("not a JSON event: {line:?} ({e})"))
            })
            .collect()
    }

    /// Last event with `"event": name`
    pub fn event(&self, name: &str) -> serde_json::Value {
        self.events()
            .into_iter()
            .rev()
            .find(|event| event["event"] == name)
            .unwrap_or_else(|| panic!("no {name:?} event in:\n{}", self.stdout))
    }
}

pub struct TestEnv {
    pub home_dir: TempDir,
    /// Empty directory used as `$PATH`
    bin_dir: TempDir,
    ezproxy_bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home_dir: TempDir::new().expect("create home dir"),
            bin_dir: TempDir::new().expect("create bin dir"),
            ezproxy_bin: PathBuf::from(env!("CARGO_BIN_EXE_ezproxy")),
        }
    }

    /// Environment with a `.bashrc` and a settings document already written
    pub fn initialized(settings: &str) -> Self {
        let env = Self::new();
        env.write_home_file(".bashrc", "# user bashrc\nexport EDITOR=vim\n");
        env.write_settings(settings);
        env
    }

    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.path().join(relative)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.home_path(".config/ezproxy/config.yaml")
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.ezproxy_bin);
        cmd.current_dir(self.home_dir.path())
            .args(args)
            .env_clear()
            .env("HOME", self.home_dir.path())
            .env("EZPROXY_HOME", self.home_dir.path())
            .env("EZPROXY_CONFIG", self.settings_path())
            .env("PATH", self.bin_dir.path())
            .env("SHELL", "/bin/bash")
            .env("NO_COLOR", "1");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute ezproxy");
        to_result(output)
    }

    pub fn read_home_file(&self, relative: &str) -> String {
        let path = self.home_path(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    pub fn write_home_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.home_path(relative);
        write_file(&path, content);
        path
    }

    pub fn write_settings(&self, content: &str) {
        write_file(&self.settings_path(), content);
    }

    pub fn read_settings(&self) -> String {
        std::fs::read_to_string(self.settings_path()).expect("read settings")
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
