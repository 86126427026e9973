//! Environment value object
//!
//! What adapters may look at when deciding availability and target paths:
//! operating system, distro family, login shell, home directory and a probe
//! for installed commands. Detection lives in `infrastructure::environment`.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsKind {
    Linux,
    MacOs,
    Other,
}

impl OsKind {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "linux" => OsKind::Linux,
            "macos" => OsKind::MacOs,
            _ => OsKind::Other,
        }
    }
}

/// Linux distribution family, keyed off `/etc/os-release` `ID=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistroFamily {
    Debian,
    Rhel,
    Arch,
    Unknown,
}

impl DistroFamily {
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_lowercase().as_str() {
            "debian" | "ubuntu" | "pop" | "mint" => DistroFamily::Debian,
            "fedora" | "rhel" | "centos" | "rocky" | "alma" => DistroFamily::Rhel,
            "arch" | "manjaro" | "endeavouros" => DistroFamily::Arch,
            _ => DistroFamily::Unknown,
        }
    }
}

/// Answers "is this command installed?"
///
/// Implementations must be side-effect free.
pub trait CommandProbe {
    fn is_installed(&self, command: &str) -> bool;
}

/// Probe backed by a fixed set of command names
#[derive(Debug, Clone, Default)]
pub struct FixedCommands(BTreeSet<String>);

impl FixedCommands {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(commands.into_iter().map(Into::into).collect())
    }
}

impl CommandProbe for FixedCommands {
    fn is_installed(&self, command: &str) -> bool {
        self.0.contains(command)
    }
}

/// Snapshot of the machine the tool is running on
pub struct Environment {
    pub os: OsKind,
    pub distro: DistroFamily,
    /// Login shell basename (`zsh`, `bash`, `fish`, ...)
    pub shell: Option<String>,
    pub home: PathBuf,
    commands: Box<dyn CommandProbe>,
}

impl Environment {
    pub fn new(
        os: OsKind,
        distro: DistroFamily,
        shell: Option<String>,
        home: impl Into<PathBuf>,
        commands: Box<dyn CommandProbe>,
    ) -> Self {
        Self {
            os,
            distro,
            shell,
            home: home.into(),
            commands,
        }
    }

    /// Linux/bash environment rooted at `home` with the given commands installed
    pub fn fixed<I, S>(home: impl Into<PathBuf>, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            OsKind::Linux,
            DistroFamily::Debian,
            Some("bash".to_string()),
            home,
            Box::new(FixedCommands::new(commands)),
        )
    }

    pub fn with_os(mut self, os: OsKind) -> Self {
        self.os = os;
        self
    }

    pub fn with_distro(mut self, distro: DistroFamily) -> Self {
        self.distro = distro;
        self
    }

    pub fn with_shell(mut self, shell: Option<&str>) -> Self {
        self.shell = shell.map(str::to_string);
        self
    }

    pub fn has_command(&self, command: &str) -> bool {
        self.commands.is_installed(command)
    }

    pub fn has_any_command(&self, commands: &[&str]) -> bool {
        commands.iter().any(|c| self.has_command(c))
    }

    /// Path under the home directory
    pub fn home_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.home.join(relative)
    }

    pub fn is_fish(&self) -> bool {
        self.shell.as_deref() == Some("fish")
    }

    /// Expand a leading `~/` against this environment's home
    pub fn expand_home(&self, path: &str) -> PathBuf {
        match path.strip_prefix("~/") {
            Some(rest) => self.home.join(rest),
            None if path == "~" => self.home.clone(),
            None => PathBuf::from(path),
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("os", &self.os)
            .field("distro", &self.distro)
            .field("shell", &self.shell)
            .field("home", &self.home)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distro_family_classification() {
        assert_eq!(DistroFamily::from_id("ubuntu"), DistroFamily::Debian);
        assert_eq!(DistroFamily::from_id("\"Rocky\""), DistroFamily::Unknown);
        assert_eq!(DistroFamily::from_id("rocky"), DistroFamily::Rhel);
        assert_eq!(DistroFamily::from_id("manjaro"), DistroFamily::Arch);
        assert_eq!(DistroFamily::from_id(""), DistroFamily::Unknown);
    }

    #[test]
    fn fixed_environment_probes_commands() {
        let env = Environment::fixed("/home/u", ["git", "pip3"]);
        assert!(env.has_command("git"));
        assert!(!env.has_command("npm"));
        assert!(env.has_any_command(&["pip", "pip3"]));
    }

    #[test]
    fn expand_home_only_touches_tilde_prefix() {
        let env = Environment::fixed("/home/u", Vec::<String>::new());
        assert_eq!(env.expand_home("~/ca.pem"), PathBuf::from("/home/u/ca.pem"));
        assert_eq!(env.expand_home("/etc/ca.pem"), PathBuf::from("/etc/ca.pem"));
        assert_eq!(env.expand_home("~user/ca.pem"), PathBuf::from("~user/ca.pem"));
    }
}
