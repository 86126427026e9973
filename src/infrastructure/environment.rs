//! Machine probing
//!
//! Builds the `Environment` value from the running system and resolves the
//! shell profiles the env-var style adapters write into.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::fs::ezproxy_home_dir;
use crate::domain::value_objects::{CommandProbe, DistroFamily, Environment, OsKind};
use crate::error::{EzproxyError, EzproxyResult};

const OS_RELEASE: &str = "/etc/os-release";

/// `CommandProbe` backed by a `$PATH` lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct WhichProbe;

impl CommandProbe for WhichProbe {
    fn is_installed(&self, command: &str) -> bool {
        which::which(command).is_ok()
    }
}

/// Probe the current machine
pub fn detect() -> EzproxyResult<Environment> {
    let home = ezproxy_home_dir().ok_or(EzproxyError::NoHomeDir)?;
    let os = OsKind::current();
    let distro = match os {
        OsKind::Linux => std::fs::read_to_string(OS_RELEASE)
            .ok()
            .and_then(|content| os_release_id(&content))
            .map(|id| DistroFamily::from_id(&id))
            .unwrap_or(DistroFamily::Unknown),
        _ => DistroFamily::Unknown,
    };
    let shell = std::env::var("SHELL").ok().and_then(|s| shell_name(&s));

    let env = Environment::new(os, distro, shell, home, Box::new(WhichProbe));
    debug!(?env, "detected environment");
    Ok(env)
}

/// Value of the `ID=` line, lowercased and unquoted
pub fn os_release_id(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.trim().strip_prefix("ID=")?;
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then(|| value.to_lowercase())
    })
}

/// Basename of a `$SHELL` value
pub fn shell_name(shell: &str) -> Option<String> {
    Path::new(shell.trim())
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

/// Fish drop-in written by the env-var adapters
pub fn fish_drop_in(env: &Environment) -> PathBuf {
    env.home_path(".config/fish/conf.d/ezproxy.fish")
}

/// Profile files to manage for the detected shell
///
/// Only existing files are returned, except the fish drop-in, which is
/// ours and created on demand.
pub fn shell_profiles(env: &Environment) -> Vec<PathBuf> {
    let existing = |names: &[&str]| -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| env.home_path(name))
            .filter(|path| path.is_file())
            .collect()
    };

    match env.shell.as_deref() {
        Some("fish") => vec![fish_drop_in(env)],
        Some("zsh") => existing(&[".zshrc", ".zprofile"]),
        Some("bash") => {
            let profiles = existing(&[".bashrc", ".bash_profile"]);
            if profiles.is_empty() {
                existing(&[".profile"])
            } else {
                profiles
            }
        }
        _ => existing(&[".profile", ".bashrc", ".bash_profile", ".zshrc"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn env_with_shell(home: &Path, shell: Option<&str>) -> Environment {
        Environment::fixed(home, Vec::<String>::new()).with_shell(shell)
    }

    #[test]
    fn parses_os_release_id() {
        let content = "NAME=\"Ubuntu\"\nVERSION_ID=\"24.04\"\nID=ubuntu\nID_LIKE=debian\n";
        assert_eq!(os_release_id(content).as_deref(), Some("ubuntu"));
        assert_eq!(os_release_id("ID=\"Fedora\"\n").as_deref(), Some("fedora"));
        assert_eq!(os_release_id("NAME=x\n"), None);
    }

    #[test]
    fn shell_name_is_basename() {
        assert_eq!(shell_name("/usr/bin/zsh").as_deref(), Some("zsh"));
        assert_eq!(shell_name("/opt/homebrew/bin/fish").as_deref(), Some("fish"));
        assert_eq!(shell_name(""), None);
    }

    #[test]
    fn bash_profiles_fall_back_to_profile() {
        let home = tempdir().unwrap();
        fs::write(home.path().join(".profile"), "").unwrap();
        let env = env_with_shell(home.path(), Some("bash"));

        assert_eq!(shell_profiles(&env), vec![home.path().join(".profile")]);

        fs::write(home.path().join(".bashrc"), "").unwrap();
        assert_eq!(shell_profiles(&env), vec![home.path().join(".bashrc")]);
    }

    #[test]
    fn zsh_only_uses_existing_files() {
        let home = tempdir().unwrap();
        fs::write(home.path().join(".zprofile"), "").unwrap();
        fs::write(home.path().join(".bashrc"), "").unwrap();
        let env = env_with_shell(home.path(), Some("zsh"));

        assert_eq!(shell_profiles(&env), vec![home.path().join(".zprofile")]);
    }

    #[test]
    fn fish_drop_in_is_returned_even_if_missing() {
        let home = tempdir().unwrap();
        let env = env_with_shell(home.path(), Some("fish"));

        assert_eq!(
            shell_profiles(&env),
            vec![home.path().join(".config/fish/conf.d/ezproxy.fish")]
        );
    }

    #[test]
    fn unknown_shell_scans_common_files() {
        let home = tempdir().unwrap();
        fs::write(home.path().join(".zshrc"), "").unwrap();
        fs::write(home.path().join(".profile"), "").unwrap();
        let env = env_with_shell(home.path(), None);

        assert_eq!(
            shell_profiles(&env),
            vec![home.path().join(".profile"), home.path().join(".zshrc")]
        );
    }
}
