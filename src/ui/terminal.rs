//! Terminal capability detection
//!
//! Decides color and unicode support from the environment and whether
//! stdout is a TTY.

use is_terminal::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub is_ci: bool,
}

impl TerminalCapabilities {
    /// A pipe: no color, ASCII icons
    pub const PIPE: Self = Self {
        is_tty: false,
        supports_color: false,
        supports_unicode: false,
        is_ci: false,
    };
}

pub fn detect_capabilities() -> TerminalCapabilities {
    capabilities_from(|key| std::env::var(key).ok(), std::io::stdout().is_terminal())
}

fn capabilities_from(get_env: impl Fn(&str) -> Option<String>, is_tty: bool) -> TerminalCapabilities {
    let dumb = get_env("TERM").is_some_and(|term| term.eq_ignore_ascii_case("dumb"));
    let no_color = get_env("NO_COLOR").is_some_and(|v| !v.is_empty());

    TerminalCapabilities {
        is_tty,
        supports_color: is_tty && !dumb && !no_color,
        supports_unicode: !dumb && !ascii_locale(&get_env),
        is_ci: ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "JENKINS_HOME", "BUILDKITE"]
            .iter()
            .any(|key| get_env(key).is_some()),
    }
}

/// `LANG=C` style locales; anything else is assumed to render UTF-8
fn ascii_locale(get_env: &impl Fn(&str) -> Option<String>) -> bool {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .find_map(|key| get_env(key).filter(|v| !v.is_empty()))
        .is_some_and(|locale| matches!(locale.as_str(), "C" | "POSIX"))
}
