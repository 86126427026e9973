//! System package managers
//!
//! snap, apt and yum/dnf keep their proxy settings in root-owned places, so
//! every change is a privileged command batch. Apply uses required
//! semantics, removal is best-effort.

use std::path::PathBuf;

use crate::domain::ports::{AdapterContext, AdapterEffect, AdapterError, ToolAdapter};
use crate::domain::services::shell_quote;
use crate::domain::value_objects::{Environment, ProxySettings, ToolStatus};

#[derive(Debug, Clone, Copy, Default)]
pub struct SnapAdapter;

impl ToolAdapter for SnapAdapter {
    fn name(&self) -> &'static str {
        "snap"
    }

    fn is_available(&self, env: &Environment) -> bool {
        env.has_command("snap")
    }

    fn apply(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<AdapterEffect, AdapterError> {
        let mut commands = vec![
            format!("snap set system proxy.http={}", shell_quote(&settings.http)),
            format!("snap set system proxy.https={}", shell_quote(&settings.https)),
        ];
        if let Some(ca) = settings.ca_cert_path() {
            commands.push(format!(
                "snap set system store-certs.ezproxy=\"$(cat {})\"",
                shell_quote(&ca.display().to_string())
            ));
        }
        ctx.gateway.run(self.name(), &commands)
    }

    fn remove(&self, ctx: &AdapterContext<'_>) -> Result<AdapterEffect, AdapterError> {
        ctx.gateway.run_removal(
            self.name(),
            &[
                "snap unset system proxy.http".to_string(),
                "snap unset system proxy.https".to_string(),
                "snap unset system store-certs.ezproxy".to_string(),
            ],
        )
    }

    fn status(
        &self,
        _settings: &ProxySettings,
        _ctx: &AdapterContext<'_>,
    ) -> Result<ToolStatus, AdapterError> {
        Ok(ToolStatus::unknown().with_detail("check manually"))
    }
}

const APT_CONF: &str = "etc/apt/apt.conf.d/99ezproxy";

pub struct AptAdapter {
    root: PathBuf,
}

impl Default for AptAdapter {
    fn default() -> Self {
        Self::with_root("/")
    }
}

impl AptAdapter {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn conf(&self) -> PathBuf {
        self.root.join(APT_CONF)
    }

    fn render(settings: &ProxySettings) -> String {
        format!(
            "Acquire::http::Proxy \"{}\";\nAcquire::https::Proxy \"{}\";\n",
            settings.http, settings.https
        )
    }
}

impl ToolAdapter for AptAdapter {
    fn name(&self) -> &'static str {
        "apt"
    }

    fn is_available(&self, env: &Environment) -> bool {
        env.has_any_command(&["apt", "apt-get"])
    }

    fn apply(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<AdapterEffect, AdapterError> {
        let command = format!(
            "printf '%s' {} > {}",
            shell_quote(&Self::render(settings)),
            self.conf().display()
        );
        ctx.gateway.run(self.name(), &[command])
    }

    fn remove(&self, ctx: &AdapterContext<'_>) -> Result<AdapterEffect, AdapterError> {
        let conf = self.conf();
        if !conf.exists() {
            return Ok(AdapterEffect::Done);
        }
        ctx.gateway
            .run_removal(self.name(), &[format!("rm -f {}", conf.display())])
    }

    fn status(
        &self,
        settings: &ProxySettings,
        _ctx: &AdapterContext<'_>,
    ) -> Result<ToolStatus, AdapterError> {
        Ok(match std::fs::read_to_string(self.conf()) {
            Ok(current) if current == Self::render(settings) => ToolStatus::configured(),
            Ok(_) => ToolStatus::stale(),
            Err(_) => ToolStatus::not_configured(),
        })
    }
}

pub struct YumAdapter {
    root: PathBuf,
}

impl Default for YumAdapter {
    fn default() -> Self {
        Self::with_root("/")
    }
}

impl YumAdapter {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// dnf.conf when dnf is installed, yum.conf otherwise
    fn conf(&self, env: &Environment) -> PathBuf {
        if env.has_command("dnf") {
            self.root.join("etc/dnf/dnf.conf")
        } else {
            self.root.join("etc/yum.conf")
        }
    }

    /// Replace `key=` in place, or append it
    fn set_line(conf: &str, key: &str, value: &str) -> String {
        format!(
            "grep -q '^{key}=' {conf} && sed -i 's|^{key}=.*|{key}={value}|' {conf} || echo {line} >> {conf}",
            line = shell_quote(&format!("{key}={value}"))
        )
    }
}

impl ToolAdapter for YumAdapter {
    fn name(&self) -> &'static str {
        "yum"
    }

    fn is_available(&self, env: &Environment) -> bool {
        env.has_any_command(&["yum", "dnf"])
    }

    fn apply(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<AdapterEffect, AdapterError> {
        let conf = self.conf(ctx.env).display().to_string();
        let mut commands = vec![Self::set_line(&conf, "proxy", &settings.http)];
        if let Some(ca) = settings.ca_cert_path() {
            commands.push(Self::set_line(&conf, "sslcacert", &ca.display().to_string()));
        }
        ctx.gateway.run(self.name(), &commands)
    }

    fn remove(&self, ctx: &AdapterContext<'_>) -> Result<AdapterEffect, AdapterError> {
        let conf = self.conf(ctx.env);
        ctx.gateway.run_removal(
            self.name(),
            &[format!("sed -i '/^proxy=/d; /^sslcacert=/d' {}", conf.display())],
        )
    }

    fn status(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<ToolStatus, AdapterError> {
        let Ok(content) = std::fs::read_to_string(self.conf(ctx.env)) else {
            return Ok(ToolStatus::not_configured());
        };
        let current = content
            .lines()
            .find_map(|line| line.trim().strip_prefix("proxy="));
        Ok(match current {
            Some(proxy) if proxy.trim() == settings.http => ToolStatus::configured(),
            Some(_) => ToolStatus::stale(),
            None => ToolStatus::not_configured(),
        })
    }
}
