//! System trust store
//!
//! Installs the corporate CA into the OS trust store through the privileged
//! gateway. Runs first so later tools can rely on the anchor.

use std::path::{Path, PathBuf};

use crate::domain::ports::{AdapterContext, AdapterEffect, AdapterError, ToolAdapter};
use crate::domain::services::shell_quote;
use crate::domain::value_objects::{DistroFamily, Environment, OsKind, ProxySettings, ToolStatus};

const DEBIAN_ANCHOR: &str = "usr/local/share/ca-certificates/ezproxy-corp-ca.crt";
const RHEL_ANCHOR: &str = "etc/pki/ca-trust/source/anchors/ezproxy-corp-ca.pem";
const MAC_KEYCHAIN: &str = "/Library/Keychains/System.keychain";

pub struct SystemCaAdapter {
    root: PathBuf,
}

impl Default for SystemCaAdapter {
    fn default() -> Self {
        Self::with_root("/")
    }
}

impl SystemCaAdapter {
    /// Resolve system paths under `root` instead of `/`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn anchor(&self, env: &Environment) -> Option<PathBuf> {
        if env.os != OsKind::Linux {
            return None;
        }
        match env.distro {
            DistroFamily::Debian => Some(self.root.join(DEBIAN_ANCHOR)),
            DistroFamily::Rhel => Some(self.root.join(RHEL_ANCHOR)),
            _ => None,
        }
    }

    fn install_commands(&self, env: &Environment, cert: &Path) -> Option<Vec<String>> {
        let cert = shell_quote(&cert.display().to_string());
        let anchor = self.anchor(env).map(|p| p.display().to_string());
        match (env.os, env.distro, anchor) {
            (OsKind::MacOs, _, _) => Some(vec![format!(
                "security add-trusted-cert -d -r trustRoot -k {MAC_KEYCHAIN} {cert}"
            )]),
            (OsKind::Linux, DistroFamily::Debian, Some(anchor)) => Some(vec![
                format!("cp {cert} {anchor}"),
                "update-ca-certificates".to_string(),
            ]),
            (OsKind::Linux, DistroFamily::Rhel, Some(anchor)) => Some(vec![
                format!("cp {cert} {anchor}"),
                "update-ca-trust extract".to_string(),
            ]),
            (OsKind::Linux, DistroFamily::Arch, _) => {
                Some(vec![format!("trust anchor --store {cert}")])
            }
            _ => None,
        }
    }

    fn removal_commands(&self, env: &Environment) -> Option<Vec<String>> {
        let anchor = self.anchor(env).map(|p| p.display().to_string());
        match (env.os, env.distro, anchor) {
            (OsKind::Linux, DistroFamily::Debian, Some(anchor)) => Some(vec![
                format!("rm -f {anchor}"),
                "update-ca-certificates --fresh".to_string(),
            ]),
            (OsKind::Linux, DistroFamily::Rhel, Some(anchor)) => Some(vec![
                format!("rm -f {anchor}"),
                "update-ca-trust extract".to_string(),
            ]),
            (OsKind::Linux, DistroFamily::Arch, _) => {
                Some(vec!["trust anchor --remove ezproxy-corp-ca.pem".to_string()])
            }
            _ => None,
        }
    }
}

impl ToolAdapter for SystemCaAdapter {
    fn name(&self) -> &'static str {
        "system_ca"
    }

    fn is_available(&self, _env: &Environment) -> bool {
        true
    }

    fn apply(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<AdapterEffect, AdapterError> {
        let cert = settings.ca_cert_path().ok_or(AdapterError::MissingCaCert)?;
        if !cert.is_file() {
            return Err(AdapterError::CaCertNotFound {
                path: cert.to_path_buf(),
            });
        }

        // already installed with identical bytes
        if let Some(anchor) = self.anchor(ctx.env) {
            if same_contents(cert, &anchor) {
                ctx.note(self.name(), "CA cert is already in the system trust store");
                return Ok(AdapterEffect::Done);
            }
        }

        match self.install_commands(ctx.env, cert) {
            Some(commands) => ctx.gateway.run(self.name(), &commands),
            None => {
                ctx.note(
                    self.name(),
                    format!(
                        "unknown platform: copy {} into your system CA directory and refresh the trust store manually",
                        cert.display()
                    ),
                );
                Ok(AdapterEffect::Manual)
            }
        }
    }

    fn remove(&self, ctx: &AdapterContext<'_>) -> Result<AdapterEffect, AdapterError> {
        if ctx.env.os == OsKind::MacOs {
            ctx.note(
                self.name(),
                "open Keychain Access > System > Certificates and delete the corporate CA",
            );
            return Ok(AdapterEffect::Manual);
        }
        match self.removal_commands(ctx.env) {
            Some(commands) => ctx.gateway.run_removal(self.name(), &commands),
            None => {
                ctx.note(
                    self.name(),
                    "unknown platform: remove the corporate CA from your system trust store manually",
                );
                Ok(AdapterEffect::Manual)
            }
        }
    }

    fn status(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<ToolStatus, AdapterError> {
        let Some(cert) = settings.ca_cert_path() else {
            return Ok(ToolStatus::not_configured().with_detail("no cert configured"));
        };
        let Some(anchor) = self.anchor(ctx.env) else {
            return Ok(ToolStatus::unknown().with_detail("check the trust store manually"));
        };
        Ok(if !anchor.exists() {
            ToolStatus::not_configured()
        } else if same_contents(cert, &anchor) {
            ToolStatus::configured()
        } else {
            ToolStatus::stale().with_detail("installed cert differs")
        })
    }
}

fn same_contents(a: &Path, b: &Path) -> bool {
    match (std::fs::read(a), std::fs::read(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
