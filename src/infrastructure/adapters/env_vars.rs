//! Proxy environment variables in shell profiles
//!
//! Writes `HTTP_PROXY` and friends (plus CA bundle variables when a
//! certificate is configured) into every profile of the detected shell.
//! Fish gets `set -gx` lines in its own drop-in file.

use crate::domain::ports::{AdapterContext, AdapterEffect, AdapterError, ToolAdapter};
use crate::domain::services::MarkerStyle;
use crate::domain::value_objects::{Environment, ProxySettings, StatusLabel, ToolStatus};
use crate::infrastructure::environment::shell_profiles;

const CA_VARS: [&str; 4] = [
    "SSL_CERT_FILE",
    "REQUESTS_CA_BUNDLE",
    "CURL_CA_BUNDLE",
    "NODE_EXTRA_CA_CERTS",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct EnvVarsAdapter;

impl EnvVarsAdapter {
    /// Block body in the syntax of the detected shell
    pub fn render(settings: &ProxySettings, env: &Environment) -> String {
        let line = |name: &str, value: &str| {
            if env.is_fish() {
                format!("set -gx {name} {value}\n")
            } else {
                format!("export {name}={value}\n")
            }
        };

        let mut body = String::new();
        body.push_str(&line("HTTP_PROXY", &settings.http));
        body.push_str(&line("HTTPS_PROXY", &settings.https));
        body.push_str(&line("http_proxy", &settings.http));
        body.push_str(&line("https_proxy", &settings.https));
        body.push_str(&line("NO_PROXY", &settings.no_proxy));
        body.push_str(&line("no_proxy", &settings.no_proxy));
        if let Some(ca) = settings.ca_cert_path() {
            let ca = ca.display().to_string();
            for name in CA_VARS {
                body.push_str(&line(name, &ca));
            }
        }
        body.push_str(&line("HOMEBREW_CURLRC", "1"));
        body
    }
}

impl ToolAdapter for EnvVarsAdapter {
    fn name(&self) -> &'static str {
        "env_vars"
    }

    fn is_available(&self, _env: &Environment) -> bool {
        true
    }

    fn apply(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<AdapterEffect, AdapterError> {
        let profiles = shell_profiles(ctx.env);
        if profiles.is_empty() {
            return Err(AdapterError::NoShellProfile);
        }
        let body = Self::render(settings, ctx.env);
        for profile in profiles {
            ctx.patcher.upsert(&profile, &body, MarkerStyle::HASH)?;
        }
        Ok(AdapterEffect::Done)
    }

    fn remove(&self, ctx: &AdapterContext<'_>) -> Result<AdapterEffect, AdapterError> {
        for profile in shell_profiles(ctx.env) {
            ctx.patcher.remove(&profile, MarkerStyle::HASH)?;
        }
        Ok(AdapterEffect::Done)
    }

    fn status(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<ToolStatus, AdapterError> {
        let expected = Self::render(settings, ctx.env);
        let mut status = ToolStatus::not_configured();
        for profile in shell_profiles(ctx.env) {
            let current = ctx.patcher.find_block_body(&profile, MarkerStyle::HASH)?;
            let found = ToolStatus::from_block(current.as_deref(), &expected);
            match found.label {
                StatusLabel::Configured => return Ok(found),
                StatusLabel::Stale => status = found,
                _ => {}
            }
        }
        Ok(status)
    }
}
