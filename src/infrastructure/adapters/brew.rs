//! Homebrew
//!
//! Nothing to write: brew picks up the proxy through `HOMEBREW_CURLRC=1`,
//! which the env_vars block exports.

use crate::domain::ports::{AdapterContext, AdapterEffect, AdapterError, ToolAdapter};
use crate::domain::services::MarkerStyle;
use crate::domain::value_objects::{Environment, ProxySettings, ToolStatus};
use crate::infrastructure::environment::shell_profiles;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrewAdapter;

impl ToolAdapter for BrewAdapter {
    fn name(&self) -> &'static str {
        "brew"
    }

    fn is_available(&self, env: &Environment) -> bool {
        env.has_command("brew")
    }

    fn apply(
        &self,
        _settings: &ProxySettings,
        _ctx: &AdapterContext<'_>,
    ) -> Result<AdapterEffect, AdapterError> {
        Ok(AdapterEffect::Done)
    }

    fn remove(&self, _ctx: &AdapterContext<'_>) -> Result<AdapterEffect, AdapterError> {
        Ok(AdapterEffect::Done)
    }

    fn status(
        &self,
        _settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<ToolStatus, AdapterError> {
        let via_env = shell_profiles(ctx.env)
            .iter()
            .any(|profile| ctx.patcher.has_block(profile, MarkerStyle::HASH));
        Ok(if via_env {
            ToolStatus::configured().with_detail("via env_vars")
        } else {
            ToolStatus::not_configured()
        })
    }
}
