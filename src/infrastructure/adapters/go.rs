//! Go module privacy hints
//!
//! Go already honors the proxy variables and the system trust store, so the
//! only thing worth writing is a commented GOPRIVATE/GONOSUMDB template in
//! the first shell profile. It uses its own delimiter prefix so it can sit
//! next to the env_vars block.

use crate::domain::ports::{AdapterContext, AdapterEffect, AdapterError, ToolAdapter};
use crate::domain::services::MarkerStyle;
use crate::domain::value_objects::{Environment, ProxySettings, ToolStatus};
use crate::infrastructure::environment::shell_profiles;

pub const GO_MARKER: MarkerStyle = MarkerStyle::new("# go");

#[derive(Debug, Clone, Copy, Default)]
pub struct GoAdapter;

impl GoAdapter {
    pub fn render(env: &Environment) -> &'static str {
        if env.is_fish() {
            "# Go module settings for corporate proxy\n\
             # Set GOPRIVATE to your internal module paths, e.g.:\n\
             #   set -gx GOPRIVATE \"github.com/yourcompany/*,git.internal.com/*\"\n\
             # set -gx GONOSUMDB $GOPRIVATE\n"
        } else {
            "# Go module settings for corporate proxy\n\
             # Set GOPRIVATE to your internal module paths, e.g.:\n\
             #   export GOPRIVATE=\"github.com/yourcompany/*,git.internal.com/*\"\n\
             # export GONOSUMDB=\"$GOPRIVATE\"\n"
        }
    }
}

impl ToolAdapter for GoAdapter {
    fn name(&self) -> &'static str {
        "go"
    }

    fn is_available(&self, env: &Environment) -> bool {
        env.has_command("go")
    }

    fn apply(
        &self,
        _settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<AdapterEffect, AdapterError> {
        let profile = shell_profiles(ctx.env)
            .into_iter()
            .next()
            .ok_or(AdapterError::NoShellProfile)?;
        ctx.patcher
            .upsert(&profile, Self::render(ctx.env), GO_MARKER)?;
        ctx.note(
            self.name(),
            "Go reads HTTP_PROXY from env_vars; set GOPRIVATE for internal module hosts",
        );
        Ok(AdapterEffect::Done)
    }

    fn remove(&self, ctx: &AdapterContext<'_>) -> Result<AdapterEffect, AdapterError> {
        for profile in shell_profiles(ctx.env) {
            ctx.patcher.remove(&profile, GO_MARKER)?;
        }
        Ok(AdapterEffect::Done)
    }

    fn status(
        &self,
        _settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<ToolStatus, AdapterError> {
        if let Some(private) = std::env::var("GOPRIVATE").ok().filter(|v| !v.is_empty()) {
            return Ok(ToolStatus::configured().with_detail(format!("GOPRIVATE={private}")));
        }
        let written = shell_profiles(ctx.env)
            .iter()
            .any(|profile| ctx.patcher.has_block(profile, GO_MARKER));
        Ok(if written {
            ToolStatus::configured().with_detail("GOPRIVATE not yet set")
        } else {
            ToolStatus::not_configured()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::StatusLabel;
    use crate::infrastructure::adapters::EnvVarsAdapter;
    use crate::testing::Harness;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn go_block_coexists_with_env_block() {
        let home = tempdir().unwrap();
        fs::write(home.path().join(".bashrc"), "# rc\n").unwrap();
        let h = Harness::new(home.path(), ["go"]);
        let settings = ProxySettings::new("http://p:1", "http://p:1", "");

        h.run(|ctx| EnvVarsAdapter.apply(&settings, ctx)).unwrap();
        h.run(|ctx| GoAdapter.apply(&settings, ctx)).unwrap();
        h.run(|ctx| GoAdapter.remove(ctx)).unwrap();

        let content = fs::read_to_string(home.path().join(".bashrc")).unwrap();
        assert!(content.contains("# >>> ezproxy >>>"));
        assert!(!content.contains("# go >>> ezproxy >>>"));
    }

    #[test]
    fn status_reports_missing_goprivate() {
        let home = tempdir().unwrap();
        fs::write(home.path().join(".bashrc"), "").unwrap();
        let h = Harness::new(home.path(), ["go"]);
        let settings = ProxySettings::new("http://p:1", "http://p:1", "");

        h.run(|ctx| GoAdapter.apply(&settings, ctx)).unwrap();

        temp_env::with_var_unset("GOPRIVATE", || {
            let status = h.run(|ctx| GoAdapter.status(&settings, ctx)).unwrap();
            assert_eq!(status.label, StatusLabel::Configured);
            assert_eq!(status.to_string(), "configured (GOPRIVATE not yet set)");
        });
    }
}
