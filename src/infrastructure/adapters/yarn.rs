//! Yarn
//!
//! Classic yarn (1.x) reads `~/.yarnrc`; berry (2+) reads `~/.yarnrc.yml`
//! with different keys. The installed major version picks the file.

use std::path::PathBuf;

use crate::domain::ports::{AdapterContext, AdapterEffect, AdapterError, ToolAdapter};
use crate::domain::services::MarkerStyle;
use crate::domain::value_objects::{Environment, ProxySettings, StatusLabel, ToolStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YarnFlavor {
    Classic,
    Berry,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YarnAdapter;

impl YarnAdapter {
    fn flavor(ctx: &AdapterContext<'_>) -> YarnFlavor {
        match ctx.runner.output("yarn", &["--version"]) {
            Ok(out) if out.success => parse_flavor(&out.stdout),
            _ => YarnFlavor::Classic,
        }
    }

    fn path(env: &Environment, flavor: YarnFlavor) -> PathBuf {
        match flavor {
            YarnFlavor::Classic => env.home_path(".yarnrc"),
            YarnFlavor::Berry => env.home_path(".yarnrc.yml"),
        }
    }

    fn render(settings: &ProxySettings, flavor: YarnFlavor) -> String {
        let ca = settings.ca_cert_path().map(|p| p.display().to_string());
        match flavor {
            YarnFlavor::Classic => {
                let mut body = format!(
                    "proxy \"{}\"\nhttps-proxy \"{}\"\n",
                    settings.http, settings.https
                );
                if let Some(ca) = ca {
                    body.push_str(&format!("cafile \"{ca}\"\n"));
                }
                body
            }
            YarnFlavor::Berry => {
                let mut body = format!(
                    "httpProxy: \"{}\"\nhttpsProxy: \"{}\"\n",
                    settings.http, settings.https
                );
                if let Some(ca) = ca {
                    body.push_str(&format!("caFilePath: \"{ca}\"\n"));
                }
                body
            }
        }
    }
}

fn parse_flavor(version: &str) -> YarnFlavor {
    let major = version
        .trim()
        .split('.')
        .next()
        .and_then(|m| m.parse::<u32>().ok());
    match major {
        Some(m) if m >= 2 => YarnFlavor::Berry,
        _ => YarnFlavor::Classic,
    }
}

impl ToolAdapter for YarnAdapter {
    fn name(&self) -> &'static str {
        "yarn"
    }

    fn is_available(&self, env: &Environment) -> bool {
        env.has_command("yarn")
    }

    fn apply(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<AdapterEffect, AdapterError> {
        let flavor = Self::flavor(ctx);
        ctx.patcher.upsert(
            &Self::path(ctx.env, flavor),
            &Self::render(settings, flavor),
            MarkerStyle::HASH,
        )?;
        Ok(AdapterEffect::Done)
    }

    /// Cleans both files; the installed version may have changed since apply
    fn remove(&self, ctx: &AdapterContext<'_>) -> Result<AdapterEffect, AdapterError> {
        for flavor in [YarnFlavor::Classic, YarnFlavor::Berry] {
            ctx.patcher
                .remove(&Self::path(ctx.env, flavor), MarkerStyle::HASH)?;
        }
        Ok(AdapterEffect::Done)
    }

    fn status(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<ToolStatus, AdapterError> {
        let mut status = ToolStatus::not_configured();
        for flavor in [YarnFlavor::Classic, YarnFlavor::Berry] {
            let current = ctx
                .patcher
                .find_block_body(&Self::path(ctx.env, flavor), MarkerStyle::HASH)?;
            let found = ToolStatus::from_block(current.as_deref(), &Self::render(settings, flavor));
            match found.label {
                StatusLabel::Configured => return Ok(found),
                StatusLabel::Stale => status = found,
                _ => {}
            }
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CommandOutput;
    use crate::testing::Harness;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn version_picks_flavor() {
        assert_eq!(parse_flavor("1.22.19\n"), YarnFlavor::Classic);
        assert_eq!(parse_flavor("4.1.0"), YarnFlavor::Berry);
        assert_eq!(parse_flavor("garbage"), YarnFlavor::Classic);
    }

    #[test]
    fn berry_writes_yarnrc_yml() {
        let home = tempdir().unwrap();
        let h = Harness::new(home.path(), ["yarn"]);
        h.runner.respond("yarn --version", CommandOutput::ok("3.6.4\n"));
        let settings = ProxySettings::new("http://p:1", "http://p:2", "");

        h.run(|ctx| YarnAdapter.apply(&settings, ctx)).unwrap();

        let content = fs::read_to_string(home.path().join(".yarnrc.yml")).unwrap();
        assert!(content.contains("httpsProxy: \"http://p:2\"\n"));
        assert!(!home.path().join(".yarnrc").exists());

        let status = h.run(|ctx| YarnAdapter.status(&settings, ctx)).unwrap();
        assert_eq!(status.label, StatusLabel::Configured);
    }

    #[test]
    fn remove_cleans_both_files() {
        let home = tempdir().unwrap();
        let h = Harness::new(home.path(), ["yarn"]);
        let settings = ProxySettings::new("http://p:1", "http://p:1", "");
        h.runner.respond("yarn --version", CommandOutput::ok("1.22.0"));
        h.run(|ctx| YarnAdapter.apply(&settings, ctx)).unwrap();
        h.runner.respond("yarn --version", CommandOutput::ok("4.0.0"));
        h.run(|ctx| YarnAdapter.apply(&settings, ctx)).unwrap();

        h.run(|ctx| YarnAdapter.remove(ctx)).unwrap();

        for name in [".yarnrc", ".yarnrc.yml"] {
            let content = fs::read_to_string(home.path().join(name)).unwrap();
            assert!(!content.contains("ezproxy"));
        }
    }
}
