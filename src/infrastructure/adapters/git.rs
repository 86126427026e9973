//! Git
//!
//! Configured through `git config --global` rather than by editing
//! `~/.gitconfig`, so git's own quoting rules apply.

use tracing::debug;

use crate::domain::ports::{
    AdapterContext, AdapterEffect, AdapterError, RunEvent, ToolAdapter,
};
use crate::domain::value_objects::{Environment, ProxySettings, ToolStatus};

const KEYS: [&str; 2] = ["http.proxy", "http.sslCAInfo"];

#[derive(Debug, Clone, Copy, Default)]
pub struct GitAdapter;

impl GitAdapter {
    fn set_commands(settings: &ProxySettings) -> Vec<Vec<String>> {
        let mut commands = vec![vec![
            "config".to_string(),
            "--global".to_string(),
            KEYS[0].to_string(),
            settings.http.clone(),
        ]];
        if let Some(ca) = settings.ca_cert_path() {
            commands.push(vec![
                "config".to_string(),
                "--global".to_string(),
                KEYS[1].to_string(),
                ca.display().to_string(),
            ]);
        }
        commands
    }

    fn unset_commands() -> Vec<Vec<String>> {
        KEYS.iter()
            .map(|key| {
                ["config", "--global", "--unset", *key]
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .collect()
    }

    fn simulate(ctx: &AdapterContext<'_>, commands: &[Vec<String>]) {
        ctx.events.on_event(RunEvent::CommandsSimulated {
            operation: "git".to_string(),
            commands: commands
                .iter()
                .map(|args| format!("git {}", args.join(" ")))
                .collect(),
        });
    }
}

impl ToolAdapter for GitAdapter {
    fn name(&self) -> &'static str {
        "git"
    }

    fn is_available(&self, env: &Environment) -> bool {
        env.has_command("git")
    }

    fn apply(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<AdapterEffect, AdapterError> {
        let commands = Self::set_commands(settings);
        if ctx.exec.dry_run {
            Self::simulate(ctx, &commands);
            return Ok(AdapterEffect::Done);
        }

        for args in &commands {
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            let failed = |detail: String| AdapterError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                detail,
            };
            match ctx.runner.output("git", &args) {
                Ok(out) if out.success => {}
                Ok(_) => return Err(failed("non-zero exit status".to_string())),
                Err(err) => return Err(failed(err.to_string())),
            }
        }
        Ok(AdapterEffect::Done)
    }

    fn remove(&self, ctx: &AdapterContext<'_>) -> Result<AdapterEffect, AdapterError> {
        let commands = Self::unset_commands();
        if ctx.exec.dry_run {
            Self::simulate(ctx, &commands);
            return Ok(AdapterEffect::Done);
        }

        // `--unset` exits non-zero when the key is already gone
        for args in &commands {
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            if let Err(err) = ctx.runner.output("git", &args) {
                debug!(%err, "git config --unset failed");
            }
        }
        Ok(AdapterEffect::Done)
    }

    fn status(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<ToolStatus, AdapterError> {
        let current = match ctx.runner.output("git", &["config", "--global", KEYS[0]]) {
            Ok(out) if out.success => out.stdout.trim().to_string(),
            _ => String::new(),
        };
        Ok(if current.is_empty() {
            ToolStatus::not_configured()
        } else if current == settings.http {
            ToolStatus::configured()
        } else {
            ToolStatus::stale().with_detail(format!("http.proxy={current}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CommandOutput;
    use crate::domain::value_objects::StatusLabel;
    use crate::testing::Harness;
    use tempfile::tempdir;

    fn settings() -> ProxySettings {
        ProxySettings::new("http://p:8080", "http://p:8080", "").with_ca_cert("/c/ca.pem")
    }

    #[test]
    fn apply_sets_proxy_and_ca() {
        let home = tempdir().unwrap();
        let h = Harness::new(home.path(), ["git"]);

        h.run(|ctx| GitAdapter.apply(&settings(), ctx)).unwrap();

        assert_eq!(
            h.runner.calls(),
            vec![
                "git config --global http.proxy http://p:8080",
                "git config --global http.sslCAInfo /c/ca.pem",
            ]
        );
    }

    #[test]
    fn apply_failure_is_reported() {
        let home = tempdir().unwrap();
        let h = Harness::new(home.path(), ["git"]);
        h.runner.fail_on("http.proxy");

        let err = h.run(|ctx| GitAdapter.apply(&settings(), ctx)).unwrap_err();
        assert!(matches!(err, AdapterError::CommandFailed { .. }));
    }

    #[test]
    fn dry_run_runs_nothing() {
        let home = tempdir().unwrap();
        let h = Harness::new(home.path(), ["git"]).dry_run();

        h.run(|ctx| GitAdapter.remove(ctx)).unwrap();

        assert!(h.runner.calls().is_empty());
        assert!(matches!(
            &h.events.events()[..],
            [RunEvent::CommandsSimulated { commands, .. }] if commands.len() == 2
        ));
    }

    #[test]
    fn status_compares_current_proxy() {
        let home = tempdir().unwrap();
        let h = Harness::new(home.path(), ["git"]);
        let query = "git config --global http.proxy";

        h.runner.respond(query, CommandOutput::ok("http://p:8080\n"));
        let status = h.run(|ctx| GitAdapter.status(&settings(), ctx)).unwrap();
        assert_eq!(status.label, StatusLabel::Configured);

        h.runner.respond(query, CommandOutput::ok("http://old:3128\n"));
        let status = h.run(|ctx| GitAdapter.status(&settings(), ctx)).unwrap();
        assert_eq!(status.label, StatusLabel::Stale);

        h.runner.respond(query, CommandOutput::failed());
        let status = h.run(|ctx| GitAdapter.status(&settings(), ctx)).unwrap();
        assert_eq!(status.label, StatusLabel::NotConfigured);
    }
}
