//! Docker
//!
//! Client side: a `proxies.default` object merged into
//! `~/.docker/config.json`, leaving every other key as it was. On Linux the
//! daemon also gets a systemd drop-in through the privileged gateway; a
//! failure there is reported as a note and does not fail the adapter.

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::domain::ports::{AdapterContext, AdapterEffect, AdapterError, ToolAdapter};
use crate::domain::services::shell_quote;
use crate::domain::value_objects::{Environment, OsKind, ProxySettings, ToolStatus};

const DROP_IN_DIR: &str = "/etc/systemd/system/docker.service.d";
const DROP_IN: &str = "/etc/systemd/system/docker.service.d/ezproxy.conf";

#[derive(Debug, Clone, Copy, Default)]
pub struct DockerAdapter;

impl DockerAdapter {
    fn config_path(env: &Environment) -> PathBuf {
        env.home_path(".docker/config.json")
    }

    fn read_config(
        ctx: &AdapterContext<'_>,
        path: &Path,
    ) -> Result<Option<Map<String, Value>>, AdapterError> {
        let Some(content) = ctx.patcher.read_optional(path)? else {
            return Ok(None);
        };
        if content.trim().is_empty() {
            return Ok(Some(Map::new()));
        }
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(_) => Err(AdapterError::InvalidDocument {
                path: path.to_path_buf(),
                message: "top level is not a JSON object".to_string(),
            }),
            Err(e) => Err(AdapterError::InvalidDocument {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    fn write_config(
        ctx: &AdapterContext<'_>,
        path: &Path,
        config: &Map<String, Value>,
    ) -> Result<(), AdapterError> {
        let mut content =
            serde_json::to_string_pretty(config).map_err(|e| AdapterError::InvalidDocument {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        content.push('\n');
        ctx.patcher.rewrite(path, content)?;
        Ok(())
    }

    fn proxies(settings: &ProxySettings) -> Value {
        json!({
            "default": {
                "httpProxy": settings.http,
                "httpsProxy": settings.https,
                "noProxy": settings.no_proxy,
            }
        })
    }

    fn daemon_commands(settings: &ProxySettings) -> Vec<String> {
        let unit = format!(
            "[Service]\nEnvironment=\"HTTP_PROXY={}\"\nEnvironment=\"HTTPS_PROXY={}\"\nEnvironment=\"NO_PROXY={}\"\n",
            settings.http, settings.https, settings.no_proxy
        );
        vec![
            format!("mkdir -p {DROP_IN_DIR}"),
            format!("printf '%s' {} > {DROP_IN}", shell_quote(&unit)),
            "systemctl daemon-reload && systemctl restart docker".to_string(),
        ]
    }
}

impl ToolAdapter for DockerAdapter {
    fn name(&self) -> &'static str {
        "docker"
    }

    fn is_available(&self, env: &Environment) -> bool {
        env.has_command("docker")
    }

    fn apply(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<AdapterEffect, AdapterError> {
        let path = Self::config_path(ctx.env);
        let mut config = Self::read_config(ctx, &path)?.unwrap_or_default();
        config.insert("proxies".to_string(), Self::proxies(settings));
        Self::write_config(ctx, &path, &config)?;

        match ctx.env.os {
            OsKind::Linux => {
                if let Err(err) = ctx
                    .gateway
                    .run("docker daemon", &Self::daemon_commands(settings))
                {
                    ctx.note(self.name(), format!("docker daemon: {err}"));
                }
            }
            OsKind::MacOs => ctx.note(
                self.name(),
                format!(
                    "Docker Desktop: set Settings > Resources > Proxies to HTTP {} / HTTPS {} / bypass {}",
                    settings.http, settings.https, settings.no_proxy
                ),
            ),
            OsKind::Other => {}
        }
        Ok(AdapterEffect::Done)
    }

    fn remove(&self, ctx: &AdapterContext<'_>) -> Result<AdapterEffect, AdapterError> {
        let path = Self::config_path(ctx.env);
        if let Some(mut config) = Self::read_config(ctx, &path)? {
            if config.shift_remove("proxies").is_some() {
                Self::write_config(ctx, &path, &config)?;
            }
        }

        if ctx.env.os == OsKind::Linux && Path::new(DROP_IN).exists() {
            return ctx.gateway.run_removal(
                "docker daemon",
                &[
                    format!("rm -f {DROP_IN}"),
                    "systemctl daemon-reload && systemctl restart docker".to_string(),
                ],
            );
        }
        Ok(AdapterEffect::Done)
    }

    fn status(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<ToolStatus, AdapterError> {
        let path = Self::config_path(ctx.env);
        let config = match Self::read_config(ctx, &path) {
            Ok(Some(config)) => config,
            Ok(None) => return Ok(ToolStatus::not_configured()),
            Err(err) => return Ok(ToolStatus::unknown().with_detail(err.to_string())),
        };
        Ok(match config.get("proxies") {
            None => ToolStatus::not_configured(),
            Some(proxies) if *proxies == Self::proxies(settings) => ToolStatus::configured(),
            Some(_) => ToolStatus::stale(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::StatusLabel;
    use crate::testing::Harness;
    use std::fs;
    use tempfile::tempdir;

    fn settings() -> ProxySettings {
        ProxySettings::new("http://p:8080", "http://p:8080", "localhost")
    }

    fn mac_harness(home: &Path) -> Harness {
        let env = Environment::fixed(home, ["docker"]).with_os(OsKind::MacOs);
        Harness::new(home, ["docker"]).with_env(env)
    }

    #[test]
    fn apply_preserves_unrelated_keys() {
        let home = tempdir().unwrap();
        let path = home.path().join(".docker/config.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"auths": {"ghcr.io": {}}, "credsStore": "desktop"}"#).unwrap();
        let h = mac_harness(home.path());

        h.run(|ctx| DockerAdapter.apply(&settings(), ctx)).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["credsStore"], "desktop");
        assert_eq!(value["proxies"]["default"]["httpProxy"], "http://p:8080");
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["auths", "credsStore", "proxies"]);
    }

    #[test]
    fn remove_drops_only_proxies() {
        let home = tempdir().unwrap();
        let path = home.path().join(".docker/config.json");
        let h = mac_harness(home.path());

        h.run(|ctx| DockerAdapter.apply(&settings(), ctx)).unwrap();
        let status = h.run(|ctx| DockerAdapter.status(&settings(), ctx)).unwrap();
        assert_eq!(status.label, StatusLabel::Configured);

        h.run(|ctx| DockerAdapter.remove(ctx)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
        let status = h.run(|ctx| DockerAdapter.status(&settings(), ctx)).unwrap();
        assert_eq!(status.label, StatusLabel::NotConfigured);
    }

    #[test]
    fn invalid_json_is_not_clobbered() {
        let home = tempdir().unwrap();
        let path = home.path().join(".docker/config.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        let h = mac_harness(home.path());

        let err = h.run(|ctx| DockerAdapter.apply(&settings(), ctx)).unwrap_err();

        assert!(matches!(err, AdapterError::InvalidDocument { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn daemon_failure_becomes_note() {
        let home = tempdir().unwrap();
        let h = Harness::new(home.path(), ["docker"]);
        h.runner.fail_on("mkdir");

        let effect = h.run(|ctx| DockerAdapter.apply(&settings(), ctx)).unwrap();

        assert_eq!(effect, AdapterEffect::Done);
        assert!(home.path().join(".docker/config.json").exists());
        assert!(h.events.events().iter().any(|e| matches!(
            e,
            crate::domain::ports::RunEvent::Note { message, .. } if message.starts_with("docker daemon:")
        )));
    }
}
