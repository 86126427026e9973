//! Bundler
//!
//! Bundler reads the proxy from the environment; the only thing it needs
//! from us is `BUNDLE_SSL_CA_CERT` in `~/.bundle/config`, merged into the
//! existing YAML mapping.

use std::path::{Path, PathBuf};

use serde_yaml_ng::{Mapping, Value};

use crate::domain::ports::{AdapterContext, AdapterEffect, AdapterError, ToolAdapter};
use crate::domain::value_objects::{Environment, ProxySettings, ToolStatus};

const CA_KEY: &str = "BUNDLE_SSL_CA_CERT";

#[derive(Debug, Clone, Copy, Default)]
pub struct BundlerAdapter;

impl BundlerAdapter {
    fn config_path(env: &Environment) -> PathBuf {
        env.home_path(".bundle/config")
    }

    fn read_config(
        ctx: &AdapterContext<'_>,
        path: &Path,
    ) -> Result<Option<Mapping>, AdapterError> {
        let Some(content) = ctx.patcher.read_optional(path)? else {
            return Ok(None);
        };
        let invalid = |message: String| AdapterError::InvalidDocument {
            path: path.to_path_buf(),
            message,
        };
        match serde_yaml_ng::from_str::<Value>(&content).map_err(|e| invalid(e.to_string()))? {
            Value::Null => Ok(Some(Mapping::new())),
            Value::Mapping(map) => Ok(Some(map)),
            _ => Err(invalid("top level is not a mapping".to_string())),
        }
    }

    fn write_config(
        ctx: &AdapterContext<'_>,
        path: &Path,
        config: &Mapping,
    ) -> Result<(), AdapterError> {
        let body = serde_yaml_ng::to_string(config).map_err(|e| AdapterError::InvalidDocument {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        ctx.patcher.rewrite(path, format!("---\n{body}"))?;
        Ok(())
    }
}

impl ToolAdapter for BundlerAdapter {
    fn name(&self) -> &'static str {
        "bundler"
    }

    fn is_available(&self, env: &Environment) -> bool {
        env.has_command("bundle")
    }

    fn apply(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<AdapterEffect, AdapterError> {
        let Some(ca) = settings.ca_cert_path() else {
            ctx.note(
                self.name(),
                "no CA cert configured; Bundler uses HTTP_PROXY from env_vars",
            );
            return Ok(AdapterEffect::Done);
        };

        let path = Self::config_path(ctx.env);
        let mut config = Self::read_config(ctx, &path)?.unwrap_or_default();
        config.insert(
            Value::String(CA_KEY.to_string()),
            Value::String(ca.display().to_string()),
        );
        Self::write_config(ctx, &path, &config)?;
        Ok(AdapterEffect::Done)
    }

    fn remove(&self, ctx: &AdapterContext<'_>) -> Result<AdapterEffect, AdapterError> {
        let path = Self::config_path(ctx.env);
        if let Some(mut config) = Self::read_config(ctx, &path)? {
            if config.shift_remove(CA_KEY).is_some() {
                Self::write_config(ctx, &path, &config)?;
            }
        }
        Ok(AdapterEffect::Done)
    }

    fn status(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<ToolStatus, AdapterError> {
        let config = match Self::read_config(ctx, &Self::config_path(ctx.env)) {
            Ok(config) => config.unwrap_or_default(),
            Err(err) => return Ok(ToolStatus::unknown().with_detail(err.to_string())),
        };
        let current = config.get(CA_KEY).and_then(Value::as_str);
        let expected = settings.ca_cert_path().map(|p| p.display().to_string());
        Ok(match (current, expected) {
            (None, _) => ToolStatus::not_configured(),
            (Some(current), Some(expected)) if current == expected => ToolStatus::configured(),
            (Some(_), _) => ToolStatus::stale(),
        })
    }
}
