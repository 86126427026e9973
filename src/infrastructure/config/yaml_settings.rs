//! YAML-backed settings repository.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::Settings;
use crate::domain::ports::{FileSystem, SettingsRepository, SettingsWarning};
use crate::error::{EzproxyError, EzproxyResult};
use crate::infrastructure::fs::{ezproxy_home_dir, LocalFs};

/// Overrides the settings document location
pub const SETTINGS_PATH_VAR: &str = "EZPROXY_CONFIG";

/// `$EZPROXY_CONFIG`, else `~/.config/ezproxy/config.yaml`
pub fn default_settings_path() -> EzproxyResult<PathBuf> {
    if let Some(path) = std::env::var_os(SETTINGS_PATH_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let home = ezproxy_home_dir().ok_or(EzproxyError::NoHomeDir)?;
    Ok(home.join(".config").join("ezproxy").join("config.yaml"))
}

#[derive(Debug, Clone)]
pub struct YamlSettingsRepository {
    path: PathBuf,
}

impl YamlSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository at the default location
    pub fn at_default_path() -> EzproxyResult<Self> {
        Ok(Self::new(default_settings_path()?))
    }

    /// Parse a document, collecting unknown keys as warnings
    pub fn parse(content: &str, file: &Path) -> EzproxyResult<(Settings, Vec<SettingsWarning>)> {
        let mut unknown: Vec<String> = Vec::new();
        let deserializer = serde_yaml_ng::Deserializer::from_str(content);
        let mut settings: Settings = serde_ignored::deserialize(deserializer, |path| {
            unknown.push(path.to_string());
        })
        .map_err(|e| EzproxyError::InvalidSettings {
            file: file.to_path_buf(),
            message: e.to_string(),
        })?;

        if settings.ca_cert.as_deref().is_some_and(|c| c.trim().is_empty()) {
            settings.ca_cert = None;
        }

        let warnings = unknown
            .into_iter()
            .map(|key| SettingsWarning {
                key,
                file: file.to_path_buf(),
            })
            .collect();
        Ok((settings, warnings))
    }
}

impl SettingsRepository for YamlSettingsRepository {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> EzproxyResult<(Settings, Vec<SettingsWarning>)> {
        let content = match LocalFs.read_optional(&self.path)? {
            Some(content) => content,
            None => {
                return Err(EzproxyError::SettingsMissing {
                    path: self.path.clone(),
                })
            }
        };
        let loaded = Self::parse(&content, &self.path)?;
        debug!(path = %self.path.display(), warnings = loaded.1.len(), "settings loaded");
        Ok(loaded)
    }

    fn save(&self, settings: &Settings) -> EzproxyResult<()> {
        let yaml = serde_yaml_ng::to_string(settings)?;
        LocalFs.write(&self.path, &yaml)?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
