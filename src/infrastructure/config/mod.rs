//! Settings storage

mod yaml_settings;

pub use yaml_settings::{default_settings_path, YamlSettingsRepository, SETTINGS_PATH_VAR};
