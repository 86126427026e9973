//! Settings repository port - loads and persists the settings document.

use std::path::{Path, PathBuf};

use crate::domain::entities::Settings;
use crate::error::EzproxyResult;

/// Non-fatal problem found while loading (e.g. an unknown key)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsWarning {
    pub key: String,
    pub file: PathBuf,
}

/// Repository trait for the settings document.
pub trait SettingsRepository {
    /// Where the document lives
    fn path(&self) -> &Path;

    /// Load the document. Missing or malformed is an error.
    fn load(&self) -> EzproxyResult<(Settings, Vec<SettingsWarning>)>;

    /// Persist the document, replacing the previous version atomically.
    fn save(&self, settings: &Settings) -> EzproxyResult<()>;

    fn exists(&self) -> bool {
        self.path().exists()
    }
}
