//! Error types for ezproxy
//!
//! Library code returns `EzproxyError`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ezproxy operations
pub type EzproxyResult<T> = Result<T, EzproxyError>;

/// Main error type for ezproxy operations
#[derive(Error, Debug)]
pub enum EzproxyError {
    /// Settings document does not exist yet
    #[error("no settings found at {path} - run 'ezproxy init' first")]
    SettingsMissing { path: PathBuf },

    /// Settings document exists but cannot be parsed
    #[error("invalid settings in {file}: {message}")]
    InvalidSettings { file: PathBuf, message: String },

    /// Adapter name not present in the registry
    #[error("unknown tool '{name}' (run 'ezproxy list' to see available tools)")]
    UnknownAdapter { name: String },

    /// Marker block requested but absent
    #[error("no ezproxy block found in {path}")]
    BlockNotFound { path: PathBuf },

    /// Home directory could not be resolved
    #[error("could not determine the home directory")]
    NoHomeDir,

    /// File system port error
    #[error(transparent)]
    Fs(#[from] crate::domain::ports::FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
