//! Error types for schema and descriptor loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a schema file or package descriptor.
///
/// All of these make dispatch impossible; callers surface them immediately.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing failure in the package descriptor.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Schema file extension is neither JSON nor YAML.
    #[error("unsupported schema file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    /// Package descriptor has no readable `version` field.
    #[error("missing package version in {}", .0.display())]
    MissingVersion(PathBuf),
}

/// Convenience alias for results with [`SchemaError`].
pub type Result<T> = std::result::Result<T, SchemaError>;
