//! Error types for the flat tabs resolver

use std::path::PathBuf;
use thiserror::Error;

/// Result type for flat tabs operations
pub type Result<T> = std::result::Result<T, FlatTabsError>;

/// Errors raised while loading or strictly indexing a field schema.
///
/// Resolution itself never fails: unknown or dangling group references just
/// produce empty results.
#[derive(Debug, Error)]
pub enum FlatTabsError {
    /// Field not found by name
    #[error("field not found: {name}")]
    FieldNotFound { name: String },

    /// Duplicate field name
    #[error("duplicate field name: {name}")]
    DuplicateFieldName { name: String },

    /// The field exists but does not carry the `group` special tag
    #[error("field '{name}' is not a group field")]
    NotAGroup { name: String },

    /// Snapshot file extension is not one we can parse
    #[error("unsupported snapshot format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
