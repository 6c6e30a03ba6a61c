//! Error type for CLI commands

use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Field error: {0}")]
    Fields(#[from] flat_tabs_fields::FlatTabsError),

    #[error("Configuration error: {0}")]
    Config(#[from] flat_tabs_config::ConfigError),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}
