//! CLI error types.

use mdc_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Parse(#[from] mdc_engine::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
