//! CLI error types.

use docnav_config::ConfigError;
use docnav_model::NavError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Navigation(#[from] NavError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
