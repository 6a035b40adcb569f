//! CLI error type.

use larder_storefront::ApiError;
use larder_storefront::config::ConfigError;
use thiserror::Error;

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// API client could not be built.
    #[error("API client error: {0}")]
    Api(#[from] ApiError),

    /// Background request task panicked or was cancelled.
    #[error("Request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The server answered with an error message.
    #[error("Rejected by server: {0}")]
    Rejected(String),

    /// No usable reply: the server was unreachable or answered garbage.
    #[error("Request failed: {0}")]
    RequestFailed(String),
}
