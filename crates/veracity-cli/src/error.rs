//! Error types for the CLI application.

use crate::config::ConfigError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Fact store error
    #[error("Store error: {0}")]
    Store(#[from] veracity_store::StoreError),

    /// Input failed validation
    #[error(transparent)]
    Rejected(#[from] veracity_gatekeeper::GatekeeperError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Store contains lines readers skip
    #[error("{0} line(s) in the fact store could not be read")]
    Unhealthy(usize),
}
