//! Error types for the Evaluator

use thiserror::Error;

/// Errors that can occur around evaluation
///
/// Scoring itself never fails, and persistence failures during
/// [`crate::Evaluator::evaluate_and_save`] are logged rather than returned.
#[derive(Error, Debug)]
pub enum EvaluatorError {
    /// Fact store error
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to serialize to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
