//! Configuration for the Evaluator

use crate::error::EvaluatorError;
use serde::{Deserialize, Serialize};

/// Default number of characters kept in a content identifier
pub const DEFAULT_CONTENT_KEY_LENGTH: usize = 100;

/// Configuration for the Evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Characters kept from the normalized content to form its identifier
    pub content_key_length: usize,

    /// Provenance label written with every evaluation batch
    pub provenance: String,

    /// Days until an evaluation's facts are marked as expired
    pub retention_days: u64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            content_key_length: DEFAULT_CONTENT_KEY_LENGTH,
            provenance: "auto-evaluation".to_string(),
            retention_days: 365,
        }
    }
}

impl EvaluatorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), EvaluatorError> {
        if self.content_key_length == 0 {
            return Err(EvaluatorError::Config(
                "content_key_length must be greater than 0".to_string(),
            ));
        }
        if self.provenance.trim().is_empty() {
            return Err(EvaluatorError::Config(
                "provenance must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, EvaluatorError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, EvaluatorError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
