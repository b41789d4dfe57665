//! Gatekeeper configuration

use crate::GatekeeperError;
use serde::{Deserialize, Serialize};

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatekeeperConfig {
    /// Maximum content length in characters
    pub max_content_length: usize,

    /// Require `publicationDate` to be `YYYY-MM-DD` or RFC 3339 when present
    pub validate_publication_date: bool,

    /// Reject `hasCitations` that disagrees with `citationCount`
    pub validate_citation_consistency: bool,
}

impl Default for GatekeeperConfig {
    fn default() -> Self {
        Self {
            max_content_length: 50_000,
            validate_publication_date: true,
            validate_citation_consistency: false,
        }
    }
}

impl GatekeeperConfig {
    /// Create a permissive configuration (minimal validation)
    pub fn permissive() -> Self {
        Self {
            max_content_length: 1_000_000,
            validate_publication_date: false,
            validate_citation_consistency: false,
        }
    }

    /// Create a strict configuration (all validations enabled)
    pub fn strict() -> Self {
        Self {
            max_content_length: 10_000,
            validate_publication_date: true,
            validate_citation_consistency: true,
        }
    }

    /// Check the configuration itself
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        if self.max_content_length == 0 {
            return Err(GatekeeperError::Config(
                "max_content_length must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
