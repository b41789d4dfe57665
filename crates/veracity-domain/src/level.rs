//! Credibility level module - the categorical verdict derived from a score

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (inclusive) of the suspect band
pub const SUSPECT_MAX: f64 = 30.0;

/// Upper bound (inclusive) of the doubtful band
pub const DOUBTFUL_MAX: f64 = 60.0;

/// Categorical credibility verdict
///
/// Levels are a pure function of the final score:
/// - Suspect: score ≤ 30
/// - Doubtful: 30 < score ≤ 60
/// - Credible: score > 60
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredibilityLevel {
    /// Likely unreliable
    Suspect,

    /// Should be verified before use
    Doubtful,

    /// Appears trustworthy
    Credible,
}

impl CredibilityLevel {
    /// Derive the level from a final score
    ///
    /// # Examples
    ///
    /// ```
    /// use veracity_domain::CredibilityLevel;
    ///
    /// assert_eq!(CredibilityLevel::from_score(30.0), CredibilityLevel::Suspect);
    /// assert_eq!(CredibilityLevel::from_score(30.1), CredibilityLevel::Doubtful);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score <= SUSPECT_MAX {
            CredibilityLevel::Suspect
        } else if score <= DOUBTFUL_MAX {
            CredibilityLevel::Doubtful
        } else {
            CredibilityLevel::Credible
        }
    }

    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CredibilityLevel::Suspect => "suspect",
            CredibilityLevel::Doubtful => "doubtful",
            CredibilityLevel::Credible => "credible",
        }
    }

    /// Parse a level from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "suspect" => Some(CredibilityLevel::Suspect),
            "doubtful" => Some(CredibilityLevel::Doubtful),
            "credible" => Some(CredibilityLevel::Credible),
            _ => None,
        }
    }
}

impl fmt::Display for CredibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CredibilityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid credibility level: {}", s))
    }
}
