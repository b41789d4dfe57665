//! Configuration management for the CLI.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use veracity_domain::scoring::{
    CONTRADICTION_WEIGHT, CITATION_WEIGHT, DEFAULT_CONTRADICTION_SCORE, LANGUAGE_WEIGHT,
    SOURCE_WEIGHT,
};
use veracity_domain::{CredibilityScorer, FixedContradiction, ScoringWeights};
use veracity_evaluator::EvaluatorConfig;
use veracity_gatekeeper::GatekeeperConfig;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the config file
    #[error("Failed to access config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No home directory to put the default config in
    #[error("Could not find home directory")]
    NoHomeDir,

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Fact store file
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Evaluator settings
    #[serde(default)]
    pub evaluator: EvaluatorConfig,

    /// Scoring weights and the constant contradiction score
    #[serde(default)]
    pub scoring: ScoringSettings,

    /// Input validation rules
    #[serde(default)]
    pub gatekeeper: GatekeeperConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// `[scoring]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// Source weight
    pub source: f64,
    /// Citation weight
    pub citation: f64,
    /// Language weight
    pub language: f64,
    /// Contradiction weight
    pub contradiction: f64,
    /// Contradiction score used for every input
    pub contradiction_default: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            source: SOURCE_WEIGHT,
            citation: CITATION_WEIGHT,
            language: LANGUAGE_WEIGHT,
            contradiction: CONTRADICTION_WEIGHT,
            contradiction_default: DEFAULT_CONTRADICTION_SCORE,
        }
    }
}

impl ScoringSettings {
    /// Component weights
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            source: self.source,
            citation: self.citation,
            language: self.language,
            contradiction: self.contradiction,
        }
    }

    /// Scorer configured from these settings
    pub fn scorer(&self) -> CredibilityScorer {
        CredibilityScorer::new()
            .with_weights(self.weights())
            .with_contradiction_signal(FixedContradiction(self.contradiction_default))
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".veracity").join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the default one.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a file, using defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring
            .weights()
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("scoring: {}", e)))?;
        if !(0.0..=100.0).contains(&self.scoring.contradiction_default) {
            return Err(ConfigError::Invalid(
                "scoring: contradiction_default must be within [0, 100]".to_string(),
            ));
        }
        self.evaluator
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("evaluator: {}", e)))?;
        self.gatekeeper
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("gatekeeper: {}", e)))?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            log_level: default_log_level(),
            settings: Settings::default(),
            evaluator: EvaluatorConfig::default(),
            scoring: ScoringSettings::default(),
            gatekeeper: GatekeeperConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_store_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".veracity").join("facts.pl"),
        None => PathBuf::from("facts.pl"),
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
