//! Evaluation input and result types
//!
//! These are the JSON shapes exchanged with callers (camelCase field names).
//! An input is never persisted as a unit; the evaluator decomposes it into
//! facts.

use crate::level::CredibilityLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of source the content comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Government or institutional publication
    Official,
    /// News outlet
    News,
    /// Blog post
    Blog,
    /// Social network post
    Social,
    /// Unknown origin
    Unknown,
}

impl SourceType {
    /// Get the source type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Official => "official",
            SourceType::News => "news",
            SourceType::Blog => "blog",
            SourceType::Social => "social",
            SourceType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    /// Source kind
    #[serde(rename = "type")]
    pub source_type: SourceType,

    /// Reputation in [0, 1] (validated by the caller)
    pub reputation: f64,

    /// Source URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Source domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Author descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInfo {
    /// Author did not identify themselves
    pub is_anonymous: bool,

    /// Author is a recognized expert on the topic
    pub known_expert: bool,

    /// Author name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Content metadata signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    /// Emotionally charged wording detected
    pub has_emotional_language: bool,

    /// Content cites sources
    pub has_citations: bool,

    /// Number of citations
    pub citation_count: u32,

    /// Content lists references
    pub has_references: bool,

    /// Publication date as supplied by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
}

/// Everything needed to score a piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationInput {
    /// The information being evaluated (natural key)
    pub content: String,

    /// Source descriptor
    pub source: SourceInfo,

    /// Author descriptor
    pub author: AuthorInfo,

    /// Content metadata
    pub metadata: ContentMetadata,
}

/// Per-criterion sub-scores, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Source reliability
    pub source_score: f64,
    /// Citation support
    pub citation_score: f64,
    /// Language and authorship quality
    pub language_score: f64,
    /// Absence of contradiction
    pub contradiction_score: f64,
}

impl ScoreBreakdown {
    /// Components in fixed order: source, citation, language, contradiction
    pub fn components(&self) -> [f64; 4] {
        [
            self.source_score,
            self.citation_score,
            self.language_score,
            self.contradiction_score,
        ]
    }
}

/// Credibility verdict for a piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// Final score in [0, 100]
    pub score: f64,

    /// Level derived from the score
    pub level: CredibilityLevel,

    /// Per-criterion sub-scores
    pub breakdown: ScoreBreakdown,

    /// Ordered explanation sentences
    pub reasoning: Vec<String>,

    /// How decisive the breakdown is, in [0, 100]
    pub confidence: f64,

    /// When the evaluation was computed
    pub timestamp: DateTime<Utc>,
}

impl EvaluationResult {
    /// Reasoning sentences joined into a single explanation
    pub fn explanation(&self) -> String {
        self.reasoning.join(" ")
    }
}
