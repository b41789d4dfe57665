//! Credibility scoring engine
//!
//! Implements the deterministic multi-criteria formula that turns an
//! [`EvaluationInput`] into an [`EvaluationResult`]:
//! 1. Source score (reputation plus source-type adjustment)
//! 2. Citation score
//! 3. Language score (emotional wording, dating, authorship)
//! 4. Contradiction score (extension point, constant by default)
//!
//! Each component is clamped to [0, 100]; only the weighted final score is
//! rounded to two decimals.

use crate::evaluation::{EvaluationInput, EvaluationResult, ScoreBreakdown, SourceType};
use crate::level::CredibilityLevel;
use crate::traits::Scorer;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Default weight of the source component
pub const SOURCE_WEIGHT: f64 = 0.4;

/// Default weight of the citation component
pub const CITATION_WEIGHT: f64 = 0.3;

/// Default weight of the language component
pub const LANGUAGE_WEIGHT: f64 = 0.2;

/// Default weight of the contradiction component
pub const CONTRADICTION_WEIGHT: f64 = 0.1;

/// Contradiction score used when no detector is plugged in
pub const DEFAULT_CONTRADICTION_SCORE: f64 = 80.0;

/// Points per citation, before the 100 cap
const POINTS_PER_CITATION: f64 = 20.0;
const REFERENCES_BONUS: f64 = 20.0;

const EMOTIONAL_PENALTY: f64 = 40.0;
const UNDATED_PENALTY: f64 = 20.0;
const EXPERT_BONUS: f64 = 20.0;
const ANONYMOUS_PENALTY: f64 = 30.0;

/// Source scores above this are described as reliable
const RELIABLE_SOURCE_THRESHOLD: f64 = 70.0;
/// Source scores below this are described as unreliable
const UNRELIABLE_SOURCE_THRESHOLD: f64 = 40.0;

/// Weights of the four breakdown components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Weight of the source score
    pub source: f64,
    /// Weight of the citation score
    pub citation: f64,
    /// Weight of the language score
    pub language: f64,
    /// Weight of the contradiction score
    pub contradiction: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            source: SOURCE_WEIGHT,
            citation: CITATION_WEIGHT,
            language: LANGUAGE_WEIGHT,
            contradiction: CONTRADICTION_WEIGHT,
        }
    }
}

impl ScoringWeights {
    /// Validate the weights: finite, non-negative, summing to 1.0
    pub fn validate(&self) -> Result<(), String> {
        let weights = [self.source, self.citation, self.language, self.contradiction];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err("weights must be finite and non-negative".to_string());
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(format!("weights must sum to 1.0, got {}", sum));
        }
        Ok(())
    }

    /// Weighted sum of a breakdown, unrounded
    pub fn apply(&self, breakdown: &ScoreBreakdown) -> f64 {
        self.source * breakdown.source_score
            + self.citation * breakdown.citation_score
            + self.language * breakdown.language_score
            + self.contradiction * breakdown.contradiction_score
    }
}

/// Source of the contradiction component
///
/// Veracity does not detect contradictions itself; a future detector plugs
/// in here. The returned value is clamped to [0, 100].
pub trait ContradictionSignal: Send + Sync {
    /// Contradiction score for the input (higher = fewer contradictions)
    fn contradiction_score(&self, input: &EvaluationInput) -> f64;
}

/// Constant contradiction score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedContradiction(pub f64);

impl Default for FixedContradiction {
    fn default() -> Self {
        Self(DEFAULT_CONTRADICTION_SCORE)
    }
}

impl ContradictionSignal for FixedContradiction {
    fn contradiction_score(&self, _input: &EvaluationInput) -> f64 {
        self.0
    }
}

/// The default scoring engine
pub struct CredibilityScorer {
    weights: ScoringWeights,
    contradiction: Box<dyn ContradictionSignal>,
}

impl CredibilityScorer {
    /// Create a scorer with default weights and the fixed contradiction score
    pub fn new() -> Self {
        Self {
            weights: ScoringWeights::default(),
            contradiction: Box::new(FixedContradiction::default()),
        }
    }

    /// Replace the component weights
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Plug in a contradiction signal
    pub fn with_contradiction_signal(mut self, signal: impl ContradictionSignal + 'static) -> Self {
        self.contradiction = Box::new(signal);
        self
    }

    /// Configured weights
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Compute the four clamped components
    pub fn breakdown(&self, input: &EvaluationInput) -> ScoreBreakdown {
        ScoreBreakdown {
            source_score: clamp_component(source_score(input)),
            citation_score: clamp_component(citation_score(input)),
            language_score: clamp_component(language_score(input)),
            contradiction_score: clamp_component(self.contradiction.contradiction_score(input)),
        }
    }
}

impl Default for CredibilityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for CredibilityScorer {
    fn score(&self, input: &EvaluationInput) -> EvaluationResult {
        let breakdown = self.breakdown(input);
        let score = final_score(&breakdown, &self.weights);
        let level = CredibilityLevel::from_score(score);

        EvaluationResult {
            score,
            level,
            breakdown,
            reasoning: explain(input, &breakdown, score, level),
            confidence: confidence(&breakdown),
            timestamp: Utc::now(),
        }
    }
}

/// Step 1: reputation × 100 adjusted by source type (unclamped)
fn source_score(input: &EvaluationInput) -> f64 {
    let adjustment = match input.source.source_type {
        SourceType::Official => 20.0,
        SourceType::News => 10.0,
        SourceType::Blog => 0.0,
        SourceType::Social => -20.0,
        SourceType::Unknown => -30.0,
    };
    input.source.reputation * 100.0 + adjustment
}

/// Step 2: citation support (unclamped)
fn citation_score(input: &EvaluationInput) -> f64 {
    let metadata = &input.metadata;
    if !metadata.has_citations {
        return 0.0;
    }

    let mut score = (f64::from(metadata.citation_count) * POINTS_PER_CITATION).min(100.0);
    if metadata.has_references {
        score += REFERENCES_BONUS;
    }
    score
}

/// Step 3: language and authorship quality (unclamped)
///
/// Expert and anonymous adjustments are independent; both may apply.
fn language_score(input: &EvaluationInput) -> f64 {
    let mut score: f64 = 100.0;

    if input.metadata.has_emotional_language {
        score -= EMOTIONAL_PENALTY;
    }
    if input.metadata.publication_date.is_none() {
        score -= UNDATED_PENALTY;
    }
    if input.author.known_expert {
        score += EXPERT_BONUS;
    }
    if input.author.is_anonymous {
        score -= ANONYMOUS_PENALTY;
    }

    score
}

/// Weighted final score, rounded to two decimals and clamped to [0, 100]
pub fn final_score(breakdown: &ScoreBreakdown, weights: &ScoringWeights) -> f64 {
    round2(clamp_component(weights.apply(breakdown)))
}

/// Confidence: mean absolute deviation of the components from 50, scaled
/// to [0, 100]
///
/// Extreme components (near 0 or 100) give high confidence; components
/// clustered around the midpoint give low confidence.
pub fn confidence(breakdown: &ScoreBreakdown) -> f64 {
    let components = breakdown.components();
    let avg_deviation =
        components.iter().map(|c| (c - 50.0).abs()).sum::<f64>() / components.len() as f64;
    round2((avg_deviation / 50.0 * 100.0).min(100.0))
}

/// Build the ordered reasoning sentences
///
/// Only signals that are present contribute a sentence.
pub fn explain(
    input: &EvaluationInput,
    breakdown: &ScoreBreakdown,
    score: f64,
    level: CredibilityLevel,
) -> Vec<String> {
    let mut reasoning = Vec::new();

    reasoning.push(match level {
        CredibilityLevel::Credible => {
            format!("The information appears credible (score {:.1}/100).", score)
        }
        CredibilityLevel::Doubtful => format!(
            "The information is doubtful and should be verified (score {:.1}/100).",
            score
        ),
        CredibilityLevel::Suspect => format!(
            "The information is suspect and likely unreliable (score {:.1}/100).",
            score
        ),
    });

    let source_type = input.source.source_type;
    if breakdown.source_score > RELIABLE_SOURCE_THRESHOLD {
        reasoning.push(format!("The {} source is considered reliable.", source_type));
    } else if breakdown.source_score < UNRELIABLE_SOURCE_THRESHOLD {
        reasoning.push(format!("The {} source has low reliability.", source_type));
    }

    let metadata = &input.metadata;
    if metadata.has_citations && metadata.citation_count > 0 {
        let plural = if metadata.citation_count == 1 { "" } else { "s" };
        reasoning.push(format!(
            "The content includes {} citation{}.",
            metadata.citation_count, plural
        ));
    } else {
        reasoning.push("The content provides no citations.".to_string());
    }

    if metadata.has_emotional_language {
        reasoning.push("Emotional language was detected, which may indicate bias.".to_string());
    }

    if input.author.known_expert {
        reasoning.push("The author is a recognized expert.".to_string());
    }
    if input.author.is_anonymous {
        reasoning.push("The author is anonymous.".to_string());
    }

    reasoning
}

/// Round to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn clamp_component(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{AuthorInfo, ContentMetadata, SourceInfo};

    fn input(source_type: SourceType, reputation: f64) -> EvaluationInput {
        EvaluationInput {
            content: "Sample content".to_string(),
            source: SourceInfo {
                source_type,
                reputation,
                url: None,
                domain: None,
            },
            author: AuthorInfo {
                is_anonymous: false,
                known_expert: false,
                name: None,
            },
            metadata: ContentMetadata {
                has_emotional_language: false,
                has_citations: false,
                citation_count: 0,
                has_references: false,
                publication_date: Some("2024-01-15".to_string()),
            },
        }
    }

    fn scenario_a() -> EvaluationInput {
        let mut input = input(SourceType::Unknown, 0.1);
        input.author.is_anonymous = true;
        input.metadata.has_emotional_language = true;
        input
    }

    fn scenario_b() -> EvaluationInput {
        let mut input = input(SourceType::Official, 0.95);
        input.author.known_expert = true;
        input.metadata.has_citations = true;
        input.metadata.citation_count = 5;
        input.metadata.has_references = true;
        input
    }

    #[test]
    fn test_scenario_unreliable_content() {
        let result = CredibilityScorer::new().score(&scenario_a());

        // Source: 10 - 30 = -20, clamped to 0
        assert_eq!(result.breakdown.source_score, 0.0);
        assert_eq!(result.breakdown.citation_score, 0.0);
        // Language: 100 - 40 (emotional) - 30 (anonymous) = 30
        assert_eq!(result.breakdown.language_score, 30.0);
        assert_eq!(result.breakdown.contradiction_score, 80.0);
        // Final: 0.2 * 30 + 0.1 * 80 = 14
        assert_eq!(result.score, 14.0);
        assert_eq!(result.level, CredibilityLevel::Suspect);
    }

    #[test]
    fn test_scenario_reliable_content() {
        let result = CredibilityScorer::new().score(&scenario_b());

        // Source: 95 + 20 = 115, clamped to 100
        assert_eq!(result.breakdown.source_score, 100.0);
        // Citations: min(100, 5 * 20) + 20 = 120, clamped to 100
        assert_eq!(result.breakdown.citation_score, 100.0);
        // Language: 100 + 20 (expert) = 120, clamped to 100
        assert_eq!(result.breakdown.language_score, 100.0);
        // Final: 40 + 30 + 20 + 8 = 98
        assert_eq!(result.score, 98.0);
        assert_eq!(result.level, CredibilityLevel::Credible);
    }

    #[test]
    fn test_source_type_adjustments() {
        let scorer = CredibilityScorer::new();
        let cases = [
            (SourceType::Official, 70.0),
            (SourceType::News, 60.0),
            (SourceType::Blog, 50.0),
            (SourceType::Social, 30.0),
            (SourceType::Unknown, 20.0),
        ];
        for (source_type, expected) in cases {
            let breakdown = scorer.breakdown(&input(source_type, 0.5));
            assert_eq!(breakdown.source_score, expected, "{:?}", source_type);
        }
    }

    #[test]
    fn test_citations_without_flag_score_zero() {
        let mut input = input(SourceType::News, 0.5);
        input.metadata.citation_count = 4;
        input.metadata.has_references = true;
        assert_eq!(CredibilityScorer::new().breakdown(&input).citation_score, 0.0);
    }

    #[test]
    fn test_citation_count_scaling() {
        let mut input = input(SourceType::News, 0.5);
        input.metadata.has_citations = true;
        input.metadata.citation_count = 2;
        // 2 * 20 = 40, no references
        assert_eq!(CredibilityScorer::new().breakdown(&input).citation_score, 40.0);
    }

    #[test]
    fn test_missing_publication_date_penalty() {
        let mut input = input(SourceType::News, 0.5);
        input.metadata.publication_date = None;
        assert_eq!(CredibilityScorer::new().breakdown(&input).language_score, 80.0);
    }

    #[test]
    fn test_expert_and_anonymous_both_apply() {
        let mut input = input(SourceType::News, 0.5);
        input.author.known_expert = true;
        input.author.is_anonymous = true;
        // 100 + 20 = 120, then -30 = 90 (clamp happens after all adjustments)
        assert_eq!(CredibilityScorer::new().breakdown(&input).language_score, 90.0);
    }

    #[test]
    fn test_confidence_extremes_and_midpoint() {
        let extreme = ScoreBreakdown {
            source_score: 0.0,
            citation_score: 100.0,
            language_score: 0.0,
            contradiction_score: 100.0,
        };
        assert_eq!(confidence(&extreme), 100.0);

        let midpoint = ScoreBreakdown {
            source_score: 50.0,
            citation_score: 50.0,
            language_score: 50.0,
            contradiction_score: 50.0,
        };
        assert_eq!(confidence(&midpoint), 0.0);
    }

    #[test]
    fn test_confidence_scenario_a() {
        let result = CredibilityScorer::new().score(&scenario_a());
        // Deviations 50, 50, 20, 30 -> mean 37.5 -> 75
        assert_eq!(result.confidence, 75.0);
    }

    #[test]
    fn test_reasoning_is_conditional() {
        let result = CredibilityScorer::new().score(&scenario_a());
        assert!(result.reasoning[0].contains("suspect"));
        assert!(result.reasoning.iter().any(|r| r.contains("low reliability")));
        assert!(result.reasoning.iter().any(|r| r.contains("no citations")));
        assert!(result.reasoning.iter().any(|r| r.contains("Emotional language")));
        assert!(result.reasoning.iter().any(|r| r.contains("anonymous")));
        assert!(!result.reasoning.iter().any(|r| r.contains("expert")));
        assert!(result.reasoning.iter().all(|r| !r.is_empty()));

        let result = CredibilityScorer::new().score(&scenario_b());
        assert!(result.reasoning[0].contains("credible"));
        assert!(result.reasoning.iter().any(|r| r.contains("considered reliable")));
        assert!(result.reasoning.iter().any(|r| r.contains("5 citations")));
        assert!(!result.reasoning.iter().any(|r| r.contains("Emotional")));
        assert!(result.reasoning.iter().any(|r| r.contains("recognized expert")));
    }

    #[test]
    fn test_mid_range_source_has_no_reliability_sentence() {
        let result = CredibilityScorer::new().score(&input(SourceType::Blog, 0.5));
        assert!(!result.reasoning.iter().any(|r| r.contains("reliab")));
    }

    #[test]
    fn test_custom_contradiction_signal() {
        struct NoContradictions;
        impl ContradictionSignal for NoContradictions {
            fn contradiction_score(&self, _input: &EvaluationInput) -> f64 {
                150.0
            }
        }

        let scorer = CredibilityScorer::new().with_contradiction_signal(NoContradictions);
        let breakdown = scorer.breakdown(&scenario_a());
        assert_eq!(breakdown.contradiction_score, 100.0);
    }

    #[test]
    fn test_weights_validation() {
        assert!(ScoringWeights::default().validate().is_ok());

        let mut weights = ScoringWeights::default();
        weights.source = 0.5;
        assert!(weights.validate().is_err());

        weights.source = -0.1;
        weights.citation = 0.8;
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_components_are_weighted_unrounded() {
        let result = CredibilityScorer::new().score(&input(SourceType::Blog, 0.00036));

        assert!((result.breakdown.source_score - 0.036).abs() < 1e-9);
        // 0.4 * 0.036 + 0.2 * 100 + 0.1 * 80 = 28.0144
        assert_eq!(result.score, 28.01);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(14.000000000000002), 14.0);
        assert_eq!(round2(33.336), 33.34);
    }
}
