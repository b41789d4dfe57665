//! Evaluation input validation logic

use crate::{GatekeeperConfig, GatekeeperError};
use chrono::{DateTime, NaiveDate};
use std::fmt;
use tracing::debug;
use veracity_domain::EvaluationInput;

/// Result of input validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Whether the input passed validation
    pub status: ValidationStatus,

    /// Rejection reasons (if any)
    pub reasons: Vec<RejectionReason>,
}

impl ValidationResult {
    /// True when the input was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }

    /// Convert into a `Result`, carrying the reasons on rejection
    pub fn into_result(self) -> Result<(), GatekeeperError> {
        match self.status {
            ValidationStatus::Accepted => Ok(()),
            ValidationStatus::Rejected => Err(GatekeeperError::Rejected(self.reasons)),
        }
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Input accepted
    Accepted,

    /// Input rejected
    Rejected,
}

/// Reasons for rejection
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// Content is empty or whitespace
    EmptyContent,

    /// Content exceeds the configured length
    ContentTooLong {
        /// Maximum allowed characters
        max: usize,
        /// Actual characters
        actual: usize,
    },

    /// Reputation is outside [0, 1] or not a number
    ReputationOutOfRange(f64),

    /// Publication date is neither `YYYY-MM-DD` nor RFC 3339
    InvalidPublicationDate(String),

    /// `hasCitations` disagrees with `citationCount`
    InconsistentCitations {
        /// Flag as supplied
        has_citations: bool,
        /// Count as supplied
        citation_count: u32,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::EmptyContent => write!(f, "content is empty"),
            RejectionReason::ContentTooLong { max, actual } => {
                write!(f, "content is {} characters long (max {})", actual, max)
            }
            RejectionReason::ReputationOutOfRange(r) => {
                write!(f, "source reputation {} is outside [0, 1]", r)
            }
            RejectionReason::InvalidPublicationDate(d) => {
                write!(f, "publication date '{}' is not a valid date", d)
            }
            RejectionReason::InconsistentCitations {
                has_citations,
                citation_count,
            } => write!(
                f,
                "hasCitations is {} but citationCount is {}",
                has_citations, citation_count
            ),
        }
    }
}

/// The Gatekeeper validates evaluation input before scoring
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: GatekeeperConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: GatekeeperConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &GatekeeperConfig {
        &self.config
    }

    /// Validate an input against the configured rules
    ///
    /// Every failing check contributes a reason; validation does not stop at
    /// the first one.
    pub fn validate(&self, input: &EvaluationInput) -> ValidationResult {
        let mut reasons = Vec::new();

        // 1. Content
        if let Some(reason) = self.validate_content(&input.content) {
            reasons.push(reason);
        }

        // 2. Reputation bounds
        let reputation = input.source.reputation;
        if !(0.0..=1.0).contains(&reputation) {
            // NaN fails the range check too
            reasons.push(RejectionReason::ReputationOutOfRange(reputation));
        }

        // 3. Publication date
        if self.config.validate_publication_date {
            if let Some(date) = &input.metadata.publication_date {
                if !is_valid_date(date) {
                    reasons.push(RejectionReason::InvalidPublicationDate(date.clone()));
                }
            }
        }

        // 4. Citation consistency
        if self.config.validate_citation_consistency {
            let metadata = &input.metadata;
            if metadata.has_citations != (metadata.citation_count > 0) {
                reasons.push(RejectionReason::InconsistentCitations {
                    has_citations: metadata.has_citations,
                    citation_count: metadata.citation_count,
                });
            }
        }

        let status = if reasons.is_empty() {
            ValidationStatus::Accepted
        } else {
            debug!("Rejected evaluation input: {:?}", reasons);
            ValidationStatus::Rejected
        };

        ValidationResult { status, reasons }
    }

    /// Validate and convert to a `Result` in one step
    pub fn check(&self, input: &EvaluationInput) -> Result<(), GatekeeperError> {
        self.validate(input).into_result()
    }

    fn validate_content(&self, content: &str) -> Option<RejectionReason> {
        if content.trim().is_empty() {
            return Some(RejectionReason::EmptyContent);
        }

        let length = content.chars().count();
        if length > self.config.max_content_length {
            return Some(RejectionReason::ContentTooLong {
                max: self.config.max_content_length,
                actual: length,
            });
        }

        None
    }
}

fn is_valid_date(s: &str) -> bool {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_domain::{AuthorInfo, ContentMetadata, SourceInfo, SourceType};

    fn create_test_input() -> EvaluationInput {
        EvaluationInput {
            content: "New study links sleep to memory".to_string(),
            source: SourceInfo {
                source_type: SourceType::News,
                reputation: 0.7,
                url: Some("https://example.org/sleep".to_string()),
                domain: Some("example.org".to_string()),
            },
            author: AuthorInfo {
                is_anonymous: false,
                known_expert: true,
                name: Some("Dana Reyes".to_string()),
            },
            metadata: ContentMetadata {
                has_emotional_language: false,
                has_citations: true,
                citation_count: 3,
                has_references: true,
                publication_date: Some("2024-02-11".to_string()),
            },
        }
    }

    #[test]
    fn test_valid_input() {
        let gatekeeper = Gatekeeper::default();
        let result = gatekeeper.validate(&create_test_input());

        assert_eq!(result.status, ValidationStatus::Accepted);
        assert!(result.reasons.is_empty());
        assert!(gatekeeper.check(&create_test_input()).is_ok());
    }

    #[test]
    fn test_empty_content() {
        let gatekeeper = Gatekeeper::default();
        let mut input = create_test_input();
        input.content = "   \n\t".to_string();

        let result = gatekeeper.validate(&input);

        assert_eq!(result.status, ValidationStatus::Rejected);
        assert_eq!(result.reasons, vec![RejectionReason::EmptyContent]);
    }

    #[test]
    fn test_content_too_long_counts_characters() {
        let gatekeeper = Gatekeeper::new(GatekeeperConfig {
            max_content_length: 5,
            ..GatekeeperConfig::default()
        });
        let mut input = create_test_input();

        // 5 characters, 10 bytes
        input.content = "ééééé".to_string();
        assert!(gatekeeper.validate(&input).is_accepted());

        input.content = "éééééé".to_string();
        match &gatekeeper.validate(&input).reasons[0] {
            RejectionReason::ContentTooLong { max, actual } => {
                assert_eq!(*max, 5);
                assert_eq!(*actual, 6);
            }
            other => panic!("Expected ContentTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_reputation_bounds() {
        let gatekeeper = Gatekeeper::default();
        let mut input = create_test_input();

        for reputation in [0.0, 1.0] {
            input.source.reputation = reputation;
            assert!(gatekeeper.validate(&input).is_accepted(), "{} is in range", reputation);
        }

        for reputation in [-0.1, 1.01, f64::NAN, f64::INFINITY] {
            input.source.reputation = reputation;
            let result = gatekeeper.validate(&input);
            assert_eq!(result.status, ValidationStatus::Rejected);
            assert!(matches!(
                result.reasons[0],
                RejectionReason::ReputationOutOfRange(_)
            ));
        }
    }

    #[test]
    fn test_publication_date_formats() {
        let gatekeeper = Gatekeeper::default();
        let mut input = create_test_input();

        input.metadata.publication_date = Some("2024-02-11T08:30:00Z".to_string());
        assert!(gatekeeper.validate(&input).is_accepted());

        input.metadata.publication_date = Some("last tuesday".to_string());
        assert_eq!(
            gatekeeper.validate(&input).reasons,
            vec![RejectionReason::InvalidPublicationDate("last tuesday".to_string())]
        );
    }

    #[test]
    fn test_permissive_config() {
        let gatekeeper = Gatekeeper::new(GatekeeperConfig::permissive());
        let mut input = create_test_input();
        input.metadata.publication_date = Some("sometime in spring".to_string());

        // Should pass with permissive config
        assert!(gatekeeper.validate(&input).is_accepted());
    }

    #[test]
    fn test_strict_citation_consistency() {
        let gatekeeper = Gatekeeper::new(GatekeeperConfig::strict());
        let mut input = create_test_input();
        input.metadata.has_citations = false;

        let result = gatekeeper.validate(&input);
        assert_eq!(
            result.reasons,
            vec![RejectionReason::InconsistentCitations {
                has_citations: false,
                citation_count: 3,
            }]
        );

        // Default config tolerates the mismatch
        assert!(Gatekeeper::default().validate(&input).is_accepted());
    }

    #[test]
    fn test_multiple_validation_errors() {
        let gatekeeper = Gatekeeper::default();
        let mut input = create_test_input();
        input.content = String::new();
        input.source.reputation = 2.0;

        let result = gatekeeper.validate(&input);

        assert_eq!(result.status, ValidationStatus::Rejected);
        assert_eq!(result.reasons.len(), 2);
    }

    #[test]
    fn test_rejection_error_message() {
        let gatekeeper = Gatekeeper::default();
        let mut input = create_test_input();
        input.content = " ".to_string();
        input.source.reputation = -1.0;

        let err = gatekeeper.check(&input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Input rejected: content is empty; source reputation -1 is outside [0, 1]"
        );
    }

    #[test]
    fn test_input_from_json_rejects_unknown_source_type() {
        let json = r#"{
            "content": "x",
            "source": {"type": "tabloid", "reputation": 0.5},
            "author": {"isAnonymous": false, "knownExpert": false},
            "metadata": {"hasEmotionalLanguage": false, "hasCitations": false,
                         "citationCount": 0, "hasReferences": false}
        }"#;
        assert!(serde_json::from_str::<EvaluationInput>(json).is_err());
    }
}
