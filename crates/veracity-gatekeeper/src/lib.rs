//! Veracity Gatekeeper
//!
//! Validates evaluation input before it reaches the scorer.
//!
//! The Gatekeeper provides:
//! - Content checks (empty, oversized)
//! - Source reputation bounds
//! - Metadata consistency (citation flags, publication date format)
//!
//! Source types and negative citation counts never get this far: the
//! former fail JSON deserialization, the latter are unrepresentable.
//!
//! # Examples
//!
//! ```
//! use veracity_gatekeeper::{Gatekeeper, GatekeeperConfig, ValidationStatus};
//! use veracity_domain::{AuthorInfo, ContentMetadata, EvaluationInput, SourceInfo, SourceType};
//!
//! let gatekeeper = Gatekeeper::new(GatekeeperConfig::default());
//!
//! let input = EvaluationInput {
//!     content: "Local council approves new budget".to_string(),
//!     source: SourceInfo { source_type: SourceType::News, reputation: 0.8, url: None, domain: None },
//!     author: AuthorInfo { is_anonymous: false, known_expert: false, name: None },
//!     metadata: ContentMetadata {
//!         has_emotional_language: false,
//!         has_citations: false,
//!         citation_count: 0,
//!         has_references: false,
//!         publication_date: Some("2024-03-01".to_string()),
//!     },
//! };
//!
//! let result = gatekeeper.validate(&input);
//! assert_eq!(result.status, ValidationStatus::Accepted);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::GatekeeperConfig;
pub use error::GatekeeperError;
pub use validator::{Gatekeeper, RejectionReason, ValidationResult, ValidationStatus};
