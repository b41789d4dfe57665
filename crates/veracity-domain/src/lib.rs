//! Veracity Domain Layer
//!
//! This crate contains the core business logic and domain model for Veracity.
//! It has no storage or I/O dependencies and defines the fundamental concepts,
//! value objects, and trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Fact**: The atomic persisted unit - a predicate applied to ordered values
//! - **Evaluation**: The credibility verdict (score, level, breakdown, reasoning)
//!   computed for a piece of content
//! - **Credibility Level**: suspect, doubtful or credible, derived from the score
//! - **Provenance**: Source label and advisory expiry attached to an appended batch
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure business logic only (the scoring engine lives here)
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod evaluation;
pub mod fact;
pub mod level;
pub mod provenance;
pub mod query;
pub mod scoring;
pub mod traits;

// Re-exports for convenience
pub use evaluation::{
    AuthorInfo, ContentMetadata, EvaluationInput, EvaluationResult, ScoreBreakdown, SourceInfo,
    SourceType,
};
pub use fact::{Fact, Value};
pub use level::CredibilityLevel;
pub use provenance::Provenance;
pub use query::{ArgFilter, Condition, FactQuery};
pub use scoring::{ContradictionSignal, CredibilityScorer, FixedContradiction, ScoringWeights};
pub use traits::{AppendReport, FactStore, Scorer};
