//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{EvaluationInput, EvaluationResult, Fact, FactQuery, Provenance};
use std::sync::Arc;

/// Outcome of an append
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendReport {
    /// Facts written to the store
    pub appended: usize,

    /// Facts dropped because an equal fact was already present
    pub skipped: usize,
}

/// Trait for storing and retrieving facts
///
/// Implemented by the infrastructure layer (veracity-store).
///
/// Implementations must serialize the whole read-dedup-write sequence of
/// `append`, so two concurrent appends of equal facts cannot both succeed.
pub trait FactStore {
    /// Error type for store operations
    type Error;

    /// Append a batch of facts, skipping any that normalize-equal a stored fact
    ///
    /// The batch is validated first; an invalid fact rejects the whole batch
    /// without writing anything.
    fn append(&self, facts: &[Fact], provenance: &Provenance) -> Result<AppendReport, Self::Error>;

    /// List facts matching the query, in store order
    fn list(&self, query: &FactQuery) -> Result<Vec<Fact>, Self::Error>;
}

impl<S: FactStore + ?Sized> FactStore for Arc<S> {
    type Error = S::Error;

    fn append(&self, facts: &[Fact], provenance: &Provenance) -> Result<AppendReport, Self::Error> {
        (**self).append(facts, provenance)
    }

    fn list(&self, query: &FactQuery) -> Result<Vec<Fact>, Self::Error> {
        (**self).list(query)
    }
}

/// Trait for scoring content credibility
///
/// Implemented in this crate by [`crate::CredibilityScorer`]. Scoring is
/// total over validated input, so there is no error type.
pub trait Scorer {
    /// Compute the credibility verdict for an input
    fn score(&self, input: &EvaluationInput) -> EvaluationResult;
}
