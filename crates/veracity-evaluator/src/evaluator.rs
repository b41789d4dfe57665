//! Core Evaluator implementation

use crate::config::EvaluatorConfig;
use crate::content::content_key;
use crate::error::EvaluatorError;
use crate::facts::{evaluation_facts, predicates, rebuild_result};
use chrono::{Days, Utc};
use std::fmt::Display;
use tracing::{debug, info, warn};
use veracity_domain::{
    CredibilityScorer, EvaluationInput, EvaluationResult, FactQuery, FactStore, Provenance, Scorer,
};

/// Outcome of a single evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The credibility verdict
    pub result: EvaluationResult,

    /// Rebuilt from stored facts instead of scored
    pub cached: bool,

    /// Freshly scored facts were written to the store
    pub persisted: bool,
}

/// The Evaluator scores content once and remembers the verdict as facts
///
/// A repeated evaluation of the same content (by [`crate::content_id`])
/// returns the stored verdict without scoring again.
pub struct Evaluator<S, C = CredibilityScorer>
where
    S: FactStore,
    C: Scorer,
{
    store: S,
    scorer: C,
    config: EvaluatorConfig,
}

impl<S, C> Evaluator<S, C>
where
    S: FactStore,
    C: Scorer,
    S::Error: Display,
{
    /// Create a new Evaluator
    pub fn new(store: S, scorer: C, config: EvaluatorConfig) -> Self {
        Self {
            store,
            scorer,
            config,
        }
    }

    /// The backing fact store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The scorer used on cache misses
    pub fn scorer(&self) -> &C {
        &self.scorer
    }

    /// Current configuration
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Identifier under which `content` is recorded
    pub fn content_id(&self, content: &str) -> String {
        content_key(content, self.config.content_key_length)
    }

    /// Evaluate content, reusing a stored verdict when there is one
    ///
    /// Store failures are logged and never surface here; the caller always
    /// gets a result.
    pub fn evaluate_and_save(&self, input: &EvaluationInput) -> EvaluationResult {
        self.evaluate_detailed(input).result
    }

    /// Like [`Self::evaluate_and_save`], also reporting cache and persistence
    pub fn evaluate_detailed(&self, input: &EvaluationInput) -> Evaluation {
        let id = self.content_id(&input.content);

        match self.find_cached(&input.content) {
            Ok(Some(result)) => {
                debug!("Reusing stored evaluation for '{}'", id);
                return Evaluation {
                    result,
                    cached: true,
                    persisted: false,
                };
            }
            Ok(None) => {}
            Err(e) => warn!("Evaluation lookup failed, scoring anyway: {}", e),
        }

        let result = self.scorer.score(input);
        info!("Evaluated '{}': {} ({})", id, result.score, result.level);

        let facts = evaluation_facts(&id, input, &result);
        let persisted = match self.store.append(&facts, &self.provenance()) {
            Ok(report) => {
                debug!(
                    "Stored {} facts for '{}' ({} already present)",
                    report.appended, id, report.skipped
                );
                true
            }
            Err(e) => {
                warn!("Failed to persist evaluation for '{}': {}", id, e);
                false
            }
        };

        Evaluation {
            result,
            cached: false,
            persisted,
        }
    }

    /// Stored verdict for `content`, if a complete one exists
    pub fn find_cached(&self, content: &str) -> Result<Option<EvaluationResult>, EvaluatorError> {
        let id = self.content_id(content);
        let facts = self
            .store
            .list(&FactQuery::all().with_arg(0, id.as_str()))
            .map_err(|e| EvaluatorError::Store(e.to_string()))?;

        if !facts.iter().any(|f| f.predicate == predicates::EVALUATION) {
            return Ok(None);
        }

        let rebuilt = rebuild_result(&facts);
        if rebuilt.is_none() {
            warn!("Stored evaluation for '{}' is incomplete; rescoring", id);
        }
        Ok(rebuilt)
    }

    fn provenance(&self) -> Provenance {
        let provenance = Provenance::new(self.config.provenance.clone());
        match Utc::now()
            .date_naive()
            .checked_add_days(Days::new(self.config.retention_days))
        {
            Some(expires_at) => provenance.with_expiry(expires_at),
            None => provenance,
        }
    }
}
