//! Veracity Evaluator
//!
//! Scores content credibility and records each verdict in the fact store.
//!
//! # Overview
//!
//! The Evaluator is the single pathway from an [`EvaluationInput`] to a
//! persisted verdict. It decomposes the input and result into facts keyed
//! by a content identifier, so a repeated request for the same content is
//! answered from the store without scoring again.
//!
//! # Architecture
//!
//! ```text
//! Input → Evaluator → (cache hit?) → stored facts → EvaluationResult
//!                   ↘ Scorer → facts → FactStore
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use veracity_evaluator::{Evaluator, EvaluatorConfig};
//! use veracity_domain::{CredibilityScorer, EvaluationInput};
//! use veracity_store::FileFactStore;
//!
//! # fn example(input: EvaluationInput) -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileFactStore::open("facts.pl")?;
//! let evaluator = Evaluator::new(store, CredibilityScorer::new(), EvaluatorConfig::default());
//!
//! let result = evaluator.evaluate_and_save(&input);
//! println!("{} ({})", result.score, result.level);
//! # Ok(())
//! # }
//! ```
//!
//! [`EvaluationInput`]: veracity_domain::EvaluationInput

#![warn(missing_docs)]

mod config;
mod content;
mod error;
mod evaluator;
pub mod facts;


pub use config::{EvaluatorConfig, DEFAULT_CONTENT_KEY_LENGTH};
pub use content::{content_id, content_key};
pub use error::EvaluatorError;
pub use evaluator::{Evaluation, Evaluator};
