//! Insertion guard for the text grammar
//!
//! A fact that would not survive a round trip through the codec (or would
//! make later readers skip it) is rejected before anything is written.

use crate::term::RULE_SEPARATOR;
use crate::StoreError;
use veracity_domain::fact::is_atom;
use veracity_domain::{Fact, Value};

/// Check a fact for reserved syntax
pub fn validate_fact(fact: &Fact) -> Result<(), StoreError> {
    let reject = |reason: String| StoreError::InvalidFact {
        predicate: fact.predicate.clone(),
        reason,
    };

    if !is_atom(&fact.predicate) {
        return Err(reject(
            "predicate must be a lowercase-leading identifier".to_string(),
        ));
    }

    for (index, argument) in fact.arguments.iter().enumerate() {
        match argument {
            Value::Text(s) if s.contains(RULE_SEPARATOR) => {
                return Err(reject(format!(
                    "argument {} contains the rule separator '{}'",
                    index, RULE_SEPARATOR
                )));
            }
            // NaN and infinities would render as variable-like tokens
            Value::Number(n) if !n.is_finite() => {
                return Err(reject(format!("argument {} is not a finite number", index)));
            }
            _ => {}
        }
    }

    if let Some(comment) = &fact.comment {
        if comment.contains(['\n', '\r']) {
            return Err(reject("comment spans multiple lines".to_string()));
        }
        if comment.contains(RULE_SEPARATOR) {
            return Err(reject(format!(
                "comment contains the rule separator '{}'",
                RULE_SEPARATOR
            )));
        }
    }

    Ok(())
}
