//! Filtered retrieval criteria for facts
//!
//! Replaces variable-binding queries with explicit per-argument conditions.

use crate::fact::{Fact, Value};

/// Condition applied to a single argument
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Normalized equality with the given value
    Equals(Value),

    /// Inclusive numeric range; non-numeric arguments never match
    Range {
        /// Lower bound
        min: Option<f64>,
        /// Upper bound
        max: Option<f64>,
    },

    /// Normalized substring containment
    Contains(String),
}

impl Condition {
    /// Check a single value against the condition
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Condition::Equals(expected) => value.normalized_eq(expected),
            Condition::Range { min, max } => match value.as_number() {
                Some(n) => {
                    min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi)
                }
                None => false,
            },
            Condition::Contains(needle) => value
                .normalized()
                .contains(&needle.trim().to_lowercase()),
        }
    }
}

/// A condition bound to an argument position
#[derive(Debug, Clone, PartialEq)]
pub struct ArgFilter {
    /// Zero-based argument index
    pub index: usize,

    /// Condition on that argument
    pub condition: Condition,
}

/// Query criteria for retrieving facts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactQuery {
    /// Filter by exact predicate name
    pub predicate: Option<String>,

    /// Per-argument conditions (all must hold)
    pub conditions: Vec<ArgFilter>,

    /// Maximum results to return
    pub limit: Option<usize>,
}

impl FactQuery {
    /// Query for every fact
    pub fn all() -> Self {
        Self::default()
    }

    /// Query for facts of one predicate
    pub fn predicate(name: impl Into<String>) -> Self {
        Self {
            predicate: Some(name.into()),
            ..Self::default()
        }
    }

    /// Add a condition on argument `index`
    pub fn with_condition(mut self, index: usize, condition: Condition) -> Self {
        self.conditions.push(ArgFilter { index, condition });
        self
    }

    /// Shorthand for an equality condition
    pub fn with_arg(self, index: usize, value: impl Into<Value>) -> Self {
        self.with_condition(index, Condition::Equals(value.into()))
    }

    /// Limit the number of results
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check whether a fact satisfies every criterion
    ///
    /// A condition on an argument index past the fact's arity fails.
    pub fn matches(&self, fact: &Fact) -> bool {
        if let Some(predicate) = &self.predicate {
            if &fact.predicate != predicate {
                return false;
            }
        }

        self.conditions.iter().all(|filter| {
            fact.arg(filter.index)
                .is_some_and(|value| filter.condition.matches(value))
        })
    }
}
