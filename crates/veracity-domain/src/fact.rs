//! Fact module - the atomic persisted unit of Veracity's fact store

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single argument value of a fact
///
/// The text grammar only knows three kinds of values. Strings cover both
/// quoted text and bare atoms such as `credible`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean literal (`true` / `false`)
    Bool(bool),

    /// Numeric literal
    Number(f64),

    /// Quoted string or bare atom
    Text(String),
}

impl Value {
    /// Create a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Borrow the string payload, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value
    ///
    /// Text that looks like a number counts, so hand-authored facts with
    /// quoted numbers still take part in range filters.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => parse_numeric(s.trim()),
            Value::Bool(_) => None,
        }
    }

    /// Normalized form used for semantic equality
    ///
    /// Numbers (and numeric-looking text) become canonical decimal text,
    /// booleans become `true`/`false`, everything else is trimmed and
    /// lowercased.
    ///
    /// # Examples
    ///
    /// ```
    /// use veracity_domain::Value;
    ///
    /// assert_eq!(Value::Number(14.0).normalized(), "14");
    /// assert_eq!(Value::text("14.00").normalized(), "14");
    /// assert_eq!(Value::text(" Credible ").normalized(), "credible");
    /// ```
    pub fn normalized(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => canonical_number(*n),
            Value::Text(s) => {
                let trimmed = s.trim();
                match parse_numeric(trimmed) {
                    Some(n) => canonical_number(n),
                    None => trimmed.to_lowercase(),
                }
            }
        }
    }

    /// Compare two values after normalization
    pub fn normalized_eq(&self, other: &Value) -> bool {
        self.normalized() == other.normalized()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", canonical_number(*n)),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A fact - a predicate applied to an ordered list of values
///
/// Facts are immutable once persisted; corrections are new facts appended
/// later. The optional comment is carried along but never takes part in
/// equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// Relation name, e.g. `source_type`
    pub predicate: String,

    /// Ordered arguments
    pub arguments: Vec<Value>,

    /// Trailing comment (`% ...`), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Fact {
    /// Create a new fact without a comment
    pub fn new(predicate: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            predicate: predicate.into(),
            arguments,
            comment: None,
        }
    }

    /// Attach a comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Number of arguments
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Argument at `index`
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.arguments.get(index)
    }

    /// Semantic equality: same predicate, same arity, pairwise normalized-equal
    /// arguments. Comments are ignored.
    pub fn normalized_eq(&self, other: &Fact) -> bool {
        self.predicate == other.predicate
            && self.arguments.len() == other.arguments.len()
            && self
                .arguments
                .iter()
                .zip(&other.arguments)
                .all(|(a, b)| a.normalized_eq(b))
    }

    /// Hashable key such that `a.normalized_key() == b.normalized_key()`
    /// exactly when `a.normalized_eq(&b)`
    pub fn normalized_key(&self) -> (String, Vec<String>) {
        (
            self.predicate.clone(),
            self.arguments.iter().map(Value::normalized).collect(),
        )
    }
}

/// Check whether `s` is a bare atom: `[a-z][a-zA-Z0-9_]*`
///
/// Predicate names must be atoms. Text values that are atoms may be written
/// without quotes.
pub fn is_atom(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse text that looks like a decimal number
///
/// Only plain decimal notation (optional sign, digits, dot, exponent) is
/// accepted, so words like `inf` or `nan` stay text.
pub fn parse_numeric(s: &str) -> Option<f64> {
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);
    let first = body.chars().next()?;
    if !(first.is_ascii_digit() || (first == '.' && body.len() > 1)) {
        return None;
    }
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+'))
    {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Canonical decimal text for a number (shortest round-trip form)
pub fn canonical_number(n: f64) -> String {
    if n == 0.0 {
        // Collapse -0 into 0
        return "0".to_string();
    }
    format!("{}", n)
}
