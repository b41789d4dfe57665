//! Provenance attached to an appended batch of facts

use chrono::NaiveDate;

/// Provenance of a batch of facts
///
/// Both fields end up as header comments in the store. Expiry is advisory:
/// nothing in Veracity deletes expired facts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Provenance {
    /// Source label (e.g., "auto-evaluation", "import:legacy")
    pub source: Option<String>,

    /// Advisory expiration date
    pub expires_at: Option<NaiveDate>,
}

impl Provenance {
    /// Create a provenance entry with a source label
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            expires_at: None,
        }
    }

    /// Attach an advisory expiration date
    pub fn with_expiry(mut self, expires_at: NaiveDate) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}
