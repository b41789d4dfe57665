//! In-process fact store with the same text semantics as the file store

use crate::batch::{plan_append, scan, select, ScanReport};
use crate::StoreError;
use chrono::Utc;
use std::sync::Mutex;
use veracity_domain::{AppendReport, Fact, FactQuery, FactStore, Provenance};

/// Fact log kept in memory as encoded text
///
/// Behaves exactly like [`crate::FileFactStore`] (same encoding, dedup and
/// skipping of bad lines) without touching the disk.
#[derive(Debug, Default)]
pub struct MemoryFactStore {
    text: Mutex<String>,
}

impl MemoryFactStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with log text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(text.into()),
        }
    }

    /// Snapshot of the log text
    pub fn contents(&self) -> Result<String, StoreError> {
        Ok(self.text.lock().map_err(|_| StoreError::LockPoisoned)?.clone())
    }

    /// Decode the whole log, reporting lines that do not parse
    pub fn scan(&self) -> Result<ScanReport, StoreError> {
        Ok(scan(&self.contents()?))
    }
}

impl FactStore for MemoryFactStore {
    type Error = StoreError;

    fn append(&self, facts: &[Fact], provenance: &Provenance) -> Result<AppendReport, Self::Error> {
        let mut text = self.text.lock().map_err(|_| StoreError::LockPoisoned)?;
        let plan = plan_append(&text, facts, provenance, Utc::now())?;
        text.push_str(&plan.text);
        Ok(plan.report)
    }

    fn list(&self, query: &FactQuery) -> Result<Vec<Fact>, Self::Error> {
        Ok(select(&self.contents()?, query))
    }
}
