//! Veracity Storage Layer
//!
//! Implements the FactStore trait over an append-only text log.
//!
//! # Architecture
//!
//! - [`term`] turns facts into single text lines and back
//! - [`FileFactStore`] keeps the log in one file, deduplicating on append
//! - [`MemoryFactStore`] keeps the same text in process memory
//!
//! Every read decodes the whole log and skips lines it cannot parse, so a
//! hand-edited or partially corrupted file still yields its good facts.
//!
//! # Examples
//!
//! ```no_run
//! use veracity_domain::{Fact, FactQuery, FactStore, Provenance};
//! use veracity_store::FileFactStore;
//!
//! let store = FileFactStore::open("data/facts.pl").unwrap();
//! let fact = Fact::new("source_type", vec!["some claim".into(), "news".into()]);
//! store.append(&[fact], &Provenance::new("import")).unwrap();
//!
//! let found = store.list(&FactQuery::predicate("source_type")).unwrap();
//! assert_eq!(found.len(), 1);
//! ```

#![warn(missing_docs)]

mod batch;
mod file;
mod memory;
pub mod term;
mod validate;

pub use batch::{ScanReport, SkippedLine};
pub use file::FileFactStore;
pub use memory::MemoryFactStore;
pub use term::DecodeError;
pub use validate::validate_fact;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A fact would corrupt the text grammar; nothing was written
    #[error("Invalid fact '{predicate}': {reason}")]
    InvalidFact {
        /// Predicate of the offending fact
        predicate: String,
        /// What is wrong with it
        reason: String,
    },

    /// Another writer panicked while holding the append lock
    #[error("Store lock poisoned")]
    LockPoisoned,
}
