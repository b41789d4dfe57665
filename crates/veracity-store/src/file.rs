//! File-backed fact store

use crate::batch::{plan_append, scan, select, ScanReport};
use crate::StoreError;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use veracity_domain::{AppendReport, Fact, FactQuery, FactStore, Provenance};

/// Append-only fact log in a single text file
///
/// # Thread Safety
///
/// Appends through one handle are serialized by an internal lock held
/// across read, dedup and write. Share the handle with `Arc` rather than
/// opening the same path twice: separate handles (and separate processes)
/// do not coordinate, and may both write a fact neither had seen.
///
/// Reads take no lock and may miss a batch that is being written.
#[derive(Debug)]
pub struct FileFactStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileFactStore {
    /// Open a store at `path`, creating missing parent directories
    ///
    /// The file itself is created on the first append.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        debug!("Opened fact store at {}", path.display());

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the whole log, reporting lines that do not parse
    pub fn scan(&self) -> Result<ScanReport, StoreError> {
        Ok(scan(&self.read_text()?))
    }

    /// Current log text; a missing file reads as empty
    ///
    /// Invalid UTF-8 is replaced rather than failing the read, so one bad
    /// byte only costs the line it sits on.
    fn read_text(&self) -> Result<String, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl FactStore for FileFactStore {
    type Error = StoreError;

    fn append(&self, facts: &[Fact], provenance: &Provenance) -> Result<AppendReport, Self::Error> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?;

        let existing = self.read_text()?;
        let plan = plan_append(&existing, facts, provenance, Utc::now())?;
        if plan.text.is_empty() {
            debug!(
                "All {} facts already present in {}",
                plan.report.skipped,
                self.path.display()
            );
            return Ok(plan.report);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(plan.text.as_bytes())?;
        file.sync_data()?;

        info!(
            "Appended {} facts to {} ({} duplicates skipped)",
            plan.report.appended,
            self.path.display(),
            plan.report.skipped
        );
        Ok(plan.report)
    }

    fn list(&self, query: &FactQuery) -> Result<Vec<Fact>, Self::Error> {
        let facts = select(&self.read_text()?, query);
        debug!("Query matched {} facts", facts.len());
        Ok(facts)
    }
}
