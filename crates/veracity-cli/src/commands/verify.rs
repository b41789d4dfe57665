//! Verify command implementation.

use crate::cli::VerifyArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;
use tracing::warn;
use veracity_store::FileFactStore;

/// Execute the verify command.
pub fn execute_verify(args: VerifyArgs, store_path: &Path, formatter: &Formatter) -> Result<()> {
    let store = FileFactStore::open(store_path)?;
    let report = store.scan()?;

    for line in &report.skipped {
        warn!("Line {} skipped: {}", line.line_number, line.reason);
    }
    println!("{}", formatter.format_scan(store.path(), &report)?);

    if args.strict && !report.is_clean() {
        return Err(CliError::Unhealthy(report.skipped.len()));
    }
    Ok(())
}
