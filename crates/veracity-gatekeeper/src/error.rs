//! Gatekeeper error types

use crate::RejectionReason;
use thiserror::Error;

/// Errors that can occur during gatekeeper operations
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Input failed one or more checks
    #[error("Input rejected: {}", join_reasons(.0))]
    Rejected(Vec<RejectionReason>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

fn join_reasons(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
