//! Error types for backport-audit.
//!
//! Uses thiserror for derive macros. Review outcomes (missing footers,
//! unreachable refs, unresolved comments) are findings, not errors; only
//! contract violations and collaborator failures end up here.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for backport-audit operations.
#[derive(Error, Debug)]
pub enum AuditError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// The comparator was asked for more context than it supports.
    #[error("invalid context {given}: must be between 0 and {max}")]
    InvalidContext { given: usize, max: usize },

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// Fetching from a patch source failed.
    #[error("Fetch failed: {0}")]
    FetchError(String),

    /// The patch source does not support the requested operation for this host.
    #[error("Unsupported by patch source: {0}")]
    Unsupported(String),

    /// A bounded retry ran out of attempts.
    #[error("giving up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<AuditError> },
}

impl AuditError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            AuditError::UserError(_) => exit_codes::USER_ERROR,
            AuditError::InvalidContext { .. } => exit_codes::USER_ERROR,
            AuditError::GitError(_) => exit_codes::GIT_FAILURE,
            AuditError::FetchError(_) => exit_codes::FETCH_FAILURE,
            AuditError::Unsupported(_) => exit_codes::FETCH_FAILURE,
            AuditError::RetriesExhausted { .. } => exit_codes::FETCH_FAILURE,
        }
    }

    /// Whether a retry may succeed where this attempt failed.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuditError::GitError(_) | AuditError::FetchError(_))
    }
}

/// Result type alias for backport-audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;
