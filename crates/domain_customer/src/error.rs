//! Customer domain errors
//!
//! Validation failures are raised when value objects are built from raw
//! input; storage failures come back from the port unchanged. A lookup that
//! matches nothing is not an error anywhere in this crate.

use thiserror::Error;

use core_kernel::PortError;

/// Raised while building value objects or commands from caller input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Tax id failed the length, repeated-digit or checksum rule
    #[error("invalid tax id")]
    InvalidTaxId,

    /// Email longer than 80 UTF-16 code units
    #[error("email too long")]
    EmailTooLong,

    /// The segment after a single '@' is longer than 64 UTF-16 code units.
    ///
    /// Historically reported as the local part being too long; the check
    /// itself has always measured the part after the '@'.
    #[error("email segment after '@' too long")]
    EmailSegmentTooLong,

    /// Email does not match the address grammar
    #[error("invalid email")]
    InvalidEmail,

    /// A required field was empty
    #[error("{0} must not be empty")]
    MissingField(&'static str),
}

/// Errors surfaced by identity gateway operations
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Caller-supplied data is malformed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store failed; propagated as-is, never retried
    #[error(transparent)]
    Storage(#[from] PortError),
}

impl CustomerError {
    /// Returns true if the store rejected the write as a duplicate
    pub fn is_conflict(&self) -> bool {
        matches!(self, CustomerError::Storage(e) if e.is_conflict())
    }
}
