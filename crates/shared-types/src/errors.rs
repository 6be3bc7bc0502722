//! # Error Types
//!
//! Error classification shared by every crate. Each crate keeps its own
//! error enum and maps its variants onto an [`ErrorKind`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed input. Nothing was mutated.
    Validation,
    /// Caller lacks the required role. Nothing was mutated.
    Authorization,
    /// A proof failed verification. The query stays retryable.
    Proof,
    /// The target is in the wrong lifecycle state.
    State,
    /// The requester's receiver failed after results were committed.
    Callback,
    /// Corrupted stored data or a broken collaborator.
    Internal,
}

impl ErrorKind {
    /// Whether the same call may succeed later with different input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Proof)
    }
}

/// Errors raised by bounded allow-lists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllowListError {
    /// Adding the members would exceed the capacity.
    #[error("Allow-list full: capacity {capacity}")]
    CapacityExceeded { capacity: usize },

    /// The zero address cannot be a member.
    #[error("Zero address cannot be allow-listed")]
    ZeroAddress,
}

impl AllowListError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
