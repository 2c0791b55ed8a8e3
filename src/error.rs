//! Error types for tree operations.
//!
//! Every failure is local to the call that reports it and leaves the tree
//! exactly as it was before the call.

use std::fmt;

/// Error type for red-black tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RBTreeError {
    /// The comparator judged the payload equal to one already stored.
    DuplicateKey,
    /// A node could not be allocated.
    AllocationFailure(String),
    /// A red-black or ordering invariant does not hold.
    InvariantViolation(String),
}

impl RBTreeError {
    /// Create an AllocationFailure with context
    pub fn allocation_failure(resource: &str, reason: &str) -> Self {
        Self::AllocationFailure(format!("Failed to allocate {}: {}", resource, reason))
    }

    /// Create an InvariantViolation naming the broken rule
    pub fn invariant(rule: &str, details: &str) -> Self {
        Self::InvariantViolation(format!("{}: {}", rule, details))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateKey)
    }

    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::AllocationFailure(_))
    }
}

impl fmt::Display for RBTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RBTreeError::DuplicateKey => write!(f, "Duplicate key"),
            RBTreeError::AllocationFailure(msg) => write!(f, "Allocation failure: {}", msg),
            RBTreeError::InvariantViolation(msg) => write!(f, "Invariant violation: {}", msg),
        }
    }
}

impl std::error::Error for RBTreeError {}

/// Result type for tree operations that may fail
pub type RBTreeResult<T> = Result<T, RBTreeError>;

/// A rejected insertion, carrying the payload back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertError<T> {
    error: RBTreeError,
    payload: T,
}

impl<T> InsertError<T> {
    pub(crate) fn duplicate(payload: T) -> Self {
        Self {
            error: RBTreeError::DuplicateKey,
            payload,
        }
    }

    pub(crate) fn allocation(payload: T) -> Self {
        Self {
            error: RBTreeError::allocation_failure("tree node", "out of memory"),
            payload,
        }
    }

    pub fn error(&self) -> &RBTreeError {
        &self.error
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "insert rejected: {}", self.error)
    }
}

impl<T: fmt::Debug> std::error::Error for InsertError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<T> From<InsertError<T>> for RBTreeError {
    fn from(err: InsertError<T>) -> Self {
        err.error
    }
}
