//! Error types for ref list construction.

use thiserror::Error;

/// Errors that can occur while building a [`RefList`](crate::RefList).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    /// The input held no refs.
    #[error("ref list cannot be empty")]
    Empty,

    /// A member's tag differs from the tag of the first member.
    #[error("all refs must have the same tag. Expected: {expected}, got: {actual}")]
    TagMismatch { expected: String, actual: String },
}

/// Convenience type alias for list operations.
pub type ListResult<T> = std::result::Result<T, ListError>;
