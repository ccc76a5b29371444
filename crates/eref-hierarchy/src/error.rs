//! Error types for hierarchy construction.

use thiserror::Error;

/// Errors that can occur while building a [`RefHierarchy`](crate::RefHierarchy).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HierarchyError {
    /// Every slot was absent.
    #[error("ref hierarchy must contain at least one node")]
    Empty,

    /// Two occupied slots carry the same tag and the configuration rejects that.
    #[error("duplicate tag {tag} at slots {first} and {second}")]
    DuplicateTag {
        tag: String,
        first: usize,
        second: usize,
    },

    /// The hierarchy configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for hierarchy operations.
pub type HierarchyResult<T> = std::result::Result<T, HierarchyError>;
