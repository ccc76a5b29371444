//! Error types for ref factories.

use thiserror::Error;

/// Errors produced when invoking a factory's auxiliary constructors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FactoryError {
    /// No auxiliary constructor is registered under this name.
    #[error("unknown constructor: {name}")]
    UnknownConstructor { name: String },

    /// The constructor exists but takes a different argument type.
    #[error("constructor {name} takes {expected}, got {actual}")]
    ArgumentMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Convenience type alias for factory operations.
pub type FactoryResult<T> = std::result::Result<T, FactoryError>;
