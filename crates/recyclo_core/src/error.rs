//! # Collection Error Types
//!
//! Cleanup, pooling and delegation never fail. The only runtime errors are
//! positional access and configuration loading.

use thiserror::Error;

/// Errors that can occur in the collection system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Positional access outside `[0, length)`.
    #[error("index out of range: index {index}, length {length}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The logical length at the time of access.
        length: usize,
    },

    /// Invalid configuration document or value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(String),
}

/// Result type for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;
