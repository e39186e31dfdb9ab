//! Error types for nested set operations.

use thiserror::Error;

/// Result type for nested set operations.
pub type Result<T> = std::result::Result<T, NestedSetError>;

/// Coarse classification of a [`NestedSetError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    NotImplemented,
}

/// Errors reported by [`crate::NestedSet`]. Every failing operation leaves the set untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NestedSetError {
    /// A referenced node is not part of the set.
    #[error("{what} not found in structure")]
    NotFound { what: &'static str },

    /// The request is structurally illegal.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The request is recognized but unsupported.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// Interval coordinates no longer describe a tree.
    #[error("structure broken: {0}")]
    BrokenStructure(String),
}

impl NestedSetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NestedSetError::NotFound { .. } | NestedSetError::BrokenStructure(_) => {
                ErrorKind::NotFound
            }
            NestedSetError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            NestedSetError::NotImplemented(_) => ErrorKind::NotImplemented,
        }
    }
}
