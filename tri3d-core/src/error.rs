//! Error types for tri3d

use thiserror::Error;

/// Errors raised by the validated builders and geometry lookups
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid projection: {0}")]
    InvalidProjection(String),

    #[error("Rotation axis has zero length")]
    DegenerateAxis,

    #[error("Unknown buffer id: {0}")]
    UnknownBuffer(usize),

    #[error("Index {index} out of range for buffer of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type alias for tri3d operations
pub type Result<T> = std::result::Result<T, Error>;
