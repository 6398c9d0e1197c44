//! Error types for bla.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BlaError>;

/// Errors that can occur in vector and matrix operations.
///
/// Every error is raised before the first write of the failing operation,
/// so a destination is never left partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlaError {
    /// Requested size is negative or the allocation cannot be satisfied.
    #[error("cannot allocate buffer of {requested} elements")]
    Allocation { requested: isize },

    /// Index out of bounds.
    #[error("index out of bounds: index {index} is out of range for axis of length {len}")]
    IndexOutOfBounds { index: isize, len: usize },

    /// Malformed slice descriptor.
    #[error("invalid slice: {reason}")]
    InvalidSlice { reason: &'static str },

    /// Operands or assignment target and source have incompatible shapes.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Wrong number of indices provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },
}
