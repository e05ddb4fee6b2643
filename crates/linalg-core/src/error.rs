//! Linalg Error Types
//!
//! Defines every failure a marshaling or numeric call can produce.
//! Errors are local and synchronous; nothing here is retried or recovered.

use thiserror::Error;

/// Result type alias using [`LinalgError`]
pub type LinalgResult<T> = std::result::Result<T, LinalgError>;

/// Errors produced while decoding values, running a backend or dispatching
/// a bound function.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// A value had the wrong variant for its position
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Variant the caller required
        expected: &'static str,
        /// Variant that was actually present
        found: &'static str,
    },

    /// A vector value does not have the structure its shape claims
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Structural precondition of an operation violated
    #[error("dimension mismatch in {op}: {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        /// Operation name
        op: &'static str,
        /// Left-hand (rows, cols)
        lhs: (usize, usize),
        /// Right-hand (rows, cols)
        rhs: (usize, usize),
    },

    /// LU decomposition hit a pivot too small to divide by
    #[error("matrix is singular (pivot {pivot:e} at column {column})")]
    SingularMatrix {
        /// Column where elimination failed
        column: usize,
        /// Pivot magnitude found there
        pivot: f64,
    },

    /// A bound function was called with the wrong number of arguments
    #[error("wrong number of arguments to {name}: expected {min}..={max}, got {got}")]
    ArityMismatch {
        name: String,
        min: usize,
        max: usize,
        got: usize,
    },

    /// No function bound under this name
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// An inferred dimension exceeds the configured limit
    #[error("dimension {dim} exceeds configured maximum {max}")]
    LimitExceeded { dim: usize, max: usize },

    /// Backend-internal failure
    #[error("backend error: {0}")]
    Backend(String),
}

impl LinalgError {
    /// Stable error symbol a host can raise as a structured condition.
    pub fn kind(&self) -> &'static str {
        match self {
            LinalgError::TypeMismatch { .. } => "type-mismatch",
            LinalgError::ShapeMismatch(_) => "shape-mismatch",
            LinalgError::DimensionMismatch { .. } => "dimension-mismatch",
            LinalgError::SingularMatrix { .. } => "singular-matrix",
            LinalgError::ArityMismatch { .. } => "wrong-number-of-arguments",
            LinalgError::UnknownFunction(_) => "void-function",
            LinalgError::LimitExceeded { .. } => "limit-exceeded",
            LinalgError::Backend(_) => "backend-error",
        }
    }

    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        LinalgError::ShapeMismatch(msg.into())
    }
}
