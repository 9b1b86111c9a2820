//! Errors reported by matrix operations.

use thiserror::Error;

/// Errors that can occur in matrix computations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("dimension mismatch in {op}: {left:?} vs {right:?}")]
    DimensionMismatch {
        /// The operation that was attempted.
        op: &'static str,
        /// Shape (rows, cols) of the left operand.
        left: (usize, usize),
        /// Shape (rows, cols) of the right operand.
        right: (usize, usize),
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("matrix is singular")]
    SingularMatrix,

    #[error("linear system is inconsistent")]
    InconsistentSystem,

    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    IndexOutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Row count of the matrix.
        rows: usize,
        /// Column count of the matrix.
        cols: usize,
    },

    #[error("{op} requires a square matrix, got {rows}x{cols}")]
    NonSquareMatrix {
        /// The operation that was attempted.
        op: &'static str,
        /// Row count of the matrix.
        rows: usize,
        /// Column count of the matrix.
        cols: usize,
    },

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("scalar does not commute with matrix entries")]
    NonCommutativeScalar,

    #[error("internal consistency fault: {0}")]
    InternalConsistencyFault(String),
}

/// Result type for matrix operations.
pub type MatrixResult<T> = Result<T, MatrixError>;
