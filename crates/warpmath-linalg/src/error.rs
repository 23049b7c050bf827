use thiserror::Error;

/// Errors returned by the linear algebra kernels.
///
/// Outputs written by a routine that returns an error are unspecified and must be discarded.
#[derive(Debug, Error, PartialEq)]
pub enum LinalgError {
    /// A pivot or diagonal entry fell below [`crate::NEAR_ZERO`].
    ///
    /// The system matrix is singular or numerically indistinguishable from singular. For least
    /// squares this usually means the observation matrix is rank deficient, in which case
    /// [`crate::svd::Svd::solve`] gives the minimum-norm solution instead.
    #[error("Matrix is singular or near-singular: pivot {index} is below tolerance")]
    SingularMatrix {
        /// Row of the offending pivot after row exchanges.
        index: usize,
    },

    /// The implicit-shift QR iteration did not drive a super-diagonal entry to zero.
    #[error("SVD did not converge for singular value {index} within {iterations} iterations")]
    SvdNoConvergence {
        /// Index of the singular value that failed to converge.
        index: usize,
        /// Iteration budget that was exhausted.
        iterations: usize,
    },

    /// The requested view does not fit the buffer it borrows.
    #[error("Invalid matrix view: {rows}x{cols} with stride {stride} does not fit a buffer of {len} elements")]
    InvalidView {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        cols: usize,
        /// Requested row stride.
        stride: usize,
        /// Length of the borrowed buffer.
        len: usize,
    },

    /// Operand shapes are incompatible for the requested operation.
    #[error("Dimension mismatch: {message}. Expected: {expected}, got: {actual}")]
    DimensionMismatch {
        /// Human-readable description of the mismatch
        message: String,
        /// Expected shape description
        expected: String,
        /// Actual shape description
        actual: String,
    },

    /// A caller-lent scratch buffer is too short.
    #[error("Scratch buffer too small: {required} elements required, got {actual}")]
    ScratchTooSmall {
        /// Minimum number of elements.
        required: usize,
        /// Number of elements lent by the caller.
        actual: usize,
    },
}

impl LinalgError {
    /// Creates a DimensionMismatch error with formatted shapes.
    pub fn dimension_mismatch(
        message: impl Into<String>,
        expected: &[usize],
        actual: &[usize],
    ) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }
    }
}
