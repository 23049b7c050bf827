#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types shared by all kernels.
pub mod error;

/// Least-squares fitting through the normal equations.
pub mod lstsq;

/// Dense reference matrix multiplication.
pub mod matmul;

/// Gaussian elimination with partial pivoting.
pub mod solve;

/// Singular value decomposition (Golub-Reinsch with implicit QR shifts).
pub mod svd;

/// Strided row-major matrix views.
pub mod view;

pub use error::LinalgError;
pub use lstsq::{least_squares, Scratch};
pub use matmul::{multiply, multiply_slices};
pub use solve::solve_linear;
pub use svd::{pythag, sign, svd_in_place, svd_in_place_with, Svd, SvdConfig, SVD_MAX_ITERATIONS};
pub use view::{MatrixView, MatrixViewMut};

/// Pivots and diagonal entries with a magnitude below this value are treated as zero.
pub const NEAR_ZERO: f64 = 1e-16;
