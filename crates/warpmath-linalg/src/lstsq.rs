use crate::{
    error::LinalgError,
    solve::solve_linear,
    view::{MatrixView, MatrixViewMut},
};

/// Workspace for the normal equations, either lent by the caller or owned by the call.
///
/// The output of [`least_squares`] is the same whichever variant is used.
#[derive(Debug)]
pub enum Scratch<'a> {
    /// Buffer lent by the caller, trimmed to the required length.
    Borrowed(&'a mut [f64]),
    /// Buffer allocated for the duration of a single call.
    Owned(Vec<f64>),
}

impl<'a> Scratch<'a> {
    /// Wraps the lent buffer or allocates `len` elements when none is given.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::ScratchTooSmall`] if the lent buffer is shorter than `len`.
    pub fn new(lent: Option<&'a mut [f64]>, len: usize) -> Result<Self, LinalgError> {
        match lent {
            Some(buf) if buf.len() < len => Err(LinalgError::ScratchTooSmall {
                required: len,
                actual: buf.len(),
            }),
            Some(buf) => Ok(Scratch::Borrowed(&mut buf[..len])),
            None => {
                log::trace!("allocating {len} scratch elements");
                Ok(Scratch::Owned(vec![0.0; len]))
            }
        }
    }

    /// Returns `true` if the buffer was allocated by the call.
    pub fn is_owned(&self) -> bool {
        matches!(self, Scratch::Owned(_))
    }

    /// Returns the workspace as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        match self {
            Scratch::Borrowed(buf) => buf,
            Scratch::Owned(buf) => buf.as_mut_slice(),
        }
    }
}

/// Number of scratch elements [`least_squares`] needs for `n` unknowns.
#[inline]
pub fn scratch_len(n: usize) -> usize {
    n * (n + 1)
}

/// Solves for `x` minimizing `|A x - b|^2` through the normal equations `A'A x = A'b`.
///
/// The normal equations square the condition number of `A`; for rank deficient or badly
/// conditioned observations prefer [`crate::svd::Svd::solve`].
///
/// # Arguments
///
/// * `a` - The `rows x n` observation matrix, `rows >= n` is expected.
/// * `b` - The observations, of length `rows`.
/// * `scratch` - Optional workspace of at least `n * (n + 1)` elements. When `None` a buffer
///   is allocated for the call and released before returning.
/// * `x` - The output solution of length `n`.
///
/// # Errors
///
/// * [`LinalgError::SingularMatrix`] if `A'A` is singular or near-singular.
/// * [`LinalgError::ScratchTooSmall`] if the lent scratch is too short.
/// * [`LinalgError::DimensionMismatch`] if `b` or `x` have the wrong length.
///
/// Example:
///
/// ```rust
/// use warpmath_linalg::{least_squares, MatrixView};
///
/// // fit y = p0 * t + p1 to three samples of y = 2t + 1
/// let a = [0.0, 1.0, 1.0, 1.0, 2.0, 1.0];
/// let b = [1.0, 3.0, 5.0];
/// let mut x = [0.0; 2];
/// least_squares(MatrixView::from_row_major(&a, 3, 2).unwrap(), &b, None, &mut x).unwrap();
///
/// assert!((x[0] - 2.0).abs() < 1e-12);
/// assert!((x[1] - 1.0).abs() < 1e-12);
/// ```
pub fn least_squares(
    a: MatrixView<'_>,
    b: &[f64],
    scratch: Option<&mut [f64]>,
    x: &mut [f64],
) -> Result<(), LinalgError> {
    let (rows, n) = (a.rows(), a.cols());
    if b.len() != rows {
        return Err(LinalgError::dimension_mismatch(
            "observation vector length",
            &[rows],
            &[b.len()],
        ));
    }
    if x.len() != n {
        return Err(LinalgError::dimension_mismatch(
            "solution length",
            &[n],
            &[x.len()],
        ));
    }

    let mut scratch = Scratch::new(scratch, scratch_len(n))?;
    let (at_a, at_b) = scratch.as_mut_slice().split_at_mut(n * n);
    normal_equations(&a, b, at_a, at_b);

    solve_linear(MatrixViewMut::from_row_major(at_a, n, n)?, at_b, x)
}

/// Writes `A'A` (row-major, `n x n`) into `at_a` and `A'b` into `at_b`.
///
/// Only the upper triangle is accumulated, the lower one is mirrored.
fn normal_equations(a: &MatrixView<'_>, b: &[f64], at_a: &mut [f64], at_b: &mut [f64]) {
    let (rows, n) = (a.rows(), a.cols());
    for i in 0..n {
        for j in i..n {
            let dot = (0..rows).fold(0.0, |acc, k| acc + a[(k, i)] * a[(k, j)]);
            at_a[i * n + j] = dot;
            at_a[j * n + i] = dot;
        }
        at_b[i] = (0..rows).fold(0.0, |acc, k| acc + a[(k, i)] * b[k]);
    }
}
