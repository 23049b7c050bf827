use crate::{error::LinalgError, view::MatrixViewMut, NEAR_ZERO};

/// Solves the square system `A x = b` by Gaussian elimination with partial pivoting.
///
/// Both `a` and `b` are used as workspace and hold no meaningful values on return.
///
/// # Arguments
///
/// * `a` - The `n x n` system matrix. May be a strided view into a larger buffer.
/// * `b` - The right-hand side of length `n`.
/// * `x` - The output solution of length `n`.
///
/// # Errors
///
/// * [`LinalgError::DimensionMismatch`] if `a` is not square or `b`/`x` do not have length `n`.
/// * [`LinalgError::SingularMatrix`] if a pivot or diagonal magnitude drops below
///   [`NEAR_ZERO`]. `x` is unspecified in that case.
///
/// Example:
///
/// ```rust
/// use warpmath_linalg::{solve_linear, MatrixViewMut};
///
/// let mut a = [3.0, 1.0, 1.0, 2.0];
/// let mut b = [9.0, 8.0];
/// let mut x = [0.0; 2];
/// solve_linear(MatrixViewMut::from_row_major(&mut a, 2, 2).unwrap(), &mut b, &mut x).unwrap();
///
/// assert!((x[0] - 2.0).abs() < 1e-12);
/// assert!((x[1] - 3.0).abs() < 1e-12);
/// ```
pub fn solve_linear(
    mut a: MatrixViewMut<'_>,
    b: &mut [f64],
    x: &mut [f64],
) -> Result<(), LinalgError> {
    let n = a.rows();
    if !a.is_square() {
        return Err(LinalgError::dimension_mismatch(
            "system matrix must be square",
            &[n, n],
            &[a.rows(), a.cols()],
        ));
    }
    if b.len() != n {
        return Err(LinalgError::dimension_mismatch(
            "right-hand side length",
            &[n],
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

    forward_eliminate(&mut a, b)?;
    back_substitute(&a, b, x)
}

/// Moves the row with the largest `|A[., k]|` among rows `k..n` into row `k`.
///
/// Walks upwards from the last row swapping adjacent rows whenever the upper one has the smaller
/// magnitude, i.e. a single bubble pass. The other rows keep the order that pass leaves them in.
fn bubble_pivot(a: &mut MatrixViewMut<'_>, b: &mut [f64], k: usize) {
    for i in (k + 1..a.rows()).rev() {
        if a[(i - 1, k)].abs() < a[(i, k)].abs() {
            a.swap_rows(i - 1, i);
            b.swap(i - 1, i);
        }
    }
}

fn forward_eliminate(a: &mut MatrixViewMut<'_>, b: &mut [f64]) -> Result<(), LinalgError> {
    let n = a.rows();
    for k in 0..n.saturating_sub(1) {
        bubble_pivot(a, b, k);

        let pivot = a[(k, k)];
        if pivot.abs() < NEAR_ZERO {
            return Err(LinalgError::SingularMatrix { index: k });
        }

        for row in k + 1..n {
            let c = a[(row, k)] / pivot;
            let (pivot_row, target) = a.split_rows_mut(k, row);
            for (t, p) in target.iter_mut().zip(pivot_row) {
                *t -= c * p;
            }
            b[row] -= c * b[k];
        }
    }
    Ok(())
}

fn back_substitute(a: &MatrixViewMut<'_>, b: &[f64], x: &mut [f64]) -> Result<(), LinalgError> {
    for i in (0..a.rows()).rev() {
        let diag = a[(i, i)];
        if diag.abs() < NEAR_ZERO {
            return Err(LinalgError::SingularMatrix { index: i });
        }
        let acc = a.row(i)[i + 1..]
            .iter()
            .zip(&x[i + 1..])
            .fold(0.0, |acc, (aij, xj)| acc + aij * xj);
        x[i] = (b[i] - acc) / diag;
    }
    Ok(())
}
