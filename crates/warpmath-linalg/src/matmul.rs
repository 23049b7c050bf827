use crate::{
    error::LinalgError,
    view::{MatrixView, MatrixViewMut},
};

/// Multiplies `m1` by `m2` and writes the product into `res`.
///
/// This is the direct `O(rows * cols * inner)` triple sum, accumulated in ascending order of the
/// inner index. The borrow rules rule out any aliasing between the inputs and the output.
///
/// # Arguments
///
/// * `m1` - The left operand with shape `(rows, inner)`.
/// * `m2` - The right operand with shape `(inner, cols)`.
/// * `res` - The output with shape `(rows, cols)`.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the shapes are incompatible.
pub fn multiply(
    m1: MatrixView<'_>,
    m2: MatrixView<'_>,
    mut res: MatrixViewMut<'_>,
) -> Result<(), LinalgError> {
    if m1.cols() != m2.rows() {
        return Err(LinalgError::dimension_mismatch(
            "inner dimensions of the operands differ",
            &[m1.rows(), m1.cols()],
            &[m2.rows(), m2.cols()],
        ));
    }
    if res.rows() != m1.rows() || res.cols() != m2.cols() {
        return Err(LinalgError::dimension_mismatch(
            "output shape",
            &[m1.rows(), m2.cols()],
            &[res.rows(), res.cols()],
        ));
    }

    for row in 0..m1.rows() {
        let lhs = m1.row(row);
        for (col, dst) in res.row_mut(row).iter_mut().enumerate() {
            *dst = lhs
                .iter()
                .enumerate()
                .fold(0.0, |acc, (inner, l)| acc + l * m2[(inner, col)]);
        }
    }

    Ok(())
}

/// Multiplies two contiguous row-major matrices.
///
/// Convenience form of [`multiply`] for plain slices of exactly
/// `m1_rows * inner_dim`, `inner_dim * m2_cols` and `m1_rows * m2_cols` elements.
///
/// Example:
///
/// ```rust
/// use warpmath_linalg::multiply_slices;
///
/// let m1 = [1.0, 2.0, 3.0, 4.0];
/// let m2 = [0.0, 1.0, 1.0, 0.0];
/// let mut res = [0.0; 4];
/// multiply_slices(&m1, &m2, &mut res, 2, 2, 2).unwrap();
///
/// assert_eq!(res, [2.0, 1.0, 4.0, 3.0]);
/// ```
pub fn multiply_slices(
    m1: &[f64],
    m2: &[f64],
    res: &mut [f64],
    m1_rows: usize,
    inner_dim: usize,
    m2_cols: usize,
) -> Result<(), LinalgError> {
    let expected = [m1_rows * inner_dim, inner_dim * m2_cols, m1_rows * m2_cols];
    let actual = [m1.len(), m2.len(), res.len()];
    if expected != actual {
        return Err(LinalgError::dimension_mismatch(
            "buffer lengths",
            &expected,
            &actual,
        ));
    }

    multiply(
        MatrixView::from_row_major(m1, m1_rows, inner_dim)?,
        MatrixView::from_row_major(m2, inner_dim, m2_cols)?,
        MatrixViewMut::from_row_major(res, m1_rows, m2_cols)?,
    )
}
