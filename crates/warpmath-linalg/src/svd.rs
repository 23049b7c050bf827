//! Golub-Reinsch singular value decomposition.
//!
//! [`svd_in_place`] factors an `m x n` matrix (`m >= n`) as `A = U * diag(w) * V'`. The input
//! view is overwritten with `U`, the singular values are written to `w` and the right singular
//! vectors to `V`. The singular values are non-negative but come out in no particular order.
//!
//! [`Svd`] is the non-destructive variant: it copies the input and owns the factors, and adds the
//! helpers used for rank deficient fits (rank, null vector, minimum-norm solve).

use crate::{
    error::LinalgError,
    view::{MatrixView, MatrixViewMut},
};

/// Maximum number of implicit-shift QR sweeps per singular value.
pub const SVD_MAX_ITERATIONS: usize = 30;

/// Parameters of the iterative diagonalization.
#[derive(Debug, Clone)]
pub struct SvdConfig {
    /// Maximum number of QR sweeps spent on a single singular value.
    pub max_iterations: usize,
}

impl Default for SvdConfig {
    fn default() -> Self {
        Self {
            max_iterations: SVD_MAX_ITERATIONS,
        }
    }
}

/// Returns `|a|` with the sign of `b`. Zero counts as non-negative.
#[inline]
pub fn sign(a: f64, b: f64) -> f64 {
    if b >= 0.0 {
        a.abs()
    } else {
        -a.abs()
    }
}

/// Computes `sqrt(a^2 + b^2)` without destructive underflow or overflow.
///
/// The smaller magnitude is divided by the larger one before squaring.
#[inline]
pub fn pythag(a: f64, b: f64) -> f64 {
    let absa = a.abs();
    let absb = b.abs();

    if absa > absb {
        let ct = absb / absa;
        absa * (1.0 + ct * ct).sqrt()
    } else if absb == 0.0 {
        0.0
    } else {
        let ct = absa / absb;
        absb * (1.0 + ct * ct).sqrt()
    }
}

/// Computes the singular value decomposition in place with the default configuration.
///
/// See [`svd_in_place_with`].
pub fn svd_in_place(
    u: MatrixViewMut<'_>,
    w: &mut [f64],
    v: MatrixViewMut<'_>,
) -> Result<(), LinalgError> {
    svd_in_place_with(&SvdConfig::default(), u, w, v)
}

/// Computes the singular value decomposition `A = U * diag(w) * V'` in place.
///
/// The input matrix is consumed: on success `u` holds the left singular vectors. Use
/// [`Svd::compute`] to keep the input intact.
///
/// # Arguments
///
/// * `config` - Iteration budget of the diagonalization.
/// * `u` - The `m x n` matrix `A` with `m >= n`, overwritten with `U`.
/// * `w` - The output singular values, of length `n`. Non-negative, not sorted.
/// * `v` - The output `n x n` right singular vectors (not transposed).
///
/// # Errors
///
/// * [`LinalgError::DimensionMismatch`] if `m < n` or `w`/`v` have the wrong shape.
/// * [`LinalgError::SvdNoConvergence`] if a singular value needs more sweeps than
///   `config.max_iterations`. `u`, `w` and `v` are left partially transformed and must not be
///   used.
pub fn svd_in_place_with(
    config: &SvdConfig,
    mut u: MatrixViewMut<'_>,
    w: &mut [f64],
    mut v: MatrixViewMut<'_>,
) -> Result<(), LinalgError> {
    let (m, n) = (u.rows(), u.cols());
    if m < n {
        return Err(LinalgError::dimension_mismatch(
            "input needs at least as many rows as columns",
            &[n, n],
            &[m, n],
        ));
    }
    if w.len() != n {
        return Err(LinalgError::dimension_mismatch(
            "singular value buffer length",
            &[n],
            &[w.len()],
        ));
    }
    if v.rows() != n || v.cols() != n {
        return Err(LinalgError::dimension_mismatch(
            "right singular vectors shape",
            &[n, n],
            &[v.rows(), v.cols()],
        ));
    }
    if n == 0 {
        return Ok(());
    }

    let mut rv1 = vec![0.0; n];
    let anorm = bidiagonalize(&mut u, w, &mut rv1);
    accumulate_right(&u, &rv1, &mut v);
    accumulate_left(&mut u, w);
    diagonalize(config, &mut u, w, &mut rv1, &mut v, anorm)
}

/// Householder reduction to upper bidiagonal form.
///
/// The diagonal goes to `w`, the super-diagonal to `rv1` (with `rv1[0] == 0`). The reflectors
/// stay in `u`. Returns the largest `|w[i]| + |rv1[i]|`.
fn bidiagonalize(u: &mut MatrixViewMut<'_>, w: &mut [f64], rv1: &mut [f64]) -> f64 {
    let (m, n) = (u.rows(), u.cols());
    let mut g = 0.0;
    let mut scale = 0.0;
    let mut anorm: f64 = 0.0;

    for i in 0..n {
        let l = i + 1;
        rv1[i] = scale * g;

        // column reflector
        g = 0.0;
        scale = 0.0;
        let mut s = 0.0;
        for k in i..m {
            scale += u[(k, i)].abs();
        }
        if scale != 0.0 {
            for k in i..m {
                u[(k, i)] /= scale;
                s += u[(k, i)] * u[(k, i)];
            }
            let f = u[(i, i)];
            g = -sign(s.sqrt(), f);
            let h = f * g - s;
            u[(i, i)] = f - g;
            for j in l..n {
                let mut s = 0.0;
                for k in i..m {
                    s += u[(k, i)] * u[(k, j)];
                }
                let f = s / h;
                for k in i..m {
                    u[(k, j)] += f * u[(k, i)];
                }
            }
            for k in i..m {
                u[(k, i)] *= scale;
            }
        }
        w[i] = scale * g;

        // row reflector
        g = 0.0;
        scale = 0.0;
        s = 0.0;
        if i != n - 1 {
            for k in l..n {
                scale += u[(i, k)].abs();
            }
            if scale != 0.0 {
                for k in l..n {
                    u[(i, k)] /= scale;
                    s += u[(i, k)] * u[(i, k)];
                }
                let f = u[(i, l)];
                g = -sign(s.sqrt(), f);
                let h = f * g - s;
                u[(i, l)] = f - g;
                for k in l..n {
                    rv1[k] = u[(i, k)] / h;
                }
                for j in l..m {
                    let mut s = 0.0;
                    for k in l..n {
                        s += u[(j, k)] * u[(i, k)];
                    }
                    for k in l..n {
                        u[(j, k)] += s * rv1[k];
                    }
                }
                for k in l..n {
                    u[(i, k)] *= scale;
                }
            }
        }

        anorm = anorm.max(w[i].abs() + rv1[i].abs());
    }

    anorm
}

/// Builds `V` from the row reflectors, last one first.
fn accumulate_right(u: &MatrixViewMut<'_>, rv1: &[f64], v: &mut MatrixViewMut<'_>) {
    let n = u.cols();
    // the last row reflector is never formed
    let mut g = 0.0;
    let mut l = n;

    for i in (0..n).rev() {
        if i < n - 1 {
            if g != 0.0 {
                for j in l..n {
                    v[(j, i)] = (u[(i, j)] / u[(i, l)]) / g;
                }
                for j in l..n {
                    let mut s = 0.0;
                    for k in l..n {
                        s += u[(i, k)] * v[(k, j)];
                    }
                    for k in l..n {
                        v[(k, j)] += s * v[(k, i)];
                    }
                }
            }
            for j in l..n {
                v[(i, j)] = 0.0;
                v[(j, i)] = 0.0;
            }
        }
        v[(i, i)] = 1.0;
        g = rv1[i];
        l = i;
    }
}

/// Builds `U` from the column reflectors, last one first.
fn accumulate_left(u: &mut MatrixViewMut<'_>, w: &[f64]) {
    let (m, n) = (u.rows(), u.cols());

    for i in (0..n).rev() {
        let l = i + 1;
        for j in l..n {
            u[(i, j)] = 0.0;
        }
        if w[i] != 0.0 {
            let g = 1.0 / w[i];
            for j in l..n {
                let mut s = 0.0;
                for k in l..m {
                    s += u[(k, i)] * u[(k, j)];
                }
                let f = (s / u[(i, i)]) * g;
                for k in i..m {
                    u[(k, j)] += f * u[(k, i)];
                }
            }
            for j in i..m {
                u[(j, i)] *= g;
            }
        } else {
            for j in i..m {
                u[(j, i)] = 0.0;
            }
        }
        u[(i, i)] += 1.0;
    }
}

/// Applies the Givens rotation `(c, s)` to columns `a` and `b` of `mat`.
#[inline]
fn rotate_columns(mat: &mut MatrixViewMut<'_>, a: usize, b: usize, c: f64, s: f64) {
    for r in 0..mat.rows() {
        let y = mat[(r, a)];
        let z = mat[(r, b)];
        mat[(r, a)] = y * c + z * s;
        mat[(r, b)] = z * c - y * s;
    }
}

/// Diagonalizes the bidiagonal form with implicit-shift QR sweeps.
fn diagonalize(
    config: &SvdConfig,
    u: &mut MatrixViewMut<'_>,
    w: &mut [f64],
    rv1: &mut [f64],
    v: &mut MatrixViewMut<'_>,
    anorm: f64,
) -> Result<(), LinalgError> {
    let n = w.len();
    let negligible = |value: f64| value.abs() + anorm == anorm;

    for k in (0..n).rev() {
        let mut its = 0;
        loop {
            // look for a split; rv1[0] is always zero so the scan stops at l == 0
            let mut l = k;
            let mut cancel = true;
            loop {
                if l == 0 || negligible(rv1[l]) {
                    cancel = false;
                    break;
                }
                if negligible(w[l - 1]) {
                    break;
                }
                l -= 1;
            }

            // w[l - 1] is zero: chase rv1[l] out of the block
            if cancel {
                let nm = l - 1;
                let mut c = 0.0;
                let mut s = 1.0;
                for i in l..=k {
                    let f = s * rv1[i];
                    rv1[i] *= c;
                    if negligible(f) {
                        break;
                    }
                    let g = w[i];
                    let h = pythag(f, g);
                    w[i] = h;
                    let h = 1.0 / h;
                    c = g * h;
                    s = -f * h;
                    rotate_columns(u, nm, i, c, s);
                }
            }

            let z = w[k];
            if l == k {
                if z < 0.0 {
                    w[k] = -z;
                    for j in 0..n {
                        v[(j, k)] = -v[(j, k)];
                    }
                }
                log::trace!("singular value {k} converged after {its} sweeps");
                break;
            }

            if its + 1 >= config.max_iterations {
                return Err(LinalgError::SvdNoConvergence {
                    index: k,
                    iterations: config.max_iterations,
                });
            }

            // shift from the bottom 2x2 minor
            let nm = k - 1;
            let mut x = w[l];
            let mut y = w[nm];
            let mut g = rv1[nm];
            let mut h = rv1[k];
            let mut f = ((y - z) * (y + z) + (g - h) * (g + h)) / (2.0 * h * y);
            g = pythag(f, 1.0);
            f = ((x - z) * (x + z) + h * ((y / (f + sign(g, f))) - h)) / x;

            // QR sweep
            let mut c = 1.0;
            let mut s = 1.0;
            for j in l..=nm {
                let i = j + 1;
                g = rv1[i];
                y = w[i];
                h = s * g;
                g *= c;
                let mut z = pythag(f, h);
                rv1[j] = z;
                c = f / z;
                s = h / z;
                f = x * c + g * s;
                g = g * c - x * s;
                h = y * s;
                y *= c;
                rotate_columns(v, j, i, c, s);

                z = pythag(f, h);
                w[j] = z;
                // z == 0 keeps the previous rotation
                if z != 0.0 {
                    z = 1.0 / z;
                    c = f * z;
                    s = h * z;
                }
                f = c * g + s * y;
                x = c * y - s * g;
                rotate_columns(u, j, i, c, s);
            }
            rv1[l] = 0.0;
            rv1[k] = f;
            w[k] = x;
            its += 1;
        }
    }

    Ok(())
}

/// An owned singular value decomposition `A = U * diag(w) * V'`.
///
/// Example:
///
/// ```rust
/// use warpmath_linalg::{MatrixView, Svd};
///
/// let a = [3.0, 0.0, 0.0, -2.0, 0.0, 0.0];
/// let svd = Svd::compute(MatrixView::from_row_major(&a, 3, 2).unwrap()).unwrap();
///
/// let mut w = svd.singular_values().to_vec();
/// w.sort_by(|a, b| a.total_cmp(b));
/// assert!((w[0] - 2.0).abs() < 1e-12);
/// assert!((w[1] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Svd {
    u: Vec<f64>,
    w: Vec<f64>,
    v: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Svd {
    /// Decomposes a copy of `a` with the default configuration, leaving `a` untouched.
    pub fn compute(a: MatrixView<'_>) -> Result<Self, LinalgError> {
        Self::compute_with(&SvdConfig::default(), a)
    }

    /// Decomposes a copy of `a` with the given configuration.
    ///
    /// # Errors
    ///
    /// Same as [`svd_in_place_with`].
    pub fn compute_with(config: &SvdConfig, a: MatrixView<'_>) -> Result<Self, LinalgError> {
        let (rows, cols) = (a.rows(), a.cols());
        let mut u = a.to_vec();
        let mut w = vec![0.0; cols];
        let mut v = vec![0.0; cols * cols];

        svd_in_place_with(
            config,
            MatrixViewMut::from_row_major(&mut u, rows, cols)?,
            &mut w,
            MatrixViewMut::from_row_major(&mut v, cols, cols)?,
        )?;

        Ok(Self {
            u,
            w,
            v,
            rows,
            cols,
        })
    }

    /// Number of rows of the decomposed matrix.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns of the decomposed matrix.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The `rows x cols` left singular vectors.
    pub fn u(&self) -> MatrixView<'_> {
        MatrixView::from_parts(&self.u, self.rows, self.cols, self.cols)
    }

    /// The singular values, non-negative and unsorted.
    pub fn singular_values(&self) -> &[f64] {
        &self.w
    }

    /// The `cols x cols` right singular vectors (not transposed).
    pub fn v(&self) -> MatrixView<'_> {
        MatrixView::from_parts(&self.v, self.cols, self.cols, self.cols)
    }

    fn max_singular_value(&self) -> f64 {
        self.w.iter().copied().fold(0.0, f64::max)
    }

    /// Number of singular values larger than `tolerance` times the largest one.
    pub fn rank(&self, tolerance: f64) -> usize {
        let threshold = tolerance * self.max_singular_value();
        self.w.iter().filter(|&&wi| wi > threshold).count()
    }

    /// Column of `V` paired with the smallest singular value.
    ///
    /// This is the unit vector `x` minimizing `|A x|`, used to fit homogeneous models such as
    /// homographies. Empty when the matrix has no columns.
    pub fn min_singular_vector(&self) -> Vec<f64> {
        let Some(col) = self
            .w
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
        else {
            return Vec::new();
        };
        let v = self.v();
        (0..self.cols).map(|r| v[(r, col)]).collect()
    }

    /// Minimum-norm least-squares solution of `A x = b`.
    ///
    /// Singular values not larger than `tolerance` times the largest one are treated as zero,
    /// i.e. `x = V * diag(1 / w_i) * U' * b` restricted to the retained values.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if `b.len() != rows` or `x.len() != cols`.
    pub fn solve(&self, b: &[f64], tolerance: f64, x: &mut [f64]) -> Result<(), LinalgError> {
        if b.len() != self.rows {
            return Err(LinalgError::dimension_mismatch(
                "right-hand side length",
                &[self.rows],
                &[b.len()],
            ));
        }
        if x.len() != self.cols {
            return Err(LinalgError::dimension_mismatch(
                "solution length",
                &[self.cols],
                &[x.len()],
            ));
        }

        let threshold = tolerance * self.max_singular_value();
        let u = self.u();
        let v = self.v();

        let projected = self
            .w
            .iter()
            .enumerate()
            .map(|(j, &wj)| {
                if wj > threshold {
                    (0..self.rows).map(|i| u[(i, j)] * b[i]).sum::<f64>() / wj
                } else {
                    0.0
                }
            })
            .collect::<Vec<_>>();

        for (r, xr) in x.iter_mut().enumerate() {
            *xr = projected
                .iter()
                .enumerate()
                .map(|(j, p)| v[(r, j)] * p)
                .sum();
        }

        Ok(())
    }

    /// Recomputes `U * diag(w) * V'` as a contiguous `rows x cols` buffer.
    pub fn reconstruct(&self) -> Vec<f64> {
        let u = self.u();
        let v = self.v();
        let mut out = vec![0.0; self.rows * self.cols];
        for (r, row) in out.chunks_exact_mut(self.cols.max(1)).enumerate() {
            for (c, dst) in row.iter_mut().enumerate() {
                *dst = (0..self.cols)
                    .map(|k| u[(r, k)] * self.w[k] * v[(c, k)])
                    .sum();
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{pythag, sign, svd_in_place, svd_in_place_with, Svd, SvdConfig};
    use crate::{
        error::LinalgError,
        view::{MatrixView, MatrixViewMut},
    };
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Vec<f64> {
        (0..rows * cols)
            .map(|_| rng.random_range(-1.0..1.0))
            .collect()
    }

    /// Checks that the columns of a `rows x cols` matrix are orthonormal.
    fn assert_orthonormal_columns(mat: MatrixView<'_>, epsilon: f64) {
        for a in 0..mat.cols() {
            for b in 0..mat.cols() {
                let dot = (0..mat.rows())
                    .map(|r| mat[(r, a)] * mat[(r, b)])
                    .sum::<f64>();
                let expected = if a == b { 1.0 } else { 0.0 };
                assert_relative_eq!(dot, expected, epsilon = epsilon);
            }
        }
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(-3.0, 2.0), 3.0);
        assert_eq!(sign(3.0, -2.0), -3.0);
        assert_eq!(sign(-3.0, 0.0), 3.0);
        assert_eq!(sign(-3.0, -0.0), 3.0);
    }

    #[test]
    fn test_pythag() {
        assert_eq!(pythag(0.0, 0.0), 0.0);
        assert_relative_eq!(pythag(3.0, 4.0), 5.0, epsilon = 1e-15);
        assert_relative_eq!(pythag(-4.0, 3.0), 5.0, epsilon = 1e-15);
        assert_eq!(pythag(0.0, -2.0), 2.0);

        // the naive formula overflows or underflows here
        assert_relative_eq!(pythag(3e200, 4e200), 5e200, max_relative = 1e-15);
        assert_relative_eq!(pythag(3e-200, 4e-200), 5e-200, max_relative = 1e-15);
    }

    #[test]
    fn test_svd_diagonal() -> Result<(), LinalgError> {
        #[rustfmt::skip]
        let mut u = [
            2.0, 0.0, 0.0,
            0.0, -5.0, 0.0,
            0.0, 0.0, 1.0,
        ];
        let mut w = [0.0; 3];
        let mut v = [0.0; 9];
        svd_in_place(
            MatrixViewMut::from_row_major(&mut u, 3, 3)?,
            &mut w,
            MatrixViewMut::from_row_major(&mut v, 3, 3)?,
        )?;

        let mut sorted = w;
        sorted.sort_by(|a, b| a.total_cmp(b));
        assert_relative_eq!(sorted[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(sorted[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(sorted[2], 5.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_svd_random_reconstruction() -> Result<(), LinalgError> {
        let mut rng = StdRng::seed_from_u64(42);
        for &(rows, cols) in &[(1, 1), (2, 2), (3, 3), (5, 3), (8, 8), (9, 9), (20, 6)] {
            let a = random_matrix(&mut rng, rows, cols);
            let svd = Svd::compute(MatrixView::from_row_major(&a, rows, cols)?)?;

            assert!(svd.singular_values().iter().all(|&wi| wi >= 0.0));
            assert_orthonormal_columns(svd.u(), 1e-10);
            assert_orthonormal_columns(svd.v(), 1e-10);

            for (r, e) in svd.reconstruct().iter().zip(&a) {
                assert_relative_eq!(r, e, epsilon = 1e-10);
            }
        }
        Ok(())
    }

    #[test]
    fn test_svd_rarely_fails_on_random_input() -> Result<(), LinalgError> {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut failures = 0;
        for trial in 0..200 {
            let cols = 1 + trial % 9;
            let rows = cols + trial % 4;
            let mut u = random_matrix(&mut rng, rows, cols);
            let mut w = vec![0.0; cols];
            let mut v = vec![0.0; cols * cols];
            let res = svd_in_place(
                MatrixViewMut::from_row_major(&mut u, rows, cols)?,
                &mut w,
                MatrixViewMut::from_row_major(&mut v, cols, cols)?,
            );
            if matches!(res, Err(LinalgError::SvdNoConvergence { .. })) {
                failures += 1;
            }
        }
        assert_eq!(failures, 0);
        Ok(())
    }

    #[test]
    fn test_svd_rank_deficient() -> Result<(), LinalgError> {
        // third column is the sum of the first two
        #[rustfmt::skip]
        let a = [
            1.0, 2.0, 3.0,
            4.0, 5.0, 9.0,
            7.0, 8.0, 15.0,
            1.0, 0.0, 1.0,
        ];
        let svd = Svd::compute(MatrixView::from_row_major(&a, 4, 3)?)?;
        assert_eq!(svd.rank(1e-12), 2);

        let null = svd.min_singular_vector();
        let norm = null.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert_relative_eq!(norm, 1.0, epsilon = 1e-12);
        // proportional to [1, 1, -1]
        assert_relative_eq!(null[0], null[1], epsilon = 1e-10);
        assert_relative_eq!(null[0], -null[2], epsilon = 1e-10);

        for (r, e) in svd.reconstruct().iter().zip(&a) {
            assert_relative_eq!(r, e, epsilon = 1e-10);
        }
        Ok(())
    }

    #[test]
    fn test_svd_solve_minimum_norm() -> Result<(), LinalgError> {
        // x0 + x1 = 2 observed twice, the minimum-norm solution is [1, 1]
        let a = [1.0, 1.0, 1.0, 1.0];
        let b = [2.0, 2.0];
        let svd = Svd::compute(MatrixView::from_row_major(&a, 2, 2)?)?;

        let mut x = [0.0; 2];
        svd.solve(&b, 1e-12, &mut x)?;
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-12);

        assert!(matches!(
            svd.solve(&[1.0], 1e-12, &mut x),
            Err(LinalgError::DimensionMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_svd_compute_keeps_input() -> Result<(), LinalgError> {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let view = MatrixView::from_row_major(&a, 3, 2)?;
        let svd = Svd::compute(view)?;
        assert_eq!(a, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!((svd.rows(), svd.cols()), (3, 2));
        Ok(())
    }

    #[test]
    fn test_svd_strided_input() -> Result<(), LinalgError> {
        // 3x2 block with a padding column that must not be touched
        #[rustfmt::skip]
        let mut data = [
            1.0, 2.0, 100.0,
            3.0, 4.0, 100.0,
            5.0, 6.0, 100.0,
        ];
        let original = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut w = [0.0; 2];
        let mut v = [0.0; 4];
        svd_in_place(
            MatrixViewMut::new(&mut data, 3, 2, 3)?,
            &mut w,
            MatrixViewMut::from_row_major(&mut v, 2, 2)?,
        )?;
        assert_eq!(data[2], 100.0);
        assert_eq!(data[5], 100.0);
        assert_eq!(data[8], 100.0);

        let u = MatrixView::new(&data, 3, 2, 3)?;
        let v = MatrixView::from_row_major(&v, 2, 2)?;
        for r in 0..3 {
            for c in 0..2 {
                let value = (0..2).map(|k| u[(r, k)] * w[k] * v[(c, k)]).sum::<f64>();
                assert_relative_eq!(value, original[r * 2 + c], epsilon = 1e-12);
            }
        }
        Ok(())
    }

    #[test]
    fn test_svd_zero_matrix() -> Result<(), LinalgError> {
        let a = [0.0; 6];
        let svd = Svd::compute(MatrixView::from_row_major(&a, 3, 2)?)?;
        assert_eq!(svd.singular_values(), &[0.0, 0.0]);
        assert_eq!(svd.rank(1e-12), 0);
        Ok(())
    }

    #[test]
    fn test_svd_zero_width_block() -> Result<(), LinalgError> {
        let a = [1.0; 9];
        let block = MatrixView::from_row_major(&a, 3, 3)?.submatrix(0, 0, 3, 0)?;
        let svd = Svd::compute(block)?;
        assert_eq!((svd.rows(), svd.cols()), (3, 0));
        assert!(svd.singular_values().is_empty());
        assert!(svd.min_singular_vector().is_empty());
        assert!(svd.reconstruct().is_empty());
        Ok(())
    }

    #[test]
    fn test_svd_iteration_budget_exhausted() -> Result<(), LinalgError> {
        let mut u = [1.0, 2.0, 3.0, 4.0];
        let mut w = [0.0; 2];
        let mut v = [0.0; 4];
        let res = svd_in_place_with(
            &SvdConfig { max_iterations: 0 },
            MatrixViewMut::from_row_major(&mut u, 2, 2)?,
            &mut w,
            MatrixViewMut::from_row_major(&mut v, 2, 2)?,
        );
        assert_eq!(
            res,
            Err(LinalgError::SvdNoConvergence {
                index: 1,
                iterations: 0
            })
        );
        Ok(())
    }

    #[test]
    fn test_svd_shape_errors() -> Result<(), LinalgError> {
        let mut u = [1.0; 6];
        let mut w = [0.0; 3];
        let mut v = [0.0; 9];
        let res = svd_in_place(
            MatrixViewMut::from_row_major(&mut u, 2, 3)?,
            &mut w,
            MatrixViewMut::from_row_major(&mut v, 3, 3)?,
        );
        assert!(matches!(res, Err(LinalgError::DimensionMismatch { .. })));

        let mut w = [0.0; 1];
        let res = svd_in_place(
            MatrixViewMut::from_row_major(&mut u, 3, 2)?,
            &mut w,
            MatrixViewMut::from_row_major(&mut v, 3, 3)?,
        );
        assert!(matches!(res, Err(LinalgError::DimensionMismatch { .. })));
        Ok(())
    }
}
