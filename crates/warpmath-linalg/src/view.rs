use std::ops::{Index, IndexMut};

use crate::error::LinalgError;

/// Checks that a `rows x cols` matrix with the given row stride fits in `len` elements.
fn check_layout(len: usize, rows: usize, cols: usize, stride: usize) -> Result<(), LinalgError> {
    let invalid = || LinalgError::InvalidView {
        rows,
        cols,
        stride,
        len,
    };

    if stride < cols {
        return Err(invalid());
    }

    if rows == 0 || cols == 0 {
        return Ok(());
    }

    let required = (rows - 1)
        .checked_mul(stride)
        .and_then(|offset| offset.checked_add(cols))
        .ok_or_else(invalid)?;

    if len < required {
        return Err(invalid());
    }

    Ok(())
}

/// Offset of the first element of a sub-matrix, or `None` when the sub-matrix is empty.
fn submatrix_offset(
    parent: (usize, usize),
    stride: usize,
    origin: (usize, usize),
    shape: (usize, usize),
) -> Result<Option<usize>, LinalgError> {
    let (row0, col0) = origin;
    let (rows, cols) = shape;

    let row_end = row0.checked_add(rows);
    let col_end = col0.checked_add(cols);
    if row_end.map_or(true, |end| end > parent.0) || col_end.map_or(true, |end| end > parent.1) {
        return Err(LinalgError::dimension_mismatch(
            "sub-matrix exceeds the parent view",
            &[parent.0, parent.1],
            &[row0.saturating_add(rows), col0.saturating_add(cols)],
        ));
    }

    if rows == 0 || cols == 0 {
        return Ok(None);
    }

    Ok(Some(row0 * stride + col0))
}

/// Offset of the first element of `row`.
///
/// Zero-width views may carry any stride over any buffer, their rows all start at 0.
#[inline]
fn row_start(row: usize, cols: usize, stride: usize) -> usize {
    if cols == 0 {
        0
    } else {
        row * stride
    }
}

/// A read-only, row-major view into a matrix stored in a borrowed buffer.
///
/// Element `(r, c)` lives at offset `r * stride + c`. The stride may be larger than the number of
/// columns, which allows viewing a block of a bigger matrix without copying.
///
/// # Examples
///
/// ```rust
/// use warpmath_linalg::view::MatrixView;
///
/// // 2x2 block in the top-right corner of a 3x3 matrix
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
/// let full = MatrixView::from_row_major(&data, 3, 3).unwrap();
/// let block = full.submatrix(0, 1, 2, 2).unwrap();
///
/// assert_eq!(block.stride(), 3);
/// assert_eq!(block.row(1), &[5.0, 6.0]);
/// assert_eq!(block[(0, 1)], 3.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a> {
    data: &'a [f64],
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<'a> MatrixView<'a> {
    /// Creates a view of `rows x cols` elements with the given row stride.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::InvalidView`] when `stride < cols` or when the buffer is too short
    /// to hold `(rows - 1) * stride + cols` elements.
    pub fn new(
        data: &'a [f64],
        rows: usize,
        cols: usize,
        stride: usize,
    ) -> Result<Self, LinalgError> {
        check_layout(data.len(), rows, cols, stride)?;
        Ok(Self {
            data,
            rows,
            cols,
            stride,
        })
    }

    /// Creates a view of a contiguous row-major buffer, i.e. `stride == cols`.
    pub fn from_row_major(data: &'a [f64], rows: usize, cols: usize) -> Result<Self, LinalgError> {
        Self::new(data, rows, cols, cols)
    }

    /// Builds a view whose layout is known to be valid.
    pub(crate) fn from_parts(data: &'a [f64], rows: usize, cols: usize, stride: usize) -> Self {
        debug_assert!(check_layout(data.len(), rows, cols, stride).is_ok());
        Self {
            data,
            rows,
            cols,
            stride,
        }
    }

    /// Number of logical rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of logical columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Distance in elements between the starts of two consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns `true` when the view has as many rows as columns.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the element at `(row, col)`, or `None` if it is outside the view.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.stride + col])
        } else {
            None
        }
    }

    /// Returns the `cols` logical elements of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    #[inline]
    pub fn row(&self, row: usize) -> &'a [f64] {
        assert!(row < self.rows, "row {row} out of bounds for {} rows", self.rows);
        let start = row_start(row, self.cols, self.stride);
        &self.data[start..start + self.cols]
    }

    /// Returns a view of the `rows x cols` block starting at `(row0, col0)`.
    ///
    /// The block shares the stride of this view.
    pub fn submatrix(
        &self,
        row0: usize,
        col0: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixView<'a>, LinalgError> {
        let offset = submatrix_offset(
            (self.rows, self.cols),
            self.stride,
            (row0, col0),
            (rows, cols),
        )?;
        let data = match offset {
            Some(offset) => &self.data[offset..],
            None => &self.data[..0],
        };
        MatrixView::new(data, rows, cols, self.stride)
    }

    /// Copies the logical elements into a contiguous row-major vector.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.rows * self.cols);
        for r in 0..self.rows {
            out.extend_from_slice(self.row(r));
        }
        out
    }
}

impl Index<(usize, usize)> for MatrixView<'_> {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for a {}x{} view",
            self.rows,
            self.cols
        );
        &self.data[row * self.stride + col]
    }
}

/// A mutable, row-major view into a matrix stored in a borrowed buffer.
///
/// Same layout rules as [`MatrixView`]. Elements between the end of a logical row and the start
/// of the next one are never touched.
#[derive(Debug)]
pub struct MatrixViewMut<'a> {
    data: &'a mut [f64],
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<'a> MatrixViewMut<'a> {
    /// Creates a mutable view of `rows x cols` elements with the given row stride.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::InvalidView`] when `stride < cols` or when the buffer is too short
    /// to hold `(rows - 1) * stride + cols` elements.
    pub fn new(
        data: &'a mut [f64],
        rows: usize,
        cols: usize,
        stride: usize,
    ) -> Result<Self, LinalgError> {
        check_layout(data.len(), rows, cols, stride)?;
        Ok(Self {
            data,
            rows,
            cols,
            stride,
        })
    }

    /// Creates a mutable view of a contiguous row-major buffer, i.e. `stride == cols`.
    pub fn from_row_major(
        data: &'a mut [f64],
        rows: usize,
        cols: usize,
    ) -> Result<Self, LinalgError> {
        Self::new(data, rows, cols, cols)
    }

    /// Number of logical rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of logical columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Distance in elements between the starts of two consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns `true` when the view has as many rows as columns.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the element at `(row, col)`, or `None` if it is outside the view.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.as_view().get(row, col)
    }

    /// Writes `value` at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if the position is outside the view.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), LinalgError> {
        if row >= self.rows || col >= self.cols {
            return Err(LinalgError::dimension_mismatch(
                "position outside the view",
                &[self.rows, self.cols],
                &[row, col],
            ));
        }
        self.data[row * self.stride + col] = value;
        Ok(())
    }

    /// Returns a read-only view borrowing from this one.
    #[inline]
    pub fn as_view(&self) -> MatrixView<'_> {
        MatrixView::from_parts(&*self.data, self.rows, self.cols, self.stride)
    }

    /// Returns the `cols` logical elements of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "row {row} out of bounds for {} rows", self.rows);
        let start = row_start(row, self.cols, self.stride);
        &self.data[start..start + self.cols]
    }

    /// Returns the `cols` logical elements of row `row` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        assert!(row < self.rows, "row {row} out of bounds for {} rows", self.rows);
        let start = row_start(row, self.cols, self.stride);
        &mut self.data[start..start + self.cols]
    }

    /// Returns row `upper` read-only together with row `lower` mutably.
    ///
    /// # Panics
    ///
    /// Panics unless `upper < lower < self.rows()`.
    pub fn split_rows_mut(&mut self, upper: usize, lower: usize) -> (&[f64], &mut [f64]) {
        assert!(upper < lower && lower < self.rows);
        if self.cols == 0 {
            let (head, tail) = self.data.split_at_mut(0);
            return (&head[..0], &mut tail[..0]);
        }
        let (head, tail) = self.data.split_at_mut(lower * self.stride);
        let start = upper * self.stride;
        (&head[start..start + self.cols], &mut tail[..self.cols])
    }

    /// Exchanges the logical elements of rows `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either row is out of bounds.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        assert!(i < self.rows && j < self.rows);
        if i == j || self.cols == 0 {
            return;
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let (head, tail) = self.data.split_at_mut(hi * self.stride);
        let start = lo * self.stride;
        head[start..start + self.cols].swap_with_slice(&mut tail[..self.cols]);
    }

    /// Sets every logical element to `value`.
    pub fn fill(&mut self, value: f64) {
        for r in 0..self.rows {
            self.row_mut(r).fill(value);
        }
    }

    /// Returns a mutable view of the `rows x cols` block starting at `(row0, col0)`.
    pub fn submatrix_mut(
        &mut self,
        row0: usize,
        col0: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixViewMut<'_>, LinalgError> {
        let offset = submatrix_offset(
            (self.rows, self.cols),
            self.stride,
            (row0, col0),
            (rows, cols),
        )?;
        let stride = self.stride;
        let data = match offset {
            Some(offset) => &mut self.data[offset..],
            None => &mut self.data[..0],
        };
        MatrixViewMut::new(data, rows, cols, stride)
    }
}

impl Index<(usize, usize)> for MatrixViewMut<'_> {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for a {}x{} view",
            self.rows,
            self.cols
        );
        &self.data[row * self.stride + col]
    }
}

impl IndexMut<(usize, usize)> for MatrixViewMut<'_> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for a {}x{} view",
            self.rows,
            self.cols
        );
        &mut self.data[row * self.stride + col]
    }
}
