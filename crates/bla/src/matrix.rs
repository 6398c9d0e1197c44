//! Two-dimensional strided container.
//!
//! A `Matrix` is addressed as `offset + r * row_stride + c * col_stride` on a
//! shared [`Buffer`]. Owning matrices are row-major (`row_stride == cols`,
//! `col_stride == 1`, `offset == 0`). Blocks, rows, columns and transposes are
//! views on the same buffer carrying strides derived from the parent, so
//! writes through any of them land in the parent.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::backend;
use crate::error::{BlaError, Result};
use crate::index::{self, AxisIndex, Index, Operand, Selection};
use crate::operations::elementwise::{self, Strided};
use crate::slice::{SliceSpec, resolve_index};
use crate::storage::Buffer;
use crate::strides::Layout;
use crate::vector::Vector;

/// Dense `f64` matrix, owning or viewing a shared buffer.
#[derive(Debug, Clone)]
pub struct Matrix {
    buffer: Buffer,
    rows: usize,
    cols: usize,
    row_stride: isize,
    col_stride: isize,
    offset: usize,
    view: bool,
}

impl Matrix {
    /// Create a zero-initialized `rows x cols` matrix in row-major order.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::Allocation` if either dimension is negative or the
    /// element count cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bla::Matrix;
    ///
    /// let m = Matrix::new(2, 3).unwrap();
    /// assert_eq!(m.shape(), (2, 3));
    /// assert_eq!(m.row_stride(), 3);
    /// assert!(Matrix::new(2, -1).is_err());
    /// ```
    pub fn new(rows: isize, cols: isize) -> Result<Self> {
        for dim in [rows, cols] {
            if dim < 0 {
                return Err(BlaError::Allocation { requested: dim });
            }
        }
        let buffer = Buffer::allocate(rows.saturating_mul(cols))?;
        Ok(Self::owning(
            buffer,
            Layout::contiguous(rows as usize, cols as usize),
        ))
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::ShapeMismatch` if `data.len() != rows * cols`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bla::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.get(0, 1).unwrap(), 2.0);
    /// assert_eq!(m.get(1, 0).unwrap(), 3.0);
    /// ```
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(BlaError::ShapeMismatch {
                expected: vec![rows, cols],
                actual: vec![data.len()],
            });
        }
        Ok(Self::from_row_major(rows, cols, data))
    }

    /// Square `n x n` identity matrix.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::Allocation` under the same conditions as
    /// [`Matrix::new`].
    pub fn identity(n: isize) -> Result<Self> {
        let m = Self::new(n, n)?;
        let layout = m.layout();
        for i in 0..m.rows {
            m.buffer.set(layout.address(i, i), 1.0);
        }
        Ok(m)
    }

    /// Wrap row-major data whose length is already known to be `rows * cols`.
    pub(crate) fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        Self::owning(Buffer::from_vec(data), Layout::contiguous(rows, cols))
    }

    /// Take a freshly allocated buffer as the storage of a new owner.
    fn owning(buffer: Buffer, layout: Layout) -> Self {
        Self {
            view: false,
            ..Self::from_layout(buffer, layout)
        }
    }

    /// Wrap a view layout over an existing buffer.
    pub(crate) fn from_layout(buffer: Buffer, layout: Layout) -> Self {
        debug_assert!(layout.fits(buffer.len()), "matrix layout exceeds buffer");
        Self {
            buffer,
            rows: layout.dims[0],
            cols: layout.dims[1],
            row_stride: layout.strides[0],
            col_stride: layout.strides[1],
            offset: layout.offset,
            view: true,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn row_stride(&self) -> isize {
        self.row_stride
    }

    #[inline]
    pub fn col_stride(&self) -> isize {
        self.col_stride
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Read element `(r, c)`; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::IndexOutOfBounds` if either index is out of range.
    pub fn get(&self, r: isize, c: isize) -> Result<f64> {
        let addr = self.element_address(r, c)?;
        Ok(self.buffer.get(addr))
    }

    /// Write element `(r, c)`; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::IndexOutOfBounds` if either index is out of range.
    pub fn set(&self, r: isize, c: isize, value: f64) -> Result<()> {
        let addr = self.element_address(r, c)?;
        self.buffer.set(addr, value);
        Ok(())
    }

    /// View of the block selected by a row slice and a column slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use bla::{Matrix, SliceSpec};
    ///
    /// let m = Matrix::from_vec(3, 3, (0..9).map(f64::from).collect()).unwrap();
    /// let corner = m.block(SliceSpec::starting_at(1), SliceSpec::starting_at(1)).unwrap();
    /// assert_eq!(corner.to_vec(), vec![4.0, 5.0, 7.0, 8.0]);
    ///
    /// corner.fill(0.0);
    /// assert_eq!(m.get(2, 2).unwrap(), 0.0);
    /// ```
    pub fn block(
        &self,
        rows: impl Into<SliceSpec>,
        cols: impl Into<SliceSpec>,
    ) -> Result<Matrix> {
        let rows = rows.into().resolve(self.rows)?;
        let cols = cols.into().resolve(self.cols)?;
        Ok(Self::from_layout(
            self.buffer.clone(),
            self.layout().narrow(0, &rows).narrow(1, &cols),
        ))
    }

    /// Assign to a block: scalar broadcast or same-shape matrix copy.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::InvalidSlice` for a zero step and
    /// `BlaError::ShapeMismatch` if `rhs` does not fit the block.
    pub fn set_block(
        &self,
        rows: impl Into<SliceSpec>,
        cols: impl Into<SliceSpec>,
        rhs: impl Into<Operand>,
    ) -> Result<()> {
        let idx = Index::Pair(
            AxisIndex::Range(rows.into()),
            AxisIndex::Range(cols.into()),
        );
        self.assign(idx, rhs)
    }

    /// Row `r` as a vector view with stride `col_stride`.
    pub fn row(&self, r: isize) -> Result<Vector> {
        let r = resolve_index(r, self.rows)?;
        Ok(Vector::from_layout(
            self.buffer.clone(),
            self.layout().collapse(0, r),
        ))
    }

    /// Column `c` as a vector view with stride `row_stride`.
    pub fn col(&self, c: isize) -> Result<Vector> {
        let c = resolve_index(c, self.cols)?;
        Ok(Vector::from_layout(
            self.buffer.clone(),
            self.layout().collapse(1, c),
        ))
    }

    /// Transposed view; no data is moved.
    pub fn transpose(&self) -> Matrix {
        Self::from_layout(self.buffer.clone(), self.layout().transposed())
    }

    /// Indexed read.
    ///
    /// A pair of integers yields a scalar, one integer and one slice a row or
    /// column vector view, two slices a block view. A single index selects
    /// rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use bla::{Matrix, Selection};
    ///
    /// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.index((1, 0)).unwrap(), Selection::Scalar(3.0));
    ///
    /// let col = m.index((.., 1)).unwrap().into_vector().unwrap();
    /// assert_eq!(col.to_vec(), vec![2.0, 4.0]);
    /// ```
    pub fn index(&self, idx: impl Into<Index>) -> Result<Selection> {
        let target = index::resolve_matrix(&self.layout(), &idx.into())?;
        Ok(index::select(&self.buffer, target))
    }

    /// Indexed write with scalar broadcast or elementwise copy.
    pub fn assign(&self, idx: impl Into<Index>, rhs: impl Into<Operand>) -> Result<()> {
        let target = index::resolve_matrix(&self.layout(), &idx.into())?;
        index::write(&self.buffer, target, &rhs.into())
    }

    /// Set every element to `value`.
    pub fn fill(&self, value: f64) {
        elementwise::fill(self, value);
    }

    /// Copy `src` into this matrix elementwise.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::ShapeMismatch` if the shapes differ.
    pub fn copy_from(&self, src: &Matrix) -> Result<()> {
        elementwise::assign(self, src)
    }

    /// Elementwise sum into a new matrix.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::ShapeMismatch` if the shapes differ.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        let data = elementwise::zip_map(self, other, |a, b| a + b)?;
        Ok(Self::from_row_major(self.rows, self.cols, data))
    }

    /// Elementwise difference into a new matrix.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::ShapeMismatch` if the shapes differ.
    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        let data = elementwise::zip_map(self, other, |a, b| a - b)?;
        Ok(Self::from_row_major(self.rows, self.cols, data))
    }

    /// Multiply every element by `alpha` into a new matrix.
    pub fn scale(&self, alpha: f64) -> Matrix {
        let data = elementwise::map(self, |x| alpha * x);
        Self::from_row_major(self.rows, self.cols, data)
    }

    /// In-place `self += alpha * x`.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::ShapeMismatch` if the shapes differ.
    pub fn scaled_add(&self, alpha: f64, x: &Matrix) -> Result<()> {
        elementwise::scaled_add(self, alpha, x)
    }

    /// Matrix product into a new matrix.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::ShapeMismatch` if `self.cols() != other.rows()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bla::Matrix;
    ///
    /// let a = Matrix::from_vec(2, 2, vec![1.0, 1.0, 2.0, 2.0]).unwrap();
    /// let b = Matrix::from_vec(2, 2, vec![0.0, 2.0, 3.0, 4.0]).unwrap();
    /// let c = a.matmul(&b).unwrap();
    /// assert_eq!(c.to_vec(), vec![3.0, 6.0, 6.0, 12.0]);
    /// ```
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        backend::matmul(self, other)
    }

    /// Iterate over element values in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let layout = self.layout();
        (0..self.rows).flat_map(move |r| {
            (0..self.cols).map(move |c| self.buffer.get(layout.address(r, c)))
        })
    }

    /// Copy the elements out in row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        elementwise::gather(self)
    }

    /// Copy into a freshly allocated row-major matrix.
    pub fn to_owned(&self) -> Matrix {
        Self::from_row_major(self.rows, self.cols, self.to_vec())
    }

    /// Check if this matrix was obtained by indexing another one rather than
    /// by allocating its own storage.
    pub fn is_view(&self) -> bool {
        self.view
    }

    /// Check if other handles (owner or views) share this matrix's buffer.
    pub fn is_shared(&self) -> bool {
        self.buffer.is_shared()
    }

    /// Check if both matrices address the same buffer.
    pub fn shares_storage_with(&self, other: &Matrix) -> bool {
        self.buffer.shares_storage_with(&other.buffer)
    }

    fn element_address(&self, r: isize, c: isize) -> Result<usize> {
        let r = resolve_index(r, self.rows)?;
        let c = resolve_index(c, self.cols)?;
        Ok(self.layout().address(r, c))
    }
}

impl Strided for Matrix {
    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn layout(&self) -> Layout {
        Layout {
            offset: self.offset,
            dims: [self.rows, self.cols],
            strides: [self.row_stride, self.col_stride],
        }
    }

    fn shape(&self) -> Vec<usize> {
        vec![self.rows, self.cols]
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.iter().eq(other.iter())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = self.layout();
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for c in 0..self.cols {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.buffer.get(layout.address(r, c)))?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl Add for &Matrix {
    type Output = Result<Matrix>;

    fn add(self, rhs: Self) -> Result<Matrix> {
        Matrix::add(self, rhs)
    }
}

impl Sub for &Matrix {
    type Output = Result<Matrix>;

    fn sub(self, rhs: Self) -> Result<Matrix> {
        Matrix::sub(self, rhs)
    }
}

impl Mul for &Matrix {
    type Output = Result<Matrix>;

    fn mul(self, rhs: Self) -> Result<Matrix> {
        self.matmul(rhs)
    }
}

impl<'a> Mul<&'a Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &'a Matrix) -> Matrix {
        rhs.scale(self)
    }
}

impl Mul<Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        rhs.scale(self)
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Matrix {
        self.scale(rhs)
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Matrix {
        self.scale(rhs)
    }
}
