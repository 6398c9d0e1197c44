//! Conversion between `Matrix` and faer matrices.
//!
//! A `Matrix` may be an arbitrary strided view of a shared buffer, so both
//! directions copy. `to_faer_mat` reads through the view's strides and
//! `matrix_from_faer_mat` produces a fresh row-major `Matrix`.

use faer::{Mat, MatRef};

use crate::error::{BlaError, Result};
use crate::matrix::Matrix;
use crate::operations::Strided;

/// Create an owned faer `Mat` from a matrix or matrix view (copies data).
///
/// # Example
///
/// ```
/// use bla::Matrix;
/// use bla::backend::to_faer_mat;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let mat = to_faer_mat(&m.transpose());
/// assert_eq!((mat.nrows(), mat.ncols()), (3, 2));
/// assert_eq!(mat[(0, 1)], 4.0);
/// ```
pub fn to_faer_mat(m: &Matrix) -> Mat<f64> {
    let buffer = m.buffer();
    let layout = m.layout();
    Mat::from_fn(m.rows(), m.cols(), |i, j| buffer.get(layout.address(i, j)))
}

/// Create a row-major `Matrix` from a faer matrix (copies data).
///
/// # Example
///
/// ```
/// use faer::Mat;
/// use bla::backend::matrix_from_faer_mat;
///
/// let mat = Mat::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
/// let m = matrix_from_faer_mat(mat.as_ref());
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.to_vec(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn matrix_from_faer_mat(mat: MatRef<'_, f64>) -> Matrix {
    let rows = mat.nrows();
    let cols = mat.ncols();

    let mut data = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            data.push(mat[(i, j)]);
        }
    }

    Matrix::from_row_major(rows, cols, data)
}

/// Matrix product `a * b` computed by faer.
///
/// # Errors
///
/// Returns `BlaError::ShapeMismatch` if `a.cols() != b.rows()`.
pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.cols() != b.rows() {
        return Err(BlaError::ShapeMismatch {
            expected: vec![a.cols(), b.cols()],
            actual: vec![b.rows(), b.cols()],
        });
    }

    tracing::debug!(
        m = a.rows(),
        k = a.cols(),
        n = b.cols(),
        "matmul via faer"
    );

    let lhs = to_faer_mat(a);
    let rhs = to_faer_mat(b);
    let product = &lhs * &rhs;
    Ok(matrix_from_faer_mat(product.as_ref()))
}
