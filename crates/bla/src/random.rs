//! Random vector and matrix construction.
//!
//! This module provides constructors filling fresh containers with uniform
//! `[0, 1)` or standard normal values. Sizes follow [`Vector::new`] and
//! [`Matrix::new`], including their allocation errors.

use rand::Rng;
use rand::distr::StandardUniform;
use rand_distr::StandardNormal;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::operations::elementwise;
use crate::vector::Vector;

impl Vector {
    /// Create a vector with uniform random values in [0, 1).
    ///
    /// # Errors
    ///
    /// Returns `BlaError::Allocation` if `len` is negative or cannot be
    /// allocated.
    ///
    /// # Example
    ///
    /// ```
    /// use bla::Vector;
    ///
    /// let v = Vector::random(5).unwrap();
    /// assert_eq!(v.len(), 5);
    /// assert!(v.iter().all(|x| (0.0..1.0).contains(&x)));
    /// ```
    pub fn random(len: isize) -> Result<Self> {
        Self::random_with_rng(len, &mut rand::rng())
    }

    /// Create a vector with uniform random values using a specific RNG.
    ///
    /// # Example
    ///
    /// ```
    /// use bla::Vector;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let v1 = Vector::random_with_rng(4, &mut rng).unwrap();
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let v2 = Vector::random_with_rng(4, &mut rng).unwrap();
    ///
    /// assert_eq!(v1, v2);
    /// ```
    pub fn random_with_rng<R: Rng>(len: isize, rng: &mut R) -> Result<Self> {
        let v = Self::new(len)?;
        elementwise::fill_with(&v, || rng.sample(StandardUniform));
        Ok(v)
    }

    /// Create a vector with standard normal random values.
    pub fn randn(len: isize) -> Result<Self> {
        Self::randn_with_rng(len, &mut rand::rng())
    }

    /// Create a vector with standard normal random values using a specific RNG.
    pub fn randn_with_rng<R: Rng>(len: isize, rng: &mut R) -> Result<Self> {
        let v = Self::new(len)?;
        elementwise::fill_with(&v, || rng.sample(StandardNormal));
        Ok(v)
    }
}

impl Matrix {
    /// Create a row-major matrix with uniform random values in [0, 1).
    ///
    /// # Errors
    ///
    /// Returns `BlaError::Allocation` if a dimension is negative or the
    /// element count cannot be allocated.
    ///
    /// # Example
    ///
    /// ```
    /// use bla::Matrix;
    ///
    /// let m = Matrix::random(2, 3).unwrap();
    /// assert_eq!(m.shape(), (2, 3));
    /// ```
    pub fn random(rows: isize, cols: isize) -> Result<Self> {
        Self::random_with_rng(rows, cols, &mut rand::rng())
    }

    /// Create a row-major matrix with uniform random values using a specific RNG.
    pub fn random_with_rng<R: Rng>(rows: isize, cols: isize, rng: &mut R) -> Result<Self> {
        let m = Self::new(rows, cols)?;
        elementwise::fill_with(&m, || rng.sample(StandardUniform));
        Ok(m)
    }

    /// Create a row-major matrix with standard normal random values.
    pub fn randn(rows: isize, cols: isize) -> Result<Self> {
        Self::randn_with_rng(rows, cols, &mut rand::rng())
    }

    /// Create a row-major matrix with standard normal random values using a
    /// specific RNG.
    pub fn randn_with_rng<R: Rng>(rows: isize, cols: isize, rng: &mut R) -> Result<Self> {
        let m = Self::new(rows, cols)?;
        elementwise::fill_with(&m, || rng.sample(StandardNormal));
        Ok(m)
    }
}
