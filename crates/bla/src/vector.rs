//! One-dimensional strided container.
//!
//! A `Vector` is a handle: a shared [`Buffer`] plus a length, a signed element
//! stride and a start offset. Constructors allocate a fresh buffer (stride 1,
//! offset 0); slicing returns another handle on the same buffer. Writes go
//! through the buffer, so they are visible through every handle addressing the
//! same elements, and all mutating methods therefore take `&self`.
//!
//! `Clone` copies the handle, not the data. Use [`Vector::to_owned`] for an
//! independent copy.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::error::Result;
use crate::index::{self, Index, Operand, Selection};
use crate::operations::elementwise::{self, Strided};
use crate::slice::{SliceSpec, resolve_index};
use crate::storage::Buffer;
use crate::strides::Layout;

/// Dense `f64` vector, owning or viewing a shared buffer.
#[derive(Debug, Clone)]
pub struct Vector {
    buffer: Buffer,
    len: usize,
    stride: isize,
    offset: usize,
    view: bool,
}

impl Vector {
    /// Create a zero-initialized vector of `len` elements.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::Allocation` if `len` is negative or cannot be
    /// allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bla::Vector;
    ///
    /// let v = Vector::new(3).unwrap();
    /// assert_eq!(v.len(), 3);
    /// assert_eq!(v.to_vec(), vec![0.0, 0.0, 0.0]);
    /// ```
    pub fn new(len: isize) -> Result<Self> {
        Ok(Self::owning(Buffer::allocate(len)?))
    }

    /// Create a vector taking ownership of `data`.
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self::owning(Buffer::from_vec(data))
    }

    fn owning(buffer: Buffer) -> Self {
        let len = buffer.len();
        Self {
            view: false,
            ..Self::from_layout(buffer, Layout::vector(len, 1, 0))
        }
    }

    /// Wrap a view layout over an existing buffer.
    pub(crate) fn from_layout(buffer: Buffer, layout: Layout) -> Self {
        debug_assert!(layout.fits(buffer.len()), "vector layout exceeds buffer");
        Self {
            buffer,
            len: layout.dims[0],
            stride: layout.strides[0],
            offset: layout.offset,
            view: true,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Distance in buffer elements between consecutive elements.
    #[inline]
    pub fn stride(&self) -> isize {
        self.stride
    }

    /// Buffer address of element 0.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Read element `i`; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::IndexOutOfBounds` if `i` is outside `[-len, len)`.
    pub fn get(&self, i: isize) -> Result<f64> {
        let i = resolve_index(i, self.len)?;
        Ok(self.buffer.get(self.address(i)))
    }

    /// Write element `i`; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::IndexOutOfBounds` if `i` is outside `[-len, len)`.
    pub fn set(&self, i: isize, value: f64) -> Result<()> {
        let i = resolve_index(i, self.len)?;
        self.buffer.set(self.address(i), value);
        Ok(())
    }

    /// View of the elements selected by `spec`. No data is copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use bla::{SliceSpec, Vector};
    ///
    /// let v = Vector::new(10).unwrap();
    /// let evens = v.slice(SliceSpec::range(0, 10).with_step(2)).unwrap();
    /// evens.set(0, 9.0).unwrap();
    /// assert_eq!(v.get(0).unwrap(), 9.0);
    /// assert_eq!(evens.len(), 5);
    /// ```
    pub fn slice(&self, spec: impl Into<SliceSpec>) -> Result<Vector> {
        let slice = spec.into().resolve(self.len)?;
        Ok(Self::from_layout(
            self.buffer.clone(),
            self.layout().narrow(0, &slice),
        ))
    }

    /// Assign to the elements selected by `spec`.
    ///
    /// A scalar is broadcast; a vector of the same length is copied elementwise.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::InvalidSlice` for a zero step and
    /// `BlaError::ShapeMismatch` if `rhs` does not fit the selection.
    pub fn set_slice(&self, spec: impl Into<SliceSpec>, rhs: impl Into<Operand>) -> Result<()> {
        self.assign(Index::Range(spec.into()), rhs)
    }

    /// Indexed read: a scalar for an integer, a view for a slice.
    pub fn index(&self, idx: impl Into<Index>) -> Result<Selection> {
        let target = index::resolve_vector(&self.layout(), &idx.into())?;
        Ok(index::select(&self.buffer, target))
    }

    /// Indexed write with scalar broadcast or elementwise copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use bla::{SliceSpec, Vector};
    ///
    /// let x = Vector::new(10).unwrap();
    /// x.assign(SliceSpec::starting_at(0), 1.0).unwrap();
    /// x.assign(SliceSpec::range(3, 7), 2.0).unwrap();
    /// x.assign(SliceSpec::range(0, 10).with_step(2), 3.0).unwrap();
    /// assert_eq!(
    ///     x.to_vec(),
    ///     vec![3.0, 1.0, 3.0, 2.0, 3.0, 2.0, 3.0, 1.0, 3.0, 1.0]
    /// );
    /// ```
    pub fn assign(&self, idx: impl Into<Index>, rhs: impl Into<Operand>) -> Result<()> {
        let target = index::resolve_vector(&self.layout(), &idx.into())?;
        index::write(&self.buffer, target, &rhs.into())
    }

    /// Set every element to `value`.
    pub fn fill(&self, value: f64) {
        elementwise::fill(self, value);
    }

    /// Copy `src` into this vector elementwise.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::ShapeMismatch` if the lengths differ.
    pub fn copy_from(&self, src: &Vector) -> Result<()> {
        elementwise::assign(self, src)
    }

    /// Elementwise sum into a new vector.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::ShapeMismatch` if the lengths differ.
    pub fn add(&self, other: &Vector) -> Result<Vector> {
        let data = elementwise::zip_map(self, other, |a, b| a + b)?;
        Ok(Self::from_vec(data))
    }

    /// Elementwise difference into a new vector.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::ShapeMismatch` if the lengths differ.
    pub fn sub(&self, other: &Vector) -> Result<Vector> {
        let data = elementwise::zip_map(self, other, |a, b| a - b)?;
        Ok(Self::from_vec(data))
    }

    /// Multiply every element by `alpha` into a new vector.
    pub fn scale(&self, alpha: f64) -> Vector {
        Self::from_vec(elementwise::map(self, |x| alpha * x))
    }

    /// In-place `self += alpha * x`.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::ShapeMismatch` if the lengths differ.
    pub fn scaled_add(&self, alpha: f64, x: &Vector) -> Result<()> {
        elementwise::scaled_add(self, alpha, x)
    }

    /// Inner product.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::ShapeMismatch` if the lengths differ.
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        elementwise::dot(self, other)
    }

    /// Iterate over element values in logical order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.buffer.get(self.address(i)))
    }

    /// Copy the elements out in logical order.
    pub fn to_vec(&self) -> Vec<f64> {
        elementwise::gather(self)
    }

    /// Copy into a freshly allocated, contiguous vector.
    pub fn to_owned(&self) -> Vector {
        Self::from_vec(self.to_vec())
    }

    /// Check if this vector was obtained by slicing or indexing rather than
    /// by allocating its own storage.
    pub fn is_view(&self) -> bool {
        self.view
    }

    /// Check if other handles (owner or views) share this vector's buffer.
    pub fn is_shared(&self) -> bool {
        self.buffer.is_shared()
    }

    /// Check if both vectors address the same buffer.
    pub fn shares_storage_with(&self, other: &Vector) -> bool {
        self.buffer.shares_storage_with(&other.buffer)
    }

    #[inline]
    fn address(&self, i: usize) -> usize {
        (self.offset as isize + i as isize * self.stride) as usize
    }
}

impl Strided for Vector {
    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn layout(&self) -> Layout {
        Layout::vector(self.len, self.stride, self.offset)
    }

    fn shape(&self) -> Vec<usize> {
        vec![self.len]
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}

impl Add for &Vector {
    type Output = Result<Vector>;

    fn add(self, rhs: Self) -> Result<Vector> {
        Vector::add(self, rhs)
    }
}

impl Sub for &Vector {
    type Output = Result<Vector>;

    fn sub(self, rhs: Self) -> Result<Vector> {
        Vector::sub(self, rhs)
    }
}

impl<'a> Mul<&'a Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: &'a Vector) -> Vector {
        rhs.scale(self)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        rhs.scale(self)
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Self::from_vec(data)
    }
}
