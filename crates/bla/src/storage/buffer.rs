//! Reference-counted element buffer shared by owners and views.
//!
//! A `Buffer` is the only thing in the crate that allocates element storage.
//! Every `Vector` and `Matrix`, owning or viewing, holds one handle; cloning a
//! handle bumps the reference count and the storage is freed when the last
//! handle is dropped.
//!
//! Elements live in `Cell<f64>` so that several handles may read and write the
//! same region through shared references. The `Rc` makes the buffer `!Send`
//! and `!Sync`: concurrent mutation is rejected at compile time rather than
//! guarded by a lock.
//!
//! The `Rc` wraps the `Vec` itself, so the element block reserved by
//! [`Buffer::allocate`] is the storage; only the small counter box is
//! allocated on top of it.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::error::{BlaError, Result};

/// Contiguous, reference-counted block of `f64` elements.
///
/// The size is fixed at allocation; there is no resize operation.
#[derive(Clone)]
pub struct Buffer {
    data: Rc<Vec<Cell<f64>>>,
}

impl Buffer {
    /// Allocate a zero-initialized buffer of `len` elements.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::Allocation` if `len` is negative or the memory
    /// cannot be reserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use bla::storage::Buffer;
    ///
    /// let buf = Buffer::allocate(4).unwrap();
    /// assert_eq!(buf.len(), 4);
    /// assert!(Buffer::allocate(-1).is_err());
    /// ```
    pub fn allocate(len: isize) -> Result<Self> {
        let requested = len;
        let len = usize::try_from(len).map_err(|_| BlaError::Allocation { requested })?;

        let mut data: Vec<Cell<f64>> = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BlaError::Allocation { requested })?;
        data.resize(len, Cell::new(0.0));

        tracing::trace!(len, "allocated buffer");
        Ok(Self {
            data: Rc::new(data),
        })
    }

    /// Create a buffer taking its contents from a vector.
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self {
            data: Rc::new(data.into_iter().map(Cell::new).collect()),
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read the element at a raw buffer address.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is outside the buffer. Containers only produce
    /// addresses they have validated against their layout.
    #[inline]
    pub fn get(&self, addr: usize) -> f64 {
        self.data[addr].get()
    }

    /// Write the element at a raw buffer address.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is outside the buffer.
    #[inline]
    pub fn set(&self, addr: usize, value: f64) {
        self.data[addr].set(value);
    }

    /// Number of live handles (owners and views) on this storage.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.data)
    }

    /// Check if more than one handle references this storage.
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.ref_count() > 1
    }

    /// Check if two handles point to the same storage.
    #[inline]
    pub fn shares_storage_with(&self, other: &Buffer) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Copy the whole buffer out in address order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().map(Cell::get).collect()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len())
            .field("refs", &self.ref_count())
            .finish()
    }
}
