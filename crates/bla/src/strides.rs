//! Stride and offset addressing.
//!
//! Uses row-major (C) order for owning matrices. Every container, owning or
//! viewing, is described by a [`Layout`]: a start offset into its buffer plus
//! a length and a signed stride per axis. Vectors use the first axis only and
//! carry a trailing axis of length 1.

use crate::slice::ResolvedSlice;

/// Offset, shape and strides of a 1-D or 2-D window onto a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub offset: usize,
    pub dims: [usize; 2],
    pub strides: [isize; 2],
}

/// Compute row-major strides for a `rows x cols` matrix.
///
/// # Examples
///
/// ```
/// use bla::strides::row_major_strides;
///
/// assert_eq!(row_major_strides(3, 4), [4, 1]);
/// assert_eq!(row_major_strides(2, 1), [1, 1]);
/// ```
pub fn row_major_strides(_rows: usize, cols: usize) -> [isize; 2] {
    [cols as isize, 1]
}

impl Layout {
    /// Layout of a freshly allocated row-major matrix.
    pub fn contiguous(rows: usize, cols: usize) -> Self {
        Self {
            offset: 0,
            dims: [rows, cols],
            strides: row_major_strides(rows, cols),
        }
    }

    /// Layout of a vector window.
    pub fn vector(len: usize, stride: isize, offset: usize) -> Self {
        Self {
            offset,
            dims: [len, 1],
            strides: [stride, 1],
        }
    }

    /// Number of addressed elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.dims[0] * self.dims[1]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Buffer address of logical position `(r, c)`.
    ///
    /// The caller must pass a position inside `dims`.
    #[inline]
    pub fn address(&self, r: usize, c: usize) -> usize {
        let addr =
            self.offset as isize + r as isize * self.strides[0] + c as isize * self.strides[1];
        debug_assert!(addr >= 0, "layout address underflow");
        addr as usize
    }

    /// Buffer addresses of every element in row-major logical order.
    pub fn addresses(&self) -> impl Iterator<Item = usize> + '_ {
        let [rows, cols] = self.dims;
        (0..rows).flat_map(move |r| (0..cols).map(move |c| self.address(r, c)))
    }

    /// Lowest and highest address touched, or `None` for an empty window.
    pub fn footprint(&self) -> Option<(usize, usize)> {
        if self.is_empty() {
            return None;
        }
        let mut lo = self.offset as isize;
        let mut hi = self.offset as isize;
        for (&dim, &stride) in self.dims.iter().zip(self.strides.iter()) {
            let reach = (dim as isize - 1) * stride;
            if reach < 0 {
                lo += reach;
            } else {
                hi += reach;
            }
        }
        Some((lo as usize, hi as usize))
    }

    /// Check if every addressed element lies in a buffer of `buffer_len`.
    pub fn fits(&self, buffer_len: usize) -> bool {
        match self.footprint() {
            None => true,
            Some((_, hi)) => hi < buffer_len,
        }
    }

    /// Check if the address ranges of two layouts intersect.
    ///
    /// This is a conservative test on the bounding interval; strided windows
    /// that interleave without touching the same element still report `true`.
    pub fn overlaps(&self, other: &Layout) -> bool {
        match (self.footprint(), other.footprint()) {
            (Some((lo_a, hi_a)), Some((lo_b, hi_b))) => lo_a <= hi_b && lo_b <= hi_a,
            _ => false,
        }
    }

    /// Restrict `axis` to a resolved slice, keeping the other axis.
    ///
    /// A slice of at most one element keeps the parent stride: the step is
    /// never applied and may be any non-zero value.
    pub fn narrow(&self, axis: usize, slice: &ResolvedSlice) -> Self {
        let mut out = *self;
        out.offset = self.shifted(axis, slice.start);
        out.dims[axis] = slice.len;
        if slice.len > 1 {
            // Two addressed elements `step` apart bound the product by the
            // buffer length; it only saturates for windows addressing nothing.
            out.strides[axis] = self.strides[axis].saturating_mul(slice.step);
        }
        out
    }

    /// Fix `axis` at position `index`, leaving a vector along the other axis.
    pub fn collapse(&self, axis: usize, index: usize) -> Self {
        let keep = 1 - axis;
        Self::vector(self.dims[keep], self.strides[keep], self.shifted(axis, index))
    }

    /// Swap the two axes.
    pub fn transposed(&self) -> Self {
        Self {
            offset: self.offset,
            dims: [self.dims[1], self.dims[0]],
            strides: [self.strides[1], self.strides[0]],
        }
    }

    fn shifted(&self, axis: usize, index: usize) -> usize {
        let addr = self.offset as isize + index as isize * self.strides[axis];
        debug_assert!(addr >= 0, "layout offset underflow");
        addr as usize
    }
}
