//! Slice descriptors and their resolution against an axis.
//!
//! A [`SliceSpec`] is the `(start, stop, step)` triple of a Python-style slice
//! with every component optional. It carries no axis length; [`SliceSpec::resolve`]
//! binds it to a concrete length and yields a [`ResolvedSlice`] that is used
//! once to derive a view layout.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::{BlaError, Result};

/// Unresolved `(start, stop, step)` slice descriptor.
///
/// `SliceSpec::default()` selects the whole axis, like `[:]`.
///
/// # Examples
///
/// ```
/// use bla::SliceSpec;
///
/// // x[0:10:2]
/// let s = SliceSpec::range(0, 10).with_step(2);
/// let r = s.resolve(10).unwrap();
/// assert_eq!((r.start, r.step, r.len), (0, 2, 5));
///
/// // x[::-1]
/// let r = SliceSpec::full().with_step(-1).resolve(4).unwrap();
/// assert_eq!((r.start, r.step, r.len), (3, -1, 4));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceSpec {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

/// A slice bound to an axis: first index, signed step and element count.
///
/// `start` is always a valid index when `len > 0`, and every index
/// `start + k * step` for `k < len` stays inside the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlice {
    pub start: usize,
    pub step: isize,
    pub len: usize,
}

impl SliceSpec {
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    /// `[:]`
    pub fn full() -> Self {
        Self::default()
    }

    /// `[start:stop]`
    pub fn range(start: isize, stop: isize) -> Self {
        Self::new(Some(start), Some(stop), None)
    }

    /// `[start:]`
    pub fn starting_at(start: isize) -> Self {
        Self::new(Some(start), None, None)
    }

    /// `[:stop]`
    pub fn ending_at(stop: isize) -> Self {
        Self::new(None, Some(stop), None)
    }

    /// Replace the step.
    pub fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// Bind the slice to an axis of length `len`.
    ///
    /// Missing `start` defaults to `0` (`len - 1` for a negative step), missing
    /// `stop` to `len` (one before `0` for a negative step) and missing `step`
    /// to `1`. Negative bounds count from the end once and are then clamped to
    /// the axis. An empty result is valid.
    ///
    /// # Errors
    ///
    /// Returns `BlaError::InvalidSlice` if the step is zero.
    pub fn resolve(&self, len: usize) -> Result<ResolvedSlice> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(BlaError::InvalidSlice {
                reason: "slice step cannot be zero",
            });
        }

        let axis = len as isize;
        let (lower, upper) = if step < 0 { (-1, axis - 1) } else { (0, axis) };
        let adjust = |bound: isize| {
            let bound = if bound < 0 { bound + axis } else { bound };
            bound.clamp(lower, upper)
        };

        let start = self
            .start
            .map(adjust)
            .unwrap_or(if step < 0 { upper } else { lower });
        let stop = self
            .stop
            .map(adjust)
            .unwrap_or(if step < 0 { lower } else { upper });

        let span = if step < 0 { start - stop } else { stop - start };
        let count = if span > 0 {
            (span as usize - 1) / step.unsigned_abs() + 1
        } else {
            0
        };

        Ok(ResolvedSlice {
            // An empty window never dereferences its start; pin it to 0 so
            // derived offsets stay inside the buffer.
            start: if count == 0 { 0 } else { start as usize },
            step,
            len: count,
        })
    }
}

impl From<RangeFull> for SliceSpec {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

impl From<Range<isize>> for SliceSpec {
    fn from(r: Range<isize>) -> Self {
        Self::range(r.start, r.end)
    }
}

impl From<RangeFrom<isize>> for SliceSpec {
    fn from(r: RangeFrom<isize>) -> Self {
        Self::starting_at(r.start)
    }
}

impl From<RangeTo<isize>> for SliceSpec {
    fn from(r: RangeTo<isize>) -> Self {
        Self::ending_at(r.end)
    }
}

/// Normalize a possibly negative scalar index against an axis.
///
/// # Errors
///
/// Returns `BlaError::IndexOutOfBounds` if the index is outside `[-len, len)`.
pub fn resolve_index(index: isize, len: usize) -> Result<usize> {
    let resolved = if index < 0 {
        index + len as isize
    } else {
        index
    };
    if resolved < 0 || resolved as usize >= len {
        return Err(BlaError::IndexOutOfBounds { index, len });
    }
    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(spec: SliceSpec, len: usize) -> (usize, isize, usize) {
        let r = spec.resolve(len).unwrap();
        (r.start, r.step, r.len)
    }

    #[test]
    fn test_full() {
        assert_eq!(resolved(SliceSpec::full(), 5), (0, 1, 5));
        assert_eq!(resolved((..).into(), 5), (0, 1, 5));
    }

    #[test]
    fn test_range_and_step() {
        assert_eq!(resolved(SliceSpec::range(3, 7), 10), (3, 1, 4));
        assert_eq!(resolved(SliceSpec::range(0, 10).with_step(2), 10), (0, 2, 5));
        assert_eq!(resolved(SliceSpec::range(1, 10).with_step(3), 10), (1, 3, 3));
        assert_eq!(resolved(SliceSpec::starting_at(0), 10), (0, 1, 10));
        assert_eq!(resolved(SliceSpec::ending_at(4), 10), (0, 1, 4));
    }

    #[test]
    fn test_negative_bounds() {
        // [-3:] on length 10
        assert_eq!(resolved(SliceSpec::starting_at(-3), 10), (7, 1, 3));
        // [:-1]
        assert_eq!(resolved(SliceSpec::ending_at(-1), 10), (0, 1, 9));
        // [-100:100] clamps to the axis
        assert_eq!(resolved(SliceSpec::range(-100, 100), 4), (0, 1, 4));
    }

    #[test]
    fn test_negative_step() {
        assert_eq!(resolved(SliceSpec::full().with_step(-1), 4), (3, -1, 4));
        assert_eq!(resolved(SliceSpec::full().with_step(-2), 5), (4, -2, 3));
        // [5:1:-2] -> 5, 3
        assert_eq!(resolved(SliceSpec::range(5, 1).with_step(-2), 10), (5, -2, 2));
        // [100::-1] clamps start to the last index
        assert_eq!(
            resolved(SliceSpec::new(Some(100), None, Some(-1)), 3),
            (2, -1, 3)
        );
    }

    #[test]
    fn test_empty_ranges() {
        assert_eq!(resolved(SliceSpec::range(7, 3), 10), (0, 1, 0));
        assert_eq!(resolved(SliceSpec::starting_at(10), 10), (0, 1, 0));
        assert_eq!(resolved(SliceSpec::range(2, 5).with_step(-1), 10), (0, -1, 0));
        assert_eq!(resolved(SliceSpec::full(), 0), (0, 1, 0));
        assert_eq!(resolved(SliceSpec::full().with_step(-1), 0), (0, -1, 0));
    }

    #[test]
    fn test_zero_step() {
        let err = SliceSpec::full().with_step(0).resolve(3).unwrap_err();
        assert!(matches!(err, BlaError::InvalidSlice { .. }));
    }

    #[test]
    fn test_length_formula() {
        for len in 0..8usize {
            for step in [-3isize, -2, -1, 1, 2, 3] {
                for start in -9isize..9 {
                    for stop in -9isize..9 {
                        let spec = SliceSpec::new(Some(start), Some(stop), Some(step));
                        let r = spec.resolve(len).unwrap();
                        let expected: Vec<isize> = python_indices(start, stop, step, len);
                        assert_eq!(r.len, expected.len(), "{spec:?} on {len}");
                        if let Some(&first) = expected.first() {
                            assert_eq!(r.start as isize, first);
                        }
                    }
                }
            }
        }
    }

    // Reference enumeration of the indices a Python slice visits.
    fn python_indices(start: isize, stop: isize, step: isize, len: usize) -> Vec<isize> {
        let n = len as isize;
        let fix = |b: isize, lo: isize, hi: isize| {
            let b = if b < 0 { b + n } else { b };
            b.max(lo).min(hi)
        };
        let mut out = Vec::new();
        if step > 0 {
            let mut i = fix(start, 0, n);
            let stop = fix(stop, 0, n);
            while i < stop {
                out.push(i);
                i += step;
            }
        } else {
            let mut i = fix(start, -1, n - 1);
            let stop = fix(stop, -1, n - 1);
            while i > stop {
                out.push(i);
                i += step;
            }
        }
        out
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index(0, 3).unwrap(), 0);
        assert_eq!(resolve_index(2, 3).unwrap(), 2);
        assert_eq!(resolve_index(-1, 3).unwrap(), 2);
        assert_eq!(resolve_index(-3, 3).unwrap(), 0);
        assert_eq!(
            resolve_index(3, 3).unwrap_err(),
            BlaError::IndexOutOfBounds { index: 3, len: 3 }
        );
        assert!(resolve_index(-4, 3).is_err());
        assert!(resolve_index(0, 0).is_err());
    }
}
