//! Indexing protocol.
//!
//! An index argument is one of three shapes:
//!
//! ```text
//! Index::At(i)              x[i]        scalar (Vector) or row view (Matrix)
//! Index::Range(s)           x[a:b:c]    Vector view or Matrix view of rows
//! Index::Pair(a, b)         A[a, b]     scalar, row/column Vector view or block
//! ```
//!
//! Resolution happens entirely before any element is read or written, so an
//! out-of-range index or malformed slice never leaves a destination partially
//! assigned. A resolved [`Target`] is then either read into a [`Selection`]
//! or written from an [`Operand`].

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::{BlaError, Result};
use crate::matrix::Matrix;
use crate::slice::{SliceSpec, resolve_index};
use crate::storage::Buffer;
use crate::strides::Layout;
use crate::vector::Vector;

/// Index along a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisIndex {
    At(isize),
    Range(SliceSpec),
}

/// Full index argument for a Vector or Matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    At(isize),
    Range(SliceSpec),
    Pair(AxisIndex, AxisIndex),
}

/// Result of an indexed read.
///
/// Vector and Matrix variants are views sharing the source buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Scalar(f64),
    Vector(Vector),
    Matrix(Matrix),
}

/// Right-hand side of an indexed write.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(f64),
    Vector(Vector),
    Matrix(Matrix),
}

/// A fully resolved index: a buffer address or a view layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Element(usize),
    Vector(Layout),
    Matrix(Layout),
}

impl Selection {
    pub fn into_scalar(self) -> Option<f64> {
        match self {
            Selection::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_vector(self) -> Option<Vector> {
        match self {
            Selection::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_matrix(self) -> Option<Matrix> {
        match self {
            Selection::Matrix(m) => Some(m),
            _ => None,
        }
    }
}

impl Operand {
    fn shape(&self) -> Vec<usize> {
        match self {
            Operand::Scalar(_) => vec![],
            Operand::Vector(v) => vec![v.len()],
            Operand::Matrix(m) => vec![m.rows(), m.cols()],
        }
    }
}

/// Resolve an index against a vector layout.
pub(crate) fn resolve_vector(layout: &Layout, index: &Index) -> Result<Target> {
    let len = layout.dims[0];
    match index {
        Index::At(i) => {
            let i = resolve_index(*i, len)?;
            Ok(Target::Element(layout.address(i, 0)))
        }
        Index::Range(spec) => {
            let slice = spec.resolve(len)?;
            Ok(Target::Vector(layout.narrow(0, &slice)))
        }
        Index::Pair(..) => Err(BlaError::WrongNumberOfIndices {
            expected: 1,
            actual: 2,
        }),
    }
}

/// Resolve an index against a matrix layout.
///
/// A single index addresses rows; a pair addresses `(row, column)`.
pub(crate) fn resolve_matrix(layout: &Layout, index: &Index) -> Result<Target> {
    let [rows, cols] = layout.dims;
    match index {
        Index::At(r) => {
            let r = resolve_index(*r, rows)?;
            Ok(Target::Vector(layout.collapse(0, r)))
        }
        Index::Range(spec) => {
            let slice = spec.resolve(rows)?;
            Ok(Target::Matrix(layout.narrow(0, &slice)))
        }
        Index::Pair(AxisIndex::At(r), AxisIndex::At(c)) => {
            let r = resolve_index(*r, rows)?;
            let c = resolve_index(*c, cols)?;
            Ok(Target::Element(layout.address(r, c)))
        }
        Index::Pair(AxisIndex::At(r), AxisIndex::Range(cs)) => {
            let r = resolve_index(*r, rows)?;
            let cs = cs.resolve(cols)?;
            Ok(Target::Vector(layout.narrow(1, &cs).collapse(0, r)))
        }
        Index::Pair(AxisIndex::Range(rs), AxisIndex::At(c)) => {
            let rs = rs.resolve(rows)?;
            let c = resolve_index(*c, cols)?;
            Ok(Target::Vector(layout.narrow(0, &rs).collapse(1, c)))
        }
        Index::Pair(AxisIndex::Range(rs), AxisIndex::Range(cs)) => {
            let rs = rs.resolve(rows)?;
            let cs = cs.resolve(cols)?;
            Ok(Target::Matrix(layout.narrow(0, &rs).narrow(1, &cs)))
        }
    }
}

/// Read a resolved target. Views share `buffer`; nothing is copied.
pub(crate) fn select(buffer: &Buffer, target: Target) -> Selection {
    match target {
        Target::Element(addr) => Selection::Scalar(buffer.get(addr)),
        Target::Vector(layout) => Selection::Vector(Vector::from_layout(buffer.clone(), layout)),
        Target::Matrix(layout) => Selection::Matrix(Matrix::from_layout(buffer.clone(), layout)),
    }
}

/// Write an operand into a resolved target.
///
/// A scalar broadcasts over any target; a Vector or Matrix is copied
/// elementwise into a target of the same kind and shape.
pub(crate) fn write(buffer: &Buffer, target: Target, rhs: &Operand) -> Result<()> {
    match (target, rhs) {
        (Target::Element(addr), Operand::Scalar(v)) => {
            buffer.set(addr, *v);
            Ok(())
        }
        (Target::Vector(layout), Operand::Scalar(v)) => {
            Vector::from_layout(buffer.clone(), layout).fill(*v);
            Ok(())
        }
        (Target::Matrix(layout), Operand::Scalar(v)) => {
            Matrix::from_layout(buffer.clone(), layout).fill(*v);
            Ok(())
        }
        (Target::Vector(layout), Operand::Vector(src)) => {
            Vector::from_layout(buffer.clone(), layout).copy_from(src)
        }
        (Target::Matrix(layout), Operand::Matrix(src)) => {
            Matrix::from_layout(buffer.clone(), layout).copy_from(src)
        }
        (target, rhs) => Err(BlaError::ShapeMismatch {
            expected: target_shape(&target),
            actual: rhs.shape(),
        }),
    }
}

fn target_shape(target: &Target) -> Vec<usize> {
    match target {
        Target::Element(_) => vec![],
        Target::Vector(layout) => vec![layout.dims[0]],
        Target::Matrix(layout) => layout.dims.to_vec(),
    }
}

impl From<isize> for AxisIndex {
    fn from(i: isize) -> Self {
        AxisIndex::At(i)
    }
}

impl From<i32> for AxisIndex {
    fn from(i: i32) -> Self {
        AxisIndex::At(i as isize)
    }
}

impl From<SliceSpec> for AxisIndex {
    fn from(spec: SliceSpec) -> Self {
        AxisIndex::Range(spec)
    }
}

impl From<RangeFull> for AxisIndex {
    fn from(r: RangeFull) -> Self {
        AxisIndex::Range(r.into())
    }
}

impl From<Range<isize>> for AxisIndex {
    fn from(r: Range<isize>) -> Self {
        AxisIndex::Range(r.into())
    }
}

impl From<RangeFrom<isize>> for AxisIndex {
    fn from(r: RangeFrom<isize>) -> Self {
        AxisIndex::Range(r.into())
    }
}

impl From<RangeTo<isize>> for AxisIndex {
    fn from(r: RangeTo<isize>) -> Self {
        AxisIndex::Range(r.into())
    }
}

impl From<AxisIndex> for Index {
    fn from(axis: AxisIndex) -> Self {
        match axis {
            AxisIndex::At(i) => Index::At(i),
            AxisIndex::Range(spec) => Index::Range(spec),
        }
    }
}

macro_rules! index_from_axis {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Index {
                fn from(value: $t) -> Self {
                    AxisIndex::from(value).into()
                }
            }
        )*
    };
}

index_from_axis!(
    isize,
    i32,
    SliceSpec,
    RangeFull,
    Range<isize>,
    RangeFrom<isize>,
    RangeTo<isize>
);

impl<A, B> From<(A, B)> for Index
where
    A: Into<AxisIndex>,
    B: Into<AxisIndex>,
{
    fn from((a, b): (A, B)) -> Self {
        Index::Pair(a.into(), b.into())
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Operand::Scalar(v)
    }
}

impl From<Vector> for Operand {
    fn from(v: Vector) -> Self {
        Operand::Vector(v)
    }
}

impl From<&Vector> for Operand {
    fn from(v: &Vector) -> Self {
        Operand::Vector(v.clone())
    }
}

impl From<Matrix> for Operand {
    fn from(m: Matrix) -> Self {
        Operand::Matrix(m)
    }
}

impl From<&Matrix> for Operand {
    fn from(m: &Matrix) -> Self {
        Operand::Matrix(m.clone())
    }
}
