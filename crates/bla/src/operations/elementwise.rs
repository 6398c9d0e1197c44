//! Element-wise kernels shared by vectors and matrices.
//!
//! Every kernel walks the logical index space of its operands in row-major
//! order and addresses each operand through its own [`Layout`]. Whether an
//! operand owns its buffer or is a view of someone else's is invisible here,
//! which is what lets rows, columns, strided slices and whole containers go
//! through one code path.
//!
//! Writes whose source shares storage with the destination, and whose address
//! ranges intersect, first snapshot the source so that no element is
//! overwritten before it has been read.

use crate::error::{BlaError, Result};
use crate::storage::Buffer;
use crate::strides::Layout;

/// A container addressable through a buffer and a layout.
pub trait Strided {
    /// Shared storage this container reads and writes.
    fn buffer(&self) -> &Buffer;

    /// Offset, dimensions and strides of the addressed window.
    fn layout(&self) -> Layout;

    /// Logical shape, used to match operands and report mismatches.
    fn shape(&self) -> Vec<usize>;
}

/// Check that two operands have identical logical shape.
///
/// # Errors
///
/// Returns `BlaError::ShapeMismatch` with `a`'s shape as the expected one.
pub fn check_same_shape<A, B>(a: &A, b: &B) -> Result<()>
where
    A: Strided + ?Sized,
    B: Strided + ?Sized,
{
    let (expected, actual) = (a.shape(), b.shape());
    if expected != actual {
        return Err(BlaError::ShapeMismatch { expected, actual });
    }
    Ok(())
}

/// Read every element in row-major logical order.
pub fn gather<S: Strided + ?Sized>(src: &S) -> Vec<f64> {
    let buffer = src.buffer();
    src.layout().addresses().map(|addr| buffer.get(addr)).collect()
}

/// Set every addressed element to `value`.
pub fn fill<D: Strided + ?Sized>(dst: &D, value: f64) {
    fill_with(dst, || value);
}

/// Set every addressed element, in row-major logical order, to the next
/// value produced by `f`.
pub fn fill_with<D, F>(dst: &D, mut f: F)
where
    D: Strided + ?Sized,
    F: FnMut() -> f64,
{
    let buffer = dst.buffer();
    for addr in dst.layout().addresses() {
        buffer.set(addr, f());
    }
}

/// Copy `src` into `dst` position by position.
///
/// # Errors
///
/// Returns `BlaError::ShapeMismatch` if the shapes differ; nothing is written.
pub fn assign<D, S>(dst: &D, src: &S) -> Result<()>
where
    D: Strided + ?Sized,
    S: Strided + ?Sized,
{
    check_same_shape(dst, src)?;
    let buffer = dst.buffer();
    let layout = dst.layout();

    if aliased(dst, src) {
        let values = gather(src);
        for (addr, value) in layout.addresses().zip(values) {
            buffer.set(addr, value);
        }
    } else {
        let src_buffer = src.buffer();
        let src_layout = src.layout();
        for (addr, src_addr) in layout.addresses().zip(src_layout.addresses()) {
            buffer.set(addr, src_buffer.get(src_addr));
        }
    }
    Ok(())
}

/// Apply `f` to every element, returning the results in row-major order.
pub fn map<S, F>(src: &S, f: F) -> Vec<f64>
where
    S: Strided + ?Sized,
    F: Fn(f64) -> f64,
{
    let buffer = src.buffer();
    src.layout()
        .addresses()
        .map(|addr| f(buffer.get(addr)))
        .collect()
}

/// Combine two same-shaped operands, returning the results in row-major order.
///
/// # Errors
///
/// Returns `BlaError::ShapeMismatch` if the shapes differ.
pub fn zip_map<A, B, F>(a: &A, b: &B, f: F) -> Result<Vec<f64>>
where
    A: Strided + ?Sized,
    B: Strided + ?Sized,
    F: Fn(f64, f64) -> f64,
{
    check_same_shape(a, b)?;
    let (buf_a, buf_b) = (a.buffer(), b.buffer());
    let (layout_a, layout_b) = (a.layout(), b.layout());
    Ok(layout_a
        .addresses()
        .zip(layout_b.addresses())
        .map(|(i, j)| f(buf_a.get(i), buf_b.get(j)))
        .collect())
}

/// In-place `dst += alpha * src`.
///
/// # Errors
///
/// Returns `BlaError::ShapeMismatch` if the shapes differ; nothing is written.
pub fn scaled_add<D, S>(dst: &D, alpha: f64, src: &S) -> Result<()>
where
    D: Strided + ?Sized,
    S: Strided + ?Sized,
{
    check_same_shape(dst, src)?;
    let buffer = dst.buffer();
    let layout = dst.layout();

    if aliased(dst, src) {
        let values = gather(src);
        for (addr, value) in layout.addresses().zip(values) {
            buffer.set(addr, buffer.get(addr) + alpha * value);
        }
    } else {
        let src_buffer = src.buffer();
        let src_layout = src.layout();
        for (addr, src_addr) in layout.addresses().zip(src_layout.addresses()) {
            buffer.set(addr, buffer.get(addr) + alpha * src_buffer.get(src_addr));
        }
    }
    Ok(())
}

/// Sum of elementwise products.
///
/// # Errors
///
/// Returns `BlaError::ShapeMismatch` if the shapes differ.
pub fn dot<A, B>(a: &A, b: &B) -> Result<f64>
where
    A: Strided + ?Sized,
    B: Strided + ?Sized,
{
    Ok(zip_map(a, b, |x, y| x * y)?.into_iter().sum())
}

fn aliased<D, S>(dst: &D, src: &S) -> bool
where
    D: Strided + ?Sized,
    S: Strided + ?Sized,
{
    let overlap =
        dst.buffer().shares_storage_with(src.buffer()) && dst.layout().overlaps(&src.layout());
    if overlap {
        tracing::trace!(
            dst = ?dst.layout(),
            src = ?src.layout(),
            "source overlaps destination, snapshotting"
        );
    }
    overlap
}
