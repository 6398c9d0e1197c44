//! Element storage.
//!
//! Storage is always a flat, fixed-size block of `f64`; shape, strides and
//! offsets come from the `Vector` or `Matrix` wrapping a handle to it.

mod buffer;

pub use buffer::Buffer;
