//! Vector and matrix operations.
//!
//! ```text
//! Level 1: typed entry points (Vector::add, Matrix::scale, operators)
//!     → allocate the owning result
//!     → call the strided kernel
//!
//! Level 2: strided kernels (elementwise)
//!     → walk layouts, read and write through the shared buffer
//! ```

pub mod elementwise;

pub use elementwise::{
    Strided, assign, check_same_shape, dot, fill, fill_with, gather, map, scaled_add, zip_map,
};
