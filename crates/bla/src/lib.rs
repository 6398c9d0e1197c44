//! bla - strided dense vectors and matrices
//!
//! This crate provides `f64` vectors and row-major matrices whose slices,
//! rows, columns and transposes are zero-copy views sharing the parent's
//! storage.
//!
//! # Architecture
//!
//! ```text
//! Level 1: Typed containers (vector, matrix modules)
//!     → Vector, Matrix, indexing via Index / Selection / Operand
//!
//! Level 2: Strided kernels (operations module)
//!     → fill, assign, map, zip_map, scaled_add, dot
//!
//! Level 3: Addressing and storage (strides, storage modules)
//!     → Layout (offset + signed strides), Buffer (shared Rc storage)
//!
//! Backend: faer for the matrix product
//! ```
//!
//! # Example
//!
//! ```
//! use bla::{SliceSpec, Vector};
//!
//! let x = Vector::from_vec(vec![0.0, 1.0, 2.0]);
//! let y = Vector::new(3).unwrap();
//! y.set_slice(SliceSpec::full(), 2.0).unwrap();
//!
//! let z = (&x + &(3.0 * &y)).unwrap();
//! assert_eq!(z.to_vec(), vec![6.0, 7.0, 8.0]);
//!
//! // Slices are views: writing through one is visible in the parent.
//! let even = z.slice(SliceSpec::full().with_step(2)).unwrap();
//! even.fill(0.0);
//! assert_eq!(z.to_string(), "[0, 7, 0]");
//! ```

pub mod backend;
pub mod error;
pub mod index;
pub mod matrix;
pub mod operations;
pub mod random;
pub mod slice;
pub mod storage;
pub mod strides;
pub mod vector;

pub use error::{BlaError, Result};
pub use index::{AxisIndex, Index, Operand, Selection};
pub use matrix::Matrix;
pub use operations::Strided;
pub use slice::SliceSpec;
pub use storage::Buffer;
pub use vector::Vector;
