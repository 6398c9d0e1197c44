//! Dense linear algebra backends.
//!
//! Element-wise work is done by the strided kernels in
//! [`operations`](crate::operations). Anything beyond that, currently the
//! matrix product, is handed to faer through the copies in `faer_interop`.

mod faer_interop;

pub use faer_interop::{matmul, matrix_from_faer_mat, to_faer_mat};
