//! Tests for views sharing storage with their parent.
//!
//! These tests cover:
//! - Writes through strided, reversed and nested slices
//! - Row, column, block and transpose views of a matrix
//! - Self-assignment where source and destination overlap
//! - Independence of results and deep copies from their inputs

use approx::assert_relative_eq;
use bla::{BlaError, Matrix, SliceSpec, Vector};
use tracing_subscriber::fmt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a thread-local subscriber so snapshot events show up under
/// `cargo test -- --nocapture` with `RUST_LOG=trace`.
fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .finish()
        .set_default()
}

/// w = v[0:10:2]; w[0] = 9 is visible as v[0].
#[test]
fn test_strided_slice_writes_parent() {
    let v = Vector::new(10).unwrap();
    let w = v.slice(SliceSpec::range(0, 10).with_step(2)).unwrap();
    w.set(0, 9.0).unwrap();
    w.set(4, 7.0).unwrap();
    assert_eq!(v.get(0).unwrap(), 9.0);
    assert_eq!(v.get(8).unwrap(), 7.0);
    assert!(v.shares_storage_with(&w));
}

/// Views keep the buffer alive after the owner is dropped.
#[test]
fn test_view_outlives_owner() {
    let w = {
        let v = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        v.slice(SliceSpec::starting_at(1)).unwrap()
    };
    assert!(w.is_view());
    assert!(!w.is_shared());
    assert_eq!(w.to_vec(), vec![2.0, 3.0]);
}

/// Column views of a matrix write into the parent.
#[test]
fn test_column_view_writes_parent() {
    let m = Matrix::new(3, 2).unwrap();
    let col = m.col(1).unwrap();
    col.assign(SliceSpec::full(), &Vector::from_vec(vec![1.0, 2.0, 3.0]))
        .unwrap();
    assert_eq!(m.to_vec(), vec![0.0, 1.0, 0.0, 2.0, 0.0, 3.0]);
}

/// Reversed row of a transposed block still addresses the parent.
#[test]
fn test_nested_matrix_views() {
    let m = Matrix::from_vec(3, 3, (0..9).map(f64::from).collect()).unwrap();
    let block = m
        .block(SliceSpec::starting_at(1), SliceSpec::full())
        .unwrap()
        .transpose();
    let row = block
        .index((2, SliceSpec::full().with_step(-1)))
        .unwrap()
        .into_vector()
        .unwrap();
    assert_eq!(row.to_vec(), vec![8.0, 5.0]);
    row.set(0, -1.0).unwrap();
    assert_eq!(m.get(2, 2).unwrap(), -1.0);
}

/// x[1:] = x[:-1] shifts right without smearing the first element.
#[test]
fn test_overlapping_shift() {
    let _guard = init_test_subscriber();
    let x = Vector::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    let src = x.slice(SliceSpec::ending_at(-1)).unwrap();
    x.set_slice(SliceSpec::starting_at(1), &src).unwrap();
    assert_eq!(x.to_vec(), vec![1.0, 1.0, 2.0, 3.0, 4.0]);
}

/// x[:-1] = x[1:] shifts left.
#[test]
fn test_overlapping_shift_left() {
    let x = Vector::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    let src = x.slice(SliceSpec::starting_at(1)).unwrap();
    x.set_slice(SliceSpec::ending_at(-1), &src).unwrap();
    assert_eq!(x.to_vec(), vec![2.0, 3.0, 4.0, 5.0, 5.0]);
}

/// A = A^T through the indexing protocol.
#[test]
fn test_transpose_self_assignment() {
    let _guard = init_test_subscriber();
    let a = Matrix::from_vec(3, 3, (0..9).map(f64::from).collect()).unwrap();
    a.assign((.., ..), &a.transpose()).unwrap();
    assert_eq!(
        a.to_vec(),
        vec![0.0, 3.0, 6.0, 1.0, 4.0, 7.0, 2.0, 5.0, 8.0]
    );
}

/// x += 0.5 * x through a reversed view of itself.
#[test]
fn test_scaled_add_reversed_self() {
    let x = Vector::from_vec(vec![1.0, 2.0, 3.0]);
    let rev = x.slice(SliceSpec::full().with_step(-1)).unwrap();
    x.scaled_add(0.5, &rev).unwrap();
    let expected = [2.5, 3.0, 3.5];
    for (a, b) in x.iter().zip(expected) {
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }
}

/// Arithmetic results own fresh storage.
#[test]
fn test_results_are_detached() {
    let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let row = a.row(0).unwrap();
    let sum = (&row + &row).unwrap();
    sum.fill(0.0);
    assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);

    let copy = a.transpose().to_owned();
    copy.fill(0.0);
    assert_eq!(a.get(1, 0).unwrap(), 3.0);
}

/// A failed copy into a view leaves the parent untouched.
#[test]
fn test_failed_assignment_is_atomic() {
    let m = Matrix::from_vec(2, 3, vec![1.0; 6]).unwrap();
    let err = m
        .assign((0, ..), &Vector::from_vec(vec![5.0, 5.0]))
        .unwrap_err();
    assert_eq!(
        err,
        BlaError::ShapeMismatch {
            expected: vec![3],
            actual: vec![2],
        }
    );
    assert!(m.iter().all(|x| x == 1.0));

    let err = m.assign((0, 3), 5.0).unwrap_err();
    assert_eq!(err, BlaError::IndexOutOfBounds { index: 3, len: 3 });
    assert!(m.iter().all(|x| x == 1.0));
}
