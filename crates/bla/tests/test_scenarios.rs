//! End-to-end usage scenarios.
//!
//! These tests replay the demo sessions through the public API, covering:
//! - Vector construction, element writes and slice broadcast
//! - Scalar-vector and vector-vector arithmetic (`x + 3*y`)
//! - Overlapping slice assignment in sequence
//! - Matrix block broadcast, element writes and `A + 2*B`

use bla::{Index, Matrix, Selection, SliceSpec, Vector};

/// x = [0, 1, 2], y[:] = 2, x + 3*y == [6, 7, 8]
#[test]
fn test_vector_sum_of_scaled() {
    let x = Vector::new(3).unwrap();
    let y = Vector::new(3).unwrap();

    for i in 0..x.len() as isize {
        x.set(i, i as f64).unwrap();
    }
    y.set_slice(SliceSpec::full(), 2.0).unwrap();

    assert_eq!(x.to_string(), "[0, 1, 2]");
    assert_eq!(y.to_string(), "[2, 2, 2]");

    let z = (&x + &(3.0 * &y)).unwrap();
    assert_eq!(z.to_vec(), vec![6.0, 7.0, 8.0]);
    assert_eq!(z.to_string(), "[6, 7, 8]");
}

/// Broadcasts over x[0:], x[3:7] and x[0:10:2], each applied after the last.
#[test]
fn test_vector_slice_broadcasts() {
    let x = Vector::new(10).unwrap();

    x.assign(SliceSpec::starting_at(0), 1.0).unwrap();
    assert_eq!(x.to_vec(), vec![1.0; 10]);

    x.assign(SliceSpec::range(3, 7), 2.0).unwrap();
    assert_eq!(
        x.to_vec(),
        vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0]
    );

    x.assign(SliceSpec::range(0, 10).with_step(2), 3.0).unwrap();
    assert_eq!(
        x.to_string(),
        "[3, 1, 3, 2, 3, 2, 3, 1, 3, 1]"
    );
}

/// A[:, :] = 1, B[:, :] = -2, B[0, 1] = 3, A + 2*B == [[-3, 7], [-3, -3]]
#[test]
fn test_matrix_sum_of_scaled() {
    let a = Matrix::new(2, 2).unwrap();
    a.assign((SliceSpec::range(0, 2), SliceSpec::range(0, 2)), 1.0)
        .unwrap();

    let b = Matrix::new(2, 2).unwrap();
    b.assign((.., ..), -2.0).unwrap();
    b.assign((0, 1), 3.0).unwrap();

    let c = (&a + &(2.0 * &b)).unwrap();
    assert_eq!(c.to_vec(), vec![-3.0, 7.0, -3.0, -3.0]);
    assert_eq!(c.to_string(), "[-3, 7]\n[-3, -3]");
}

/// Reading a slice twice without writes in between gives identical values.
#[test]
fn test_repeated_reads_are_stable() {
    let x = Vector::from_vec((0..8).map(f64::from).collect());
    let idx = Index::Range(SliceSpec::full().with_step(-3));
    let first = x.index(idx).unwrap();
    let second = x.index(idx).unwrap();
    assert_eq!(first, second);
    match first {
        Selection::Vector(v) => assert_eq!(v.to_vec(), vec![7.0, 4.0, 1.0]),
        other => panic!("expected a vector view, got {other:?}"),
    }
}

/// Slice lengths follow the normalized `(start, stop, step)` rules.
#[test]
fn test_slice_lengths() {
    let x = Vector::new(10).unwrap();
    let cases = [
        (SliceSpec::full(), 10),
        (SliceSpec::range(0, 10).with_step(2), 5),
        (SliceSpec::range(1, 10).with_step(2), 5),
        (SliceSpec::range(3, 7), 4),
        (SliceSpec::range(7, 3), 0),
        (SliceSpec::starting_at(-4), 4),
        (SliceSpec::full().with_step(-1), 10),
        (SliceSpec::range(8, 2).with_step(-3), 2),
    ];
    for (spec, len) in cases {
        assert_eq!(x.slice(spec).unwrap().len(), len, "{spec:?}");
    }
}

/// A matrix product checked against a hand-computed result.
#[test]
fn test_matrix_product() {
    let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
    let c = (&a * &b).unwrap();
    assert_eq!(c.to_vec(), vec![19.0, 22.0, 43.0, 50.0]);
}
