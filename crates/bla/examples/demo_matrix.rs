//! Matrix block broadcast, views and products.
//!
//! Run with `RUST_LOG=debug cargo run --example demo_matrix` to see the
//! matmul dispatch events.

use bla::{BlaError, Matrix, SliceSpec, Vector};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

fn init_subscriber() {
    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(true))
        .init();
}

fn main() -> Result<(), BlaError> {
    init_subscriber();

    let a = Matrix::new(2, 2)?;
    a.set_block(SliceSpec::range(0, 2), SliceSpec::range(0, 2), 1.0)?;

    let b = Matrix::new(2, 2)?;
    b.set_block(SliceSpec::range(0, 2), SliceSpec::range(0, 2), -2.0)?;
    b.set(0, 1, 3.0)?;

    println!("{}", (&a + &(2.0 * &b))?);

    let m = Matrix::from_vec(3, 3, (1..=9).map(f64::from).collect())?;
    m.col(0)?.assign(SliceSpec::full(), &Vector::from_vec(vec![0.0; 3]))?;
    println!("m =\n{m}");
    println!("m^T =\n{}", m.transpose());
    println!("m * m^T =\n{}", (&m * &m.transpose())?);

    let corner = m.block(SliceSpec::starting_at(1), SliceSpec::starting_at(1))?;
    println!("corner =\n{corner}");

    Ok(())
}
