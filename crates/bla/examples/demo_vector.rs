//! Vector construction, slice broadcast and arithmetic.
//!
//! Run with `RUST_LOG=trace cargo run --example demo_vector` to see the
//! library's allocation and aliasing events.

use bla::{BlaError, SliceSpec, Vector};
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

    let x = Vector::new(3)?;
    let y = Vector::new(3)?;

    for i in 0..x.len() as isize {
        x.set(i, i as f64)?;
    }
    y.set_slice(SliceSpec::full(), 2.0)?;

    println!("x = {x}");
    println!("y = {y}");
    println!("x+3*y = {}", (&x + &(3.0 * &y))?);

    let x = Vector::new(10)?;
    x.set_slice(SliceSpec::starting_at(0), 1.0)?;
    println!("{x}");

    x.set_slice(SliceSpec::range(3, 7), 2.0)?;
    println!("{x}");

    x.set_slice(SliceSpec::range(0, 10).with_step(2), 3.0)?;
    println!("{x}");

    // x[1:] = x[:-1]
    let head = x.slice(SliceSpec::ending_at(-1))?;
    x.set_slice(SliceSpec::starting_at(1), &head)?;
    println!("shifted: {x}");

    let reversed = x.slice(SliceSpec::full().with_step(-1))?;
    println!("reversed view: {reversed}, x . reversed = {}", x.dot(&reversed)?);

    Ok(())
}
