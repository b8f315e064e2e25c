//! Build two arrays by appending, copy-assign one onto the other, and print
//! the result one element per line.
//!
//! ```sh
//! cargo run --example demo
//! RUST_LOG=dynarr_core=trace cargo run --example demo
//! ```

use dynarr::{AllocError, DynamicArray};
use tracing_subscriber::EnvFilter;

fn run() -> Result<(), AllocError> {
    let mut v1 = DynamicArray::new();
    for i in 1..11 {
        v1.push(i)?;
    }

    let mut v2 = DynamicArray::new();
    for i in 1..5 {
        v2.push(i)?;
    }

    v1.assign_from(&v2)?;
    for i in 0..v1.len() {
        println!("{}", v1[i]);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("demo: {err}");
        std::process::exit(1);
    }
}
