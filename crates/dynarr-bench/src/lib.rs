//! Benchmark fixtures for the dynarr container.
//!
//! - [`APPEND_SIZES`]: element counts used by the append benchmarks
//! - [`filled`]: an array of `0..n` built by repeated appends

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dynarr_core::DynamicArray;

/// Element counts for the append benchmarks: below, at, and well past the
/// first growth step.
pub const APPEND_SIZES: [usize; 4] = [8, 64, 1_000, 100_000];

/// Build an array holding `0..n` by appending one value at a time.
///
/// # Panics
///
/// Panics if the heap cannot satisfy the growth requests.
pub fn filled(n: usize) -> DynamicArray<u64> {
    let mut array = DynamicArray::new();
    for v in 0..n as u64 {
        if let Err(err) = array.push(v) {
            panic!("bench fixture of {n} elements: {err}");
        }
    }
    array
}
