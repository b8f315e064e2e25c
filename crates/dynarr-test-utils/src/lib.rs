//! Test utilities and instrumented strategies for dynarr development.
//!
//! - [`TrackingAlloc`] wraps [`Global`](dynarr_alloc::Global), counts every
//!   allocation and element lifecycle event, checks that each block is
//!   returned with the layout it was handed out with, and can be told to
//!   start failing so error paths can be exercised.
//! - [`DropLog`] / [`DropCounter`] count element destructions.
//! - [`Fragile`] panics in `clone` or `default` on demand, for checking
//!   that a half-finished operation neither leaks nor double-drops.

#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod drops;
pub mod fragile;
pub mod tracking;

pub use drops::{DropCounter, DropLog};
pub use fragile::Fragile;
pub use tracking::TrackingAlloc;
