//! Growable contiguous array with pluggable allocation strategies.
//!
//! [`DynamicArray`] owns a single heap block, tracks how many of its slots
//! hold live values, and grows by reallocating into a larger block when an
//! append finds it full.
//!
//! # Architecture
//!
//! ```text
//! DynamicArray<T, A>  (length, element lifecycle, growth decisions)
//! ├── RawBuffer<T, A> (block ownership: pointer + capacity + strategy)
//! │   └── A: AllocStrategy (allocate / deallocate / construct / destroy)
//! └── GrowthPolicy    (first capacity, growth factor)
//! ```
//!
//! # Value semantics
//!
//! - **Copy** ([`DynamicArray::try_clone`], [`DynamicArray::assign_from`]):
//!   duplicates the live elements into storage the copy owns alone.
//! - **Move** ([`DynamicArray::take`], [`DynamicArray::move_from`]):
//!   transfers the block; the source is left empty but usable.
//!
//! # Unsafe code
//!
//! Confined to `raw.rs` (block ownership) and `array.rs` (slot access).
//! Every `unsafe` block states the invariant it relies on.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::undocumented_unsafe_blocks)]

pub mod array;
pub mod config;
mod macros;
mod raw;

pub use array::DynamicArray;
pub use config::{GrowthPolicy, GrowthPolicyError};
pub use dynarr_alloc::{AllocError, AllocStrategy, Global};
