//! Pluggable allocation strategies for dynarr containers.
//!
//! A container never talks to the heap directly. Every raw allocation,
//! deallocation, and per-element construction or destruction goes through
//! an [`AllocStrategy`] value chosen when the container is built. The
//! default strategy is [`Global`], which forwards to the process allocator.
//!
//! Strategies are layout-based, so one strategy value serves any element
//! type. Construction and destruction are provided methods that a strategy
//! may override to observe element lifetimes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod global;
pub mod strategy;

pub use error::AllocError;
pub use global::Global;
pub use strategy::{array_layout, AllocStrategy};
