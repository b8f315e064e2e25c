//! dynarr: a growable contiguous array with value semantics and pluggable
//! allocation.
//!
//! This is the facade crate that re-exports the public API of the dynarr
//! sub-crates. For most users, adding `dynarr` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use dynarr::prelude::*;
//!
//! let mut a = DynamicArray::new();
//! for i in 1..=10 {
//!     a.push(i).unwrap();
//! }
//! let mut b = DynamicArray::new();
//! for i in 1..=4 {
//!     b.push(i).unwrap();
//! }
//!
//! // Copy-assign: `b` fits in `a`'s block, so no allocation happens.
//! a.assign_from(&b).unwrap();
//! assert_eq!(a.len(), 4);
//! assert_eq!(a.capacity(), 16);
//! assert_eq!(a, [1, 2, 3, 4]);
//!
//! // Move: `b`'s block changes owner and `b` is left empty.
//! let c = b.take();
//! assert_eq!(b.capacity(), 0);
//! assert_eq!(c, [1, 2, 3, 4]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`array`] | `dynarr-core` | [`DynamicArray`], [`GrowthPolicy`], `dynarr!` |
//! | [`alloc`] | `dynarr-alloc` | [`AllocStrategy`], [`Global`], [`AllocError`] |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The container and its growth configuration (`dynarr-core`).
pub use dynarr_core as array;

/// Allocation strategies (`dynarr-alloc`).
///
/// Implement [`alloc::AllocStrategy`] to route a container's storage
/// through a custom allocator.
pub use dynarr_alloc as alloc;

pub use dynarr_alloc::{AllocError, AllocStrategy, Global};
pub use dynarr_core::{dynarr, DynamicArray, GrowthPolicy, GrowthPolicyError};

/// Common imports for typical dynarr usage.
///
/// ```rust
/// use dynarr::prelude::*;
/// ```
pub mod prelude {
    pub use dynarr_alloc::{AllocError, AllocStrategy, Global};
    pub use dynarr_core::{dynarr, DynamicArray, GrowthPolicy};
}
