//! The [`AllocStrategy`] contract.

use std::alloc::Layout;
use std::ptr::{self, NonNull};

use crate::error::AllocError;

/// A capability that supplies raw storage and manages element lifetimes
/// inside it.
///
/// Containers route every heap interaction through their strategy:
///
/// - [`allocate`](AllocStrategy::allocate) / [`deallocate`](AllocStrategy::deallocate)
///   for raw blocks described by a [`Layout`];
/// - [`construct`](AllocStrategy::construct) / [`destroy`](AllocStrategy::destroy)
///   for placing a value into a slot and ending its life in place.
///
/// The element hooks have default bodies (write and `drop_in_place`).
/// Strategies that only care about raw storage implement the first two
/// methods and inherit the rest.
///
/// # Safety
///
/// Implementors must guarantee that a block returned by `allocate` is
/// valid for reads and writes of `layout.size()` bytes, is aligned to
/// `layout.align()`, and stays valid until it is passed to `deallocate`
/// with the same layout. Zero-sized layouts may return any non-null,
/// suitably aligned pointer; `deallocate` must then accept it back.
pub unsafe trait AllocStrategy {
    /// Obtain a block for `layout`.
    ///
    /// Returns [`AllocError::Exhausted`] if the block cannot be supplied.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Release a block previously obtained from [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must have come from `self.allocate(layout)` (or a clone of
    /// `self`) with exactly this `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Move `value` into the uninitialized slot at `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must be valid for writes and properly aligned. Any value
    /// previously in the slot is overwritten without being dropped.
    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        // SAFETY: caller guarantees `slot` is writable and aligned.
        unsafe { slot.as_ptr().write(value) }
    }

    /// Run the destructor of the live value at `slot`, leaving the slot
    /// uninitialized.
    ///
    /// # Safety
    ///
    /// `slot` must hold a live `T`, which must not be used or dropped again.
    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        // SAFETY: caller guarantees `slot` holds a live value.
        unsafe { ptr::drop_in_place(slot.as_ptr()) }
    }
}

/// Layout of a contiguous array of `n` values of `T`.
///
/// Returns [`AllocError::CapacityOverflow`] when the byte size would exceed
/// `isize::MAX`.
pub fn array_layout<T>(n: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(n).map_err(|_| AllocError::CapacityOverflow { requested: n })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_layout_matches_element_size() {
        let layout = array_layout::<u64>(10).unwrap();
        assert_eq!(layout.size(), 80);
        assert_eq!(layout.align(), std::mem::align_of::<u64>());
    }

    #[test]
    fn array_layout_rejects_overflow() {
        let result = array_layout::<u64>(usize::MAX);
        assert_eq!(
            result,
            Err(AllocError::CapacityOverflow {
                requested: usize::MAX
            })
        );
    }

    #[test]
    fn zero_length_layout_is_empty() {
        assert_eq!(array_layout::<u32>(0).unwrap().size(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn layout_size_is_count_times_element_size(n in 0usize..1_000_000) {
                let layout = array_layout::<u32>(n).unwrap();
                prop_assert_eq!(layout.size(), n * 4);
                prop_assert_eq!(layout.align(), 4);
            }
        }
    }
}
