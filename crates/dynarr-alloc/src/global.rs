//! The process heap as an [`AllocStrategy`].

use std::alloc::{self, Layout};
use std::ptr::{self, NonNull};

use crate::error::AllocError;
use crate::strategy::AllocStrategy;

/// Strategy backed by the global Rust allocator.
///
/// Zero-sized requests never reach the allocator; they are served with a
/// dangling pointer aligned to the requested alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Global;

// SAFETY: non-zero requests are served by `std::alloc::alloc`, which upholds
// the block validity contract; zero-sized requests get an aligned non-null
// pointer that is never dereferenced for more than zero bytes.
unsafe impl AllocStrategy for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Ok(dangling(layout));
        }
        // SAFETY: `layout` has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr).ok_or(AllocError::Exhausted {
            size: layout.size(),
            align: layout.align(),
        })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            // SAFETY: caller guarantees `ptr` came from `allocate(layout)`,
            // which for non-zero sizes means `alloc::alloc(layout)`.
            unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
        }
    }
}

fn dangling(layout: Layout) -> NonNull<u8> {
    // SAFETY: alignments are always non-zero.
    unsafe { NonNull::new_unchecked(ptr::without_provenance_mut(layout.align())) }
}
