//! Ownership of the backing block.
//!
//! [`RawBuffer`] knows how many slots its block has but not which of them
//! hold live values; element lifetimes are tracked by the array on top.
//! Dropping a `RawBuffer` releases the block without touching its slots.

use std::alloc::Layout;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use dynarr_alloc::{array_layout, AllocError, AllocStrategy};

/// A block of `cap` uninitialized-or-live `T` slots owned through `A`.
///
/// `ptr` is `None` exactly when `cap == 0`.
pub(crate) struct RawBuffer<T, A: AllocStrategy> {
    ptr: Option<NonNull<T>>,
    cap: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: the block is uniquely owned, so sending the buffer sends the `T`s
// and the strategy with it.
unsafe impl<T: Send, A: AllocStrategy + Send> Send for RawBuffer<T, A> {}
// SAFETY: shared access only ever hands out `&T` and `&A`.
unsafe impl<T: Sync, A: AllocStrategy + Sync> Sync for RawBuffer<T, A> {}

impl<T, A: AllocStrategy> RawBuffer<T, A> {
    /// An empty buffer; no allocation.
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: None,
            cap: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// A buffer with exactly `capacity` slots. Zero does not allocate.
    pub(crate) fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, AllocError> {
        let mut buf = Self::new_in(alloc);
        if capacity > 0 {
            // SAFETY: an empty buffer has no live slots.
            unsafe { buf.grow_exact(0, capacity)? };
        }
        Ok(buf)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index < self.capacity()`.
    pub(crate) unsafe fn slot(&self, index: usize) -> NonNull<T> {
        debug_assert!(
            index < self.cap,
            "slot {index} out of capacity {}",
            self.cap
        );
        // SAFETY: `index < cap` implies `cap > 0`, so the block exists, and
        // the offset stays inside it.
        unsafe { self.ptr.unwrap_unchecked().add(index) }
    }

    /// Replace the block with one of exactly `new_cap` slots, relocating
    /// the first `len` values.
    ///
    /// Relocation is a bitwise move: the values now live in the new block
    /// and the old block is released without running any destructor. If
    /// the new block cannot be obtained nothing changes.
    ///
    /// # Safety
    ///
    /// `len <= self.capacity()`, the first `len` slots are live, and
    /// `new_cap >= len`.
    pub(crate) unsafe fn grow_exact(
        &mut self,
        len: usize,
        new_cap: usize,
    ) -> Result<(), AllocError> {
        debug_assert!(len <= self.cap && len <= new_cap);
        let new_layout = array_layout::<T>(new_cap)?;
        let new_ptr = self.alloc.allocate(new_layout)?.cast::<T>();

        tracing::trace!(
            old_capacity = self.cap,
            new_capacity = new_cap,
            len,
            bytes = new_layout.size(),
            "reallocating buffer"
        );

        if let Some(old) = self.ptr {
            // SAFETY: the old block holds `len` live values, the new block
            // has room for `new_cap >= len`, and the blocks are distinct.
            // The old block came from `self.alloc` with `self.layout()`.
            unsafe {
                ptr::copy_nonoverlapping(old.as_ptr(), new_ptr.as_ptr(), len);
                self.alloc.deallocate(old.cast(), self.layout());
            }
        }
        self.ptr = Some(new_ptr);
        self.cap = new_cap;
        Ok(())
    }

    /// Hand the block and strategy to a new owner, leaving `self` empty
    /// and holding `replacement`.
    pub(crate) fn take_in(&mut self, replacement: A) -> Self {
        Self {
            ptr: self.ptr.take(),
            cap: mem::replace(&mut self.cap, 0),
            alloc: mem::replace(&mut self.alloc, replacement),
            _marker: PhantomData,
        }
    }

    /// Return the block to the strategy, leaving zero capacity.
    ///
    /// No slot may be live.
    pub(crate) fn release(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: the block came from `self.alloc` with this layout, and
            // `ptr` is now `None` so it cannot be released twice.
            unsafe { self.alloc.deallocate(ptr.cast(), self.layout()) }
        }
        self.cap = 0;
    }

    fn layout(&self) -> Layout {
        // SAFETY: this exact layout was validated by `array_layout` when
        // the current block was allocated.
        unsafe {
            Layout::from_size_align_unchecked(mem::size_of::<T>() * self.cap, mem::align_of::<T>())
        }
    }
}

impl<T, A: AllocStrategy> Drop for RawBuffer<T, A> {
    fn drop(&mut self) {
        if let Some(ptr) = self.ptr {
            // SAFETY: the block came from `self.alloc` with `self.layout()`
            // and is not used after this point.
            unsafe { self.alloc.deallocate(ptr.cast(), self.layout()) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynarr_test_utils::TrackingAlloc;

    #[test]
    fn empty_buffer_does_not_allocate() {
        let alloc = TrackingAlloc::new();
        let buf = RawBuffer::<u32, _>::with_capacity_in(0, alloc.clone()).unwrap();
        assert_eq!(buf.capacity(), 0);
        drop(buf);
        assert_eq!(alloc.allocations(), 0);
        assert_eq!(alloc.deallocations(), 0);
    }

    #[test]
    fn drop_releases_block_with_matching_layout() {
        let alloc = TrackingAlloc::new();
        let buf = RawBuffer::<u64, _>::with_capacity_in(5, alloc.clone()).unwrap();
        assert_eq!(alloc.live_bytes(), 40);
        drop(buf);
        assert_eq!(alloc.live_blocks(), 0);
    }

    #[test]
    fn grow_relocates_live_prefix() {
        let alloc = TrackingAlloc::new();
        let mut buf = RawBuffer::<u32, _>::with_capacity_in(2, alloc.clone()).unwrap();
        // SAFETY: slots 0 and 1 are within capacity 2; after growth the
        // first two slots are live in the new block.
        unsafe {
            buf.slot(0).write(10);
            buf.slot(1).write(20);
            buf.grow_exact(2, 6).unwrap();
            assert_eq!(*buf.slot(0).as_ref(), 10);
            assert_eq!(*buf.slot(1).as_ref(), 20);
        }
        assert_eq!(buf.capacity(), 6);
        assert_eq!(alloc.allocations(), 2);
        assert_eq!(alloc.deallocations(), 1);
        assert_eq!(alloc.live_bytes(), 24);
    }

    #[test]
    fn failed_grow_keeps_old_block() {
        let alloc = TrackingAlloc::failing_after(1);
        let mut buf = RawBuffer::<u32, _>::with_capacity_in(2, alloc.clone()).unwrap();
        // SAFETY: no live slots.
        let result = unsafe { buf.grow_exact(0, 4) };
        assert!(matches!(result, Err(AllocError::Exhausted { .. })));
        assert_eq!(buf.capacity(), 2);
        assert_eq!(alloc.live_blocks(), 1);
    }

    #[test]
    fn take_transfers_block() {
        let alloc = TrackingAlloc::new();
        let mut buf = RawBuffer::<u8, _>::with_capacity_in(16, alloc.clone()).unwrap();
        let moved = buf.take_in(alloc.clone());
        assert_eq!(buf.capacity(), 0);
        assert_eq!(moved.capacity(), 16);
        drop(buf);
        assert_eq!(alloc.deallocations(), 0);
        drop(moved);
        assert_eq!(alloc.deallocations(), 1);
    }

    #[test]
    fn release_returns_block_once() {
        let alloc = TrackingAlloc::new();
        let mut buf = RawBuffer::<u16, _>::with_capacity_in(4, alloc.clone()).unwrap();
        buf.release();
        assert_eq!(buf.capacity(), 0);
        assert_eq!(alloc.deallocations(), 1);
        buf.release();
        drop(buf);
        assert_eq!(alloc.deallocations(), 1);
    }

    #[test]
    fn zero_sized_elements_track_capacity() {
        let mut buf = RawBuffer::<(), _>::with_capacity_in(3, dynarr_alloc::Global).unwrap();
        // SAFETY: no live slots.
        unsafe { buf.grow_exact(0, 100).unwrap() };
        assert_eq!(buf.capacity(), 100);
    }
}
