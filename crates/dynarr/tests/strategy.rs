//! Custom allocation strategies plugged in from outside the crate.

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use dynarr::prelude::*;

/// Heap strategy that refuses to hold more than `limit` bytes at once.
#[derive(Clone)]
struct BoundedHeap {
    limit: usize,
    in_use: Rc<Cell<usize>>,
}

impl BoundedHeap {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            in_use: Rc::new(Cell::new(0)),
        }
    }
}

// SAFETY: storage comes from `Global`.
unsafe impl AllocStrategy for BoundedHeap {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let in_use = self.in_use.get() + layout.size();
        if in_use > self.limit {
            return Err(AllocError::Exhausted {
                size: layout.size(),
                align: layout.align(),
            });
        }
        let ptr = Global.allocate(layout)?;
        self.in_use.set(in_use);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.in_use.set(self.in_use.get() - layout.size());
        // SAFETY: forwarded caller contract.
        unsafe { Global.deallocate(ptr, layout) }
    }
}

#[test]
fn growth_stops_at_the_strategy_limit() {
    // 8 + 16 u32 slots must coexist during the relocation: 96 bytes.
    let heap = BoundedHeap::new(95);
    let mut array = DynamicArray::new_in(heap.clone());
    for v in 0..8u32 {
        array.push(v).unwrap();
    }
    let err = array.push(8).unwrap_err();
    assert_eq!(err, AllocError::Exhausted { size: 64, align: 4 });
    assert_eq!(array.len(), 8);
    assert_eq!(array[7], 7);

    drop(array);
    assert_eq!(heap.in_use.get(), 0);
}

#[test]
fn limit_covers_relocation_peak() {
    let heap = BoundedHeap::new(96);
    let mut array = DynamicArray::new_in(heap.clone());
    for v in 0..16u32 {
        array.push(v).unwrap();
    }
    assert_eq!(heap.in_use.get(), 64);
}

#[test]
fn strategy_is_cloned_into_copies() {
    let heap = BoundedHeap::new(1024);
    let a = DynamicArray::from_slice_in(&[1u64, 2, 3], heap.clone()).unwrap();
    let b = a.try_clone().unwrap();
    assert_eq!(heap.in_use.get(), 48);
    drop(a);
    assert_eq!(heap.in_use.get(), 24);
    assert_eq!(b, [1, 2, 3]);
}

#[test]
fn error_message_is_human_readable() {
    let heap = BoundedHeap::new(0);
    let err = DynamicArray::<u16, _>::with_len_in(4, heap).unwrap_err();
    assert_eq!(
        err.to_string(),
        "allocation failed: 8 bytes with alignment 2"
    );
}

#[test]
fn growth_policy_is_configurable() {
    let policy = GrowthPolicy::new(1, 4).unwrap();
    let mut array = DynamicArray::with_policy_in(policy, Global);
    let mut seen = Vec::new();
    for v in 0..20 {
        array.push(v).unwrap();
        if seen.last() != Some(&array.capacity()) {
            seen.push(array.capacity());
        }
    }
    assert_eq!(seen, vec![1, 4, 16, 64]);
}
