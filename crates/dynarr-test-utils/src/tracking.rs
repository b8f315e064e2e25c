//! Instrumented allocation strategy.

use std::alloc::Layout;
use std::collections::HashMap;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dynarr_alloc::{AllocError, AllocStrategy, Global};

#[derive(Debug)]
struct Stats {
    allocations: AtomicUsize,
    deallocations: AtomicUsize,
    failures: AtomicUsize,
    constructs: AtomicUsize,
    destroys: AtomicUsize,
    /// Remaining successful allocations before every request fails.
    budget: AtomicUsize,
    live: Mutex<HashMap<usize, Layout>>,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            allocations: AtomicUsize::new(0),
            deallocations: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
            constructs: AtomicUsize::new(0),
            destroys: AtomicUsize::new(0),
            budget: AtomicUsize::new(usize::MAX),
            live: Mutex::new(HashMap::new()),
        }
    }
}

/// [`Global`]-backed strategy that records what containers do with it.
///
/// Clones share the same counters, so a container and its copies can be
/// observed through any handle.
#[derive(Clone, Debug, Default)]
pub struct TrackingAlloc {
    stats: Arc<Stats>,
}

impl TrackingAlloc {
    pub fn new() -> Self {
        Self::default()
    }

    /// A strategy that serves `n` allocations and rejects every later one.
    pub fn failing_after(n: usize) -> Self {
        let alloc = Self::new();
        alloc.set_budget(n);
        alloc
    }

    /// Allow exactly `n` more allocations before failing.
    pub fn set_budget(&self, n: usize) {
        self.stats.budget.store(n, Ordering::SeqCst);
    }

    /// Stop failing allocations.
    pub fn clear_budget(&self) {
        self.set_budget(usize::MAX);
    }

    /// Successful allocations so far.
    pub fn allocations(&self) -> usize {
        self.stats.allocations.load(Ordering::SeqCst)
    }

    pub fn deallocations(&self) -> usize {
        self.stats.deallocations.load(Ordering::SeqCst)
    }

    /// Allocation requests rejected because the budget ran out.
    pub fn failures(&self) -> usize {
        self.stats.failures.load(Ordering::SeqCst)
    }

    pub fn constructs(&self) -> usize {
        self.stats.constructs.load(Ordering::SeqCst)
    }

    pub fn destroys(&self) -> usize {
        self.stats.destroys.load(Ordering::SeqCst)
    }

    /// Blocks handed out and not yet returned.
    pub fn live_blocks(&self) -> usize {
        self.live().len()
    }

    /// Bytes held by live blocks.
    pub fn live_bytes(&self) -> usize {
        self.live().values().map(Layout::size).sum()
    }

    fn live(&self) -> std::sync::MutexGuard<'_, HashMap<usize, Layout>> {
        // A panicking test may poison the map; the counts are still usable.
        self.stats
            .live
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn take_budget(&self) -> bool {
        self.stats
            .budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                usize::MAX => Some(usize::MAX),
                0 => None,
                n => Some(n - 1),
            })
            .is_ok()
    }
}

// SAFETY: storage comes from `Global`; this wrapper only records metadata.
unsafe impl AllocStrategy for TrackingAlloc {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if !self.take_budget() {
            self.stats.failures.fetch_add(1, Ordering::SeqCst);
            return Err(AllocError::Exhausted {
                size: layout.size(),
                align: layout.align(),
            });
        }
        let ptr = Global.allocate(layout)?;
        self.stats.allocations.fetch_add(1, Ordering::SeqCst);
        if layout.size() != 0 {
            self.live().insert(ptr.as_ptr() as usize, layout);
        }
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            let recorded = self.live().remove(&(ptr.as_ptr() as usize));
            assert_eq!(
                recorded,
                Some(layout),
                "block returned with a layout it was not allocated with"
            );
        }
        self.stats.deallocations.fetch_add(1, Ordering::SeqCst);
        // SAFETY: forwarded caller contract; the block came from `Global`.
        unsafe { Global.deallocate(ptr, layout) }
    }

    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        self.stats.constructs.fetch_add(1, Ordering::SeqCst);
        // SAFETY: forwarded caller contract.
        unsafe { Global.construct(slot, value) }
    }

    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        self.stats.destroys.fetch_add(1, Ordering::SeqCst);
        // SAFETY: forwarded caller contract.
        unsafe { Global.destroy(slot) }
    }
}
