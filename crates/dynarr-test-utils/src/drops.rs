//! Drop-counting element type.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counter of [`DropCounter`] destructions.
#[derive(Clone, Debug, Default)]
pub struct DropLog {
    drops: Arc<AtomicUsize>,
}

impl DropLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element carrying `value` that reports its drop here.
    pub fn item(&self, value: i32) -> DropCounter {
        DropCounter {
            value,
            drops: Arc::clone(&self.drops),
        }
    }

    /// Number of elements dropped so far.
    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}

/// Element that increments its [`DropLog`] when dropped.
///
/// Clones report to the same log, so every clone counts as one more drop.
#[derive(Debug)]
pub struct DropCounter {
    pub value: i32,
    drops: Arc<AtomicUsize>,
}

impl Clone for DropCounter {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            drops: Arc::clone(&self.drops),
        }
    }
}

impl PartialEq for DropCounter {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}
