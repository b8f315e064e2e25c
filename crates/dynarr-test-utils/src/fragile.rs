//! Element type whose `Clone` and `Default` can be made to panic.

use std::cell::Cell;

thread_local! {
    static BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

/// Element whose `clone` and `default` panic once this thread's budget
/// runs out.
///
/// Every value alive on the current thread is counted, so after a panic
/// has unwound and all containers are gone, [`Fragile::live`] is zero
/// exactly when nothing leaked and nothing was dropped twice.
#[derive(Debug, PartialEq)]
pub struct Fragile {
    value: i32,
}

impl Fragile {
    /// A value that does not spend the budget.
    pub fn new(value: i32) -> Self {
        LIVE.with(|live| live.set(live.get() + 1));
        Self { value }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Allow `n` more clones or defaults on this thread; the next panics.
    pub fn arm(n: usize) {
        BUDGET.with(|budget| budget.set(Some(n)));
    }

    /// Remove the budget.
    pub fn disarm() {
        BUDGET.with(|budget| budget.set(None));
    }

    /// Values currently alive on this thread.
    pub fn live() -> isize {
        LIVE.with(Cell::get)
    }

    fn spend() {
        BUDGET.with(|budget| match budget.get() {
            None => {}
            Some(0) => panic!("Fragile: budget exhausted"),
            Some(n) => budget.set(Some(n - 1)),
        });
    }
}

impl Clone for Fragile {
    fn clone(&self) -> Self {
        Self::spend();
        Self::new(self.value)
    }
}

impl Default for Fragile {
    fn default() -> Self {
        Self::spend();
        Self::new(0)
    }
}

impl Drop for Fragile {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get() - 1));
    }
}
