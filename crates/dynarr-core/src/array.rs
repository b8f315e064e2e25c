//! The growable array itself.

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use dynarr_alloc::{AllocError, AllocStrategy, Global};

use crate::config::GrowthPolicy;
use crate::raw::RawBuffer;

/// A contiguous, growable sequence of `T` whose storage comes from `A`.
///
/// The first [`len`](Self::len) slots of the block are live; the remaining
/// slots up to [`capacity`](Self::capacity) are allocated but empty. An
/// array with zero capacity holds no block at all.
///
/// Any call that may reallocate (`reserve`, `resize`, `push`,
/// `assign_from`) takes `&mut self`, so no element reference can outlive
/// the block it points into.
pub struct DynamicArray<T, A: AllocStrategy = Global> {
    buf: RawBuffer<T, A>,
    len: usize,
    policy: GrowthPolicy,
}

impl<T> DynamicArray<T> {
    /// An empty array on the global heap. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// An empty array with exactly `capacity` slots on the global heap.
    pub fn with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Self::with_capacity_in(capacity, Global)
    }

    /// An array of `len` default values on the global heap.
    pub fn with_len(len: usize) -> Result<Self, AllocError>
    where
        T: Default,
    {
        Self::with_len_in(len, Global)
    }

    /// An array holding clones of `values`, in order, on the global heap.
    pub fn from_slice(values: &[T]) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Self::from_slice_in(values, Global)
    }
}

impl<T, A: AllocStrategy> DynamicArray<T, A> {
    /// An empty array using `alloc`. Does not allocate.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            buf: RawBuffer::new_in(alloc),
            len: 0,
            policy: GrowthPolicy::DEFAULT,
        }
    }

    /// An empty array using `alloc` that grows according to `policy`.
    pub const fn with_policy_in(policy: GrowthPolicy, alloc: A) -> Self {
        Self {
            buf: RawBuffer::new_in(alloc),
            len: 0,
            policy,
        }
    }

    /// An empty array with exactly `capacity` slots.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, AllocError> {
        Self::with_capacity_and_policy_in(capacity, GrowthPolicy::DEFAULT, alloc)
    }

    /// An empty array with exactly `capacity` slots that grows according
    /// to `policy` once they are used up.
    pub fn with_capacity_and_policy_in(
        capacity: usize,
        policy: GrowthPolicy,
        alloc: A,
    ) -> Result<Self, AllocError> {
        Ok(Self {
            buf: RawBuffer::with_capacity_in(capacity, alloc)?,
            len: 0,
            policy,
        })
    }

    /// An array of `len` default values; length and capacity are both `len`.
    pub fn with_len_in(len: usize, alloc: A) -> Result<Self, AllocError>
    where
        T: Default,
    {
        let mut array = Self::with_capacity_in(len, alloc)?;
        for _ in 0..len {
            // SAFETY: capacity is exactly `len` and fewer than `len` slots
            // are live on every iteration.
            unsafe { array.construct_at_end(T::default()) };
        }
        Ok(array)
    }

    /// An array holding clones of `values`; length and capacity are both
    /// `values.len()`.
    pub fn from_slice_in(values: &[T], alloc: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut array = Self::with_capacity_in(values.len(), alloc)?;
        for value in values {
            // SAFETY: capacity is exactly `values.len()`.
            unsafe { array.construct_at_end(value.clone()) };
        }
        Ok(array)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots the current block can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The allocation strategy backing this array.
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// The growth policy applied by [`push`](Self::push).
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Reference to the element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            // SAFETY: bounds checked above.
            Some(unsafe { self.get_unchecked(index) })
        } else {
            None
        }
    }

    /// Mutable reference to the element at `index`, or `None` past the end.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            // SAFETY: bounds checked above.
            Some(unsafe { self.get_unchecked_mut(index) })
        } else {
            None
        }
    }

    /// Reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index < self.len()`. Anything else is undefined behaviour.
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        // SAFETY: caller guarantees `index < len <= capacity`, and slots
        // below `len` are live.
        unsafe { self.buf.slot(index).as_ref() }
    }

    /// Mutable reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index < self.len()`. Anything else is undefined behaviour.
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        // SAFETY: as in `get_unchecked`; `&mut self` makes the borrow unique.
        unsafe { self.buf.slot(index).as_mut() }
    }

    /// Ensure the block holds at least `new_capacity` slots.
    ///
    /// `new_capacity` is an absolute slot count. If it does not exceed the
    /// current capacity this is a no-op; otherwise a block of exactly
    /// `new_capacity` slots replaces the old one and every live element is
    /// relocated into it once. Length is unchanged. On error the array is
    /// left as it was.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        // SAFETY: the first `len <= capacity < new_capacity` slots are live.
        unsafe { self.buf.grow_exact(self.len, new_capacity) }
    }

    /// Set the length to `new_len`, filling new slots with clones of `fill`
    /// or destroying the elements past `new_len`.
    ///
    /// Capacity grows to at least `new_len` and never shrinks.
    pub fn resize(&mut self, new_len: usize, fill: T) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.reserve(new_len)?;
        if new_len > self.len {
            for _ in self.len + 1..new_len {
                // SAFETY: capacity is at least `new_len` and `len < new_len`.
                unsafe { self.construct_at_end(fill.clone()) };
            }
            // SAFETY: one slot below `new_len` remains.
            unsafe { self.construct_at_end(fill) };
        } else {
            self.truncate(new_len);
        }
        Ok(())
    }

    /// [`resize`](Self::resize) with `T::default()` as the fill value.
    pub fn resize_default(&mut self, new_len: usize) -> Result<(), AllocError>
    where
        T: Default,
    {
        self.reserve(new_len)?;
        while self.len < new_len {
            // SAFETY: capacity is at least `new_len`.
            unsafe { self.construct_at_end(T::default()) };
        }
        self.truncate(new_len);
        Ok(())
    }

    /// Append `value`, growing per the [`GrowthPolicy`] when full.
    ///
    /// An empty array first reserves the policy's initial capacity (8 by
    /// default); a full one multiplies its capacity by the growth factor
    /// (2 by default). On error `value` is dropped and the array is left
    /// as it was.
    pub fn push(&mut self, value: T) -> Result<(), AllocError> {
        if self.len == self.capacity() {
            let target = self.policy.next_capacity(self.capacity());
            if target <= self.capacity() {
                return Err(AllocError::CapacityOverflow { requested: target });
            }
            self.reserve(target)?;
        }
        // SAFETY: the check above leaves `len < capacity`.
        unsafe { self.construct_at_end(value) };
        Ok(())
    }

    /// Move the contents into a new array, leaving `self` empty.
    ///
    /// No element is copied: the returned array owns the original block,
    /// with the same length and capacity. `self` ends with zero length and
    /// capacity and can be reused.
    ///
    /// `self` keeps a clone of the strategy; see
    /// [`take_in`](Self::take_in) for strategies that are not `Clone`.
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let alloc = self.allocator().clone();
        self.take_in(alloc)
    }

    /// [`take`](Self::take) for any strategy: the returned array carries
    /// this array's strategy, and `self` continues with `replacement`.
    pub fn take_in(&mut self, replacement: A) -> Self {
        Self {
            buf: self.buf.take_in(replacement),
            len: mem::replace(&mut self.len, 0),
            policy: self.policy,
        }
    }

    /// Release this array's contents and adopt `other`'s block, length,
    /// capacity, strategy, and policy.
    ///
    /// `other` is left empty with zero capacity, holding this array's
    /// previous strategy and policy.
    pub fn move_from(&mut self, other: &mut Self) {
        self.truncate(0);
        self.buf.release();
        mem::swap(self, other);
    }

    /// A deep copy with capacity equal to `self.len()`, using a clone of
    /// this array's strategy.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
        A: Clone,
    {
        self.copy_into(self.allocator().clone())
    }

    /// Make `self` an element-wise copy of `other`.
    ///
    /// If `other` fits in the current capacity the copy happens in place:
    /// overlapping slots are clone-assigned, extra slots are constructed,
    /// surplus elements are destroyed, and no allocation occurs. Otherwise
    /// a block of exactly `other.len()` slots is built first and replaces
    /// the current one only once complete, so an allocation error leaves
    /// `self` untouched.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), AllocError>
    where
        T: Clone,
        A: Clone,
    {
        if other.len > self.capacity() {
            let mut fresh = other.copy_into(self.allocator().clone())?;
            fresh.policy = self.policy;
            *self = fresh;
            return Ok(());
        }

        let shared = self.len.min(other.len);
        for i in 0..shared {
            self[i].clone_from(&other[i]);
        }
        for i in shared..other.len {
            // SAFETY: `other.len <= capacity` and `len == i < other.len`.
            unsafe { self.construct_at_end(other[i].clone()) };
        }
        self.truncate(other.len);
        Ok(())
    }

    fn copy_into(&self, alloc: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut copy = Self::with_capacity_in(self.len, alloc)?;
        copy.policy = self.policy;
        for i in 0..self.len {
            // SAFETY: `copy` has exactly `self.len` slots.
            unsafe { copy.construct_at_end(self[i].clone()) };
        }
        Ok(copy)
    }

    /// Construct `value` in slot `len` and count it.
    ///
    /// # Safety
    ///
    /// `self.len < self.capacity()`.
    unsafe fn construct_at_end(&mut self, value: T) {
        // SAFETY: caller guarantees slot `len` exists and is not live.
        unsafe {
            let slot = self.buf.slot(self.len);
            self.buf.allocator().construct(slot, value);
        }
        self.len += 1;
    }

    /// Destroy the elements at and after `new_len`.
    fn truncate(&mut self, new_len: usize) {
        let old_len = self.len;
        if new_len >= old_len {
            return;
        }
        // Shorten first so a panicking destructor cannot cause a second drop.
        self.len = new_len;
        for i in new_len..old_len {
            // SAFETY: slots in `new_len..old_len` were live and are no longer
            // counted, so each is destroyed exactly once.
            unsafe {
                let slot = self.buf.slot(i);
                self.buf.allocator().destroy(slot);
            }
        }
    }
}

impl<T, A: AllocStrategy> Drop for DynamicArray<T, A> {
    fn drop(&mut self) {
        self.truncate(0);
        // `buf` releases the block when it drops.
    }
}

impl<T, A: AllocStrategy + Default> Default for DynamicArray<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Clone, A: AllocStrategy + Clone> Clone for DynamicArray<T, A> {
    /// Panics if the copy cannot be allocated; use
    /// [`try_clone`](DynamicArray::try_clone) to handle the error.
    fn clone(&self) -> Self {
        self.try_clone()
            .unwrap_or_else(|err| panic!("DynamicArray::clone: {err}"))
    }

    /// Panics if the copy cannot be allocated; use
    /// [`assign_from`](DynamicArray::assign_from) to handle the error.
    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source)
            .unwrap_or_else(|err| panic!("DynamicArray::clone_from: {err}"))
    }
}

impl<T, A: AllocStrategy> Index<usize> for DynamicArray<T, A> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "index out of bounds: the len is {} but the index is {index}",
                self.len
            ),
        }
    }
}

impl<T, A: AllocStrategy> IndexMut<usize> for DynamicArray<T, A> {
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {len} but the index is {index}"),
        }
    }
}

impl<T: fmt::Debug, A: AllocStrategy> fmt::Debug for DynamicArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.len).map(|i| &self[i]))
            .finish()
    }
}

impl<T, U, A, B> PartialEq<DynamicArray<U, B>> for DynamicArray<T, A>
where
    T: PartialEq<U>,
    A: AllocStrategy,
    B: AllocStrategy,
{
    fn eq(&self, other: &DynamicArray<U, B>) -> bool {
        self.len == other.len && (0..self.len).all(|i| self[i] == other[i])
    }
}

impl<T: Eq, A: AllocStrategy> Eq for DynamicArray<T, A> {}

impl<T, U, A, const N: usize> PartialEq<[U; N]> for DynamicArray<T, A>
where
    T: PartialEq<U>,
    A: AllocStrategy,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.len == N && (0..N).all(|i| self[i] == other[i])
    }
}
