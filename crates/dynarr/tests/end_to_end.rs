//! End-to-end scenarios driven only through the public facade.

use std::ops::RangeInclusive;

use dynarr::prelude::*;
use dynarr_test_utils::{DropLog, TrackingAlloc};

fn appended<A: AllocStrategy>(alloc: A, values: RangeInclusive<i32>) -> DynamicArray<i32, A> {
    let mut array = DynamicArray::new_in(alloc);
    for v in values {
        array.push(v).unwrap();
    }
    array
}

// ── Demo scenario ───────────────────────────────────────────────

#[test]
fn copy_assign_shorter_onto_longer() {
    let mut a = appended(Global, 1..=10);
    let b = appended(Global, 1..=4);

    a.assign_from(&b).unwrap();

    assert_eq!(a.len(), 4);
    let read: Vec<i32> = (0..a.len()).map(|i| a[i]).collect();
    assert_eq!(read, vec![1, 2, 3, 4]);
    // Source untouched by the copy.
    assert_eq!(b, [1, 2, 3, 4]);
}

#[test]
fn demo_scenario_allocates_once_per_growth_step() {
    let alloc = TrackingAlloc::new();
    let mut a = appended(alloc.clone(), 1..=10);
    let b = appended(alloc.clone(), 1..=4);
    // a: 8 -> 16, b: 8.
    assert_eq!(alloc.allocations(), 3);

    a.assign_from(&b).unwrap();
    assert_eq!(alloc.allocations(), 3);

    drop(a);
    drop(b);
    assert_eq!(alloc.live_blocks(), 0);
    assert_eq!(alloc.constructs(), alloc.destroys());
}

// ── Value semantics ─────────────────────────────────────────────

#[test]
fn clone_then_mutate_both_sides() {
    let mut a = dynarr![String::from("left"), String::from("right")];
    let mut b = a.clone();
    a[0].push_str("-a");
    b[1].push_str("-b");
    assert_eq!(a[0], "left-a");
    assert_eq!(a[1], "right");
    assert_eq!(b[0], "left");
    assert_eq!(b[1], "right-b");
}

#[test]
fn move_chain_leaves_every_source_empty() {
    let mut a = appended(Global, 1..=20);
    let capacity = a.capacity();

    let mut b = a.take();
    let mut c = DynamicArray::new();
    c.move_from(&mut b);

    for empty in [&a, &b] {
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.capacity(), 0);
    }
    assert_eq!(c.len(), 20);
    assert_eq!(c.capacity(), capacity);
    assert_eq!(c[19], 20);
}

#[test]
fn every_element_is_dropped_exactly_once_across_copies_and_moves() {
    let log = DropLog::new();
    let alloc = TrackingAlloc::new();
    {
        let mut a = DynamicArray::new_in(alloc.clone());
        for v in 0..12 {
            a.push(log.item(v)).unwrap();
        }
        let mut b = a.try_clone().unwrap();
        b.resize(20, log.item(-1)).unwrap();
        let mut c = b.take();
        c.assign_from(&a).unwrap();
        a.move_from(&mut c);
        a.resize(3, log.item(0)).unwrap();
    }
    assert_eq!(alloc.live_blocks(), 0);
    assert_eq!(alloc.constructs(), alloc.destroys());
    // Every value ever created: 12 originals, 12 copies, 8 fill values,
    // 12 clone-assigned replacements, 1 unused fill.
    assert_eq!(log.drops(), 12 + 12 + 8 + 12 + 1);
}

// ── Sized construction ──────────────────────────────────────────

#[test]
fn sized_array_can_be_overwritten_and_extended() {
    let mut array: DynamicArray<u32> = DynamicArray::with_len(3).unwrap();
    for i in 0..3 {
        array[i] = (i as u32 + 1) * 10;
    }
    array.push(40).unwrap();
    assert_eq!(array, [10, 20, 30, 40]);
    assert_eq!(array.capacity(), 6);
}
