//! Integration tests: observable allocator properties.
//!
//! Each test drives an [`ArenaAllocator`] only through the public
//! `MemoryResource` interface and checks the ledger partition after every
//! call.

use quarry_arena::ArenaAllocator;
use quarry_core::{AllocError, MemoryResource, Offset};
use quarry_test_utils::{assert_partition, checked_arena, free_layout, live_layout};

fn alloc(arena: &ArenaAllocator, bytes: usize) -> Offset {
    let offset = arena.allocate(bytes).unwrap();
    assert_partition(arena);
    offset
}

fn dealloc(arena: &ArenaAllocator, offset: Offset, bytes: usize) {
    arena.deallocate(offset, bytes);
    assert_partition(arena);
}

// ── Fragmentation ──────────────────────────────────────────────────

#[test]
fn fragmented_free_space_does_not_satisfy_larger_request() {
    let arena = checked_arena(300);
    let a = alloc(&arena, 100);
    let b = alloc(&arena, 100);
    let c = alloc(&arena, 100);
    assert!(free_layout(&arena).is_empty(), "arena should be full");

    dealloc(&arena, a, 100);
    dealloc(&arena, c, 100);

    // B still separates the two free regions, so they stay unmerged.
    assert_eq!(free_layout(&arena), vec![(0, 100), (200, 100)]);
    assert_eq!(live_layout(&arena), vec![(b.get(), 100)]);
    assert_eq!(arena.stats().free_bytes, 200);

    let err = arena.allocate(150).unwrap_err();
    assert_eq!(
        err,
        AllocError::OutOfMemory {
            requested: 150,
            largest_free: 100,
            free_bytes: 200,
        }
    );
    assert_partition(&arena);

    // Requests that fit one region still succeed, lowest address first.
    assert_eq!(alloc(&arena, 100), Offset(0));
}

#[test]
fn failed_allocation_leaves_ledgers_untouched() {
    let arena = checked_arena(128);
    let _a = alloc(&arena, 100);
    let free_before = free_layout(&arena);
    let live_before = live_layout(&arena);
    assert!(arena.allocate(29).is_err());
    assert_eq!(free_layout(&arena), free_before);
    assert_eq!(live_layout(&arena), live_before);
}

// ── Reuse and coalescing ───────────────────────────────────────────

#[test]
fn freed_region_is_reused_first_fit() {
    let arena = checked_arena(1024);
    let first = alloc(&arena, 100);
    dealloc(&arena, first, 100);
    let second = alloc(&arena, 100);
    assert_eq!(first, second);
}

#[test]
fn freeing_everything_restores_single_block() {
    let arena = checked_arena(1024);
    let sizes = [10, 200, 33, 64, 1, 128, 77];
    let offsets: Vec<_> = sizes.iter().map(|&s| alloc(&arena, s)).collect();

    // Free in an interleaved order so merges happen on both sides.
    for i in [1, 5, 3, 0, 6, 2, 4] {
        dealloc(&arena, offsets[i], sizes[i]);
    }
    assert_eq!(free_layout(&arena), vec![(0, 1024)]);
    assert_eq!(arena.stats().live_allocations, 0);
}

#[test]
fn split_remainder_stays_free_at_advanced_offset() {
    let arena = checked_arena(256);
    let a = alloc(&arena, 64);
    let _b = alloc(&arena, 64);
    dealloc(&arena, a, 64);
    let c = alloc(&arena, 24);
    assert_eq!(c, Offset(0));
    assert_eq!(free_layout(&arena), vec![(24, 40), (128, 128)]);
}

#[test]
fn middle_release_merges_three_regions() {
    let arena = checked_arena(90);
    let a = alloc(&arena, 30);
    let b = alloc(&arena, 30);
    let c = alloc(&arena, 30);
    dealloc(&arena, a, 30);
    dealloc(&arena, c, 30);
    assert_eq!(arena.stats().free_blocks, 2);
    dealloc(&arena, b, 30);
    assert_eq!(free_layout(&arena), vec![(0, 90)]);
}

// ── Deallocation policy ────────────────────────────────────────────

#[test]
fn unknown_and_repeated_deallocations_are_ignored() {
    let arena = checked_arena(64);
    let a = alloc(&arena, 16);
    dealloc(&arena, Offset(1), 16);
    dealloc(&arena, a, 16);
    dealloc(&arena, a, 16);
    assert_eq!(free_layout(&arena), vec![(0, 64)]);
}

#[test]
fn interior_offset_is_not_a_valid_deallocation() {
    let arena = checked_arena(64);
    let a = alloc(&arena, 32);
    dealloc(&arena, Offset(a.get() + 8), 24);
    assert_eq!(arena.allocation_size(a), Some(32));
}

// ── Identity ───────────────────────────────────────────────────────

#[test]
fn allocators_compare_by_identity() {
    let one = checked_arena(1024);
    let two = checked_arena(1024);
    let r1: &dyn MemoryResource = &one;
    let r2: &dyn MemoryResource = &two;
    assert!(r1 == r1);
    assert!(r1 != r2);
    assert_eq!(one, one);
    assert_ne!(one, two);
}

// ── Churn ──────────────────────────────────────────────────────────

#[test]
fn long_churn_keeps_partition() {
    let arena = checked_arena(4096);
    let mut live: Vec<(Offset, usize)> = Vec::new();
    let mut seed = 0x5eed_u64;
    for _ in 0..2000 {
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let roll = (seed >> 33) as usize;
        if roll % 3 != 0 || live.is_empty() {
            let bytes = 1 + roll % 256;
            if let Ok(offset) = arena.allocate(bytes) {
                live.push((offset, bytes));
            }
        } else {
            let (offset, bytes) = live.swap_remove(roll % live.len());
            arena.deallocate(offset, bytes);
        }
        assert_partition(&arena);
    }
    for (offset, bytes) in live.drain(..) {
        dealloc(&arena, offset, bytes);
    }
    assert_eq!(free_layout(&arena), vec![(0, 4096)]);
}
