//! Test utilities and fixture resources for Quarry development.
//!
//! Provides wrapper resources that observe or sabotage the allocation
//! interface ([`CountingResource`], [`FailingResource`]), helpers for
//! building self-checking arenas and asserting their ledger partition,
//! and small payload types for container tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{CountingResource, FailingResource, Person, Record};

use quarry_arena::{ArenaAllocator, ArenaConfig, Block};

/// An arena that re-checks its ledgers after every call, whatever the
/// build profile.
pub fn checked_arena(capacity: usize) -> ArenaAllocator {
    ArenaAllocator::with_config(ArenaConfig::new(capacity).verify_ledgers(true))
        .expect("test arena capacity must be non-zero")
}

/// Panic with the violation if `arena`'s ledgers do not partition it.
///
/// Also cross-checks the byte totals reported by
/// [`ArenaAllocator::stats`] against the block lists.
pub fn assert_partition(arena: &ArenaAllocator) {
    if let Err(err) = arena.check_ledgers() {
        panic!("partition violated: {err}");
    }
    let stats = arena.stats();
    let free: usize = arena.free_blocks().iter().map(|b| b.size).sum();
    let live: usize = arena.live_allocations().iter().map(|b| b.size).sum();
    assert_eq!(free, stats.free_bytes, "free byte total disagrees with stats");
    assert_eq!(live, stats.used_bytes, "live byte total disagrees with stats");
    assert_eq!(free + live, arena.capacity(), "ledgers do not cover the arena");
}

/// `(offset, size)` pairs for the free regions, in address order.
pub fn free_layout(arena: &ArenaAllocator) -> Vec<(usize, usize)> {
    layout(&arena.free_blocks())
}

/// `(offset, size)` pairs for the live allocations, in address order.
pub fn live_layout(arena: &ArenaAllocator) -> Vec<(usize, usize)> {
    layout(&arena.live_allocations())
}

fn layout(blocks: &[Block]) -> Vec<(usize, usize)> {
    blocks.iter().map(|b| (b.offset.get(), b.size)).collect()
}
