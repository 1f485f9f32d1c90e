//! Quarry: a fixed-capacity first-fit arena and containers built on it.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Quarry sub-crates. For most users, adding `quarry` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use quarry::prelude::*;
//!
//! let arena = ArenaAllocator::new(1024).unwrap();
//! let mut queue = Queue::with_resource(&arena);
//!
//! queue.push(1).unwrap();
//! queue.push(2).unwrap();
//! queue.push(3).unwrap();
//! assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//!
//! queue.pop();
//! assert_eq!(*queue.front(), 2);
//! assert_eq!(arena.stats().live_allocations, 2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `quarry-core` | `Offset`, `MemoryResource`, `AllocError`, `HeapResource` |
//! | [`arena`] | `quarry-arena` | `ArenaAllocator`, ledgers, config, stats |
//! | [`queue`] | `quarry-queue` | `Queue` and its iterator |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and the allocation interface (`quarry-core`).
///
/// Containers are written against [`types::MemoryResource`]; any
/// implementation of it can back them.
pub use quarry_core as types;

/// The first-fit arena allocator (`quarry-arena`).
///
/// [`arena::ArenaAllocator`] implements [`types::MemoryResource`] over a
/// fixed byte block, tracking regions in side ledgers.
pub use quarry_arena as arena;

/// FIFO queue over a memory resource (`quarry-queue`).
pub use quarry_queue as queue;

/// Common imports for typical Quarry usage.
///
/// ```rust
/// use quarry::prelude::*;
/// ```
pub mod prelude {
    // Core interface
    pub use quarry_core::{AllocError, HeapResource, MemoryResource, Offset};

    // Arena
    pub use quarry_arena::{ArenaAllocator, ArenaConfig, ArenaError, ArenaStats};

    // Containers
    pub use quarry_queue::Queue;
}
