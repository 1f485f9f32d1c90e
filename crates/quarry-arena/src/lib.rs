//! Fixed-capacity first-fit arena allocation for Quarry containers.
//!
//! One contiguous byte block is reserved up front and carved into regions
//! on demand. Bookkeeping lives entirely in side ledgers, never inside the
//! block, and the allocator is exposed through
//! [`quarry_core::MemoryResource`] so containers stay independent of it.
//!
//! The arena hands out offsets, not typed storage. Containers in this
//! workspace keep their values on the heap and use the arena only to
//! account for node-sized regions; the block's bytes are reachable solely
//! through [`ArenaAllocator::with_block`] and
//! [`ArenaAllocator::with_block_mut`].
//!
//! # Architecture
//!
//! ```text
//! ArenaAllocator (MemoryResource)
//! ├── ArenaConfig (capacity, self-check, scrub)
//! ├── Arena (Box<[u8]>, fixed capacity)
//! └── Ledgers
//!     ├── free:  BTreeMap<offset, size>  first-fit scan, split on take
//!     └── live:  BTreeMap<offset, size>  sole source of region sizes
//! ```
//!
//! # Invariants
//!
//! Between calls the free and live ledgers partition `[0, capacity)`
//! exactly, and no two free regions are adjacent. Every release runs a
//! coalescing pass over the whole free ledger to restore the second
//! property.
//!
//! # Example
//!
//! ```rust
//! use quarry_arena::ArenaAllocator;
//! use quarry_core::{AllocError, MemoryResource};
//!
//! let arena = ArenaAllocator::new(300).unwrap();
//! let a = arena.allocate(100).unwrap();
//! let _b = arena.allocate(100).unwrap();
//! let c = arena.allocate(100).unwrap();
//! arena.deallocate(a, 100);
//! arena.deallocate(c, 100);
//!
//! // 200 bytes are free, but in two separate 100-byte regions.
//! assert!(matches!(
//!     arena.allocate(150),
//!     Err(AllocError::OutOfMemory { .. })
//! ));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod config;
pub mod error;
pub mod ledger;
pub mod stats;
pub mod storage;

// Public re-exports for the primary API surface.
pub use allocator::ArenaAllocator;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use ledger::{Block, Ledgers, PartitionViolation};
pub use stats::ArenaStats;
pub use storage::Arena;
