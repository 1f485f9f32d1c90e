//! The first-fit arena allocator.
//!
//! [`ArenaAllocator`] ties an [`Arena`] to its [`Ledgers`] and exposes the
//! pair through the [`MemoryResource`] interface. All bookkeeping lives in
//! the ledgers; the arena bytes are never used to store headers.

use std::cell::RefCell;
use std::fmt;

use quarry_core::{AllocError, MemoryResource, Offset};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::ledger::{Block, Ledgers};
use crate::stats::ArenaStats;
use crate::storage::Arena;

/// A fixed-capacity arena with first-fit allocation and free-block
/// coalescing.
///
/// - `allocate` scans free regions in address order and takes the first
///   one large enough, splitting off any excess.
/// - `deallocate` returns the region to the free ledger and merges it with
///   any adjacent free regions.
/// - Requests that no single free region can hold fail with
///   [`AllocError::OutOfMemory`], even when the total free space would be
///   enough.
///
/// The allocator owns its storage exclusively. Containers borrow it through
/// `&dyn MemoryResource`, so the borrow checker prevents any of them from
/// outliving it. Equality is identity: two allocators are equal only if
/// they are the same instance.
///
/// Not thread-safe. State sits in `RefCell`s, which makes the type `!Sync`.
pub struct ArenaAllocator {
    config: ArenaConfig,
    arena: Arena,
    ledgers: RefCell<Ledgers>,
}

impl ArenaAllocator {
    /// Create an allocator over a fresh arena of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::ZeroCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ArenaError> {
        Self::with_config(ArenaConfig::new(capacity))
    }

    /// Create an allocator from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        tracing::debug!(
            capacity = config.capacity,
            verify = config.verify_ledgers,
            "arena created"
        );
        Ok(Self {
            arena: Arena::new(config.capacity),
            ledgers: RefCell::new(Ledgers::new(config.capacity)),
            config,
        })
    }

    /// Arena size in bytes.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// The configuration this allocator was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Release the allocation at `offset`, reporting unknown offsets.
    ///
    /// The strict counterpart of [`MemoryResource::deallocate`]. Returns
    /// the size recorded for the region.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::InvalidDeallocation`] if `offset` is not the
    /// start of a live allocation. The ledgers are left unchanged.
    pub fn release(&self, offset: Offset) -> Result<usize, AllocError> {
        let mut ledgers = self.ledgers.borrow_mut();
        let size = ledgers
            .release(offset)
            .ok_or(AllocError::InvalidDeallocation { offset })?;
        let region = offset.get()..offset.get() + size;
        if self.config.scrub_on_release && !self.arena.scrub(region) {
            tracing::debug!(%offset, bytes = size, "arena bytes borrowed, region not scrubbed");
        }
        tracing::trace!(
            %offset,
            bytes = size,
            free_blocks = ledgers.free_count(),
            "deallocated"
        );
        self.verify(&ledgers, "deallocate");
        Ok(size)
    }

    /// Size recorded for the live allocation at `offset`.
    pub fn allocation_size(&self, offset: Offset) -> Option<usize> {
        self.ledgers.borrow().live_size(offset)
    }

    /// Snapshot of the free regions in address order.
    pub fn free_blocks(&self) -> Vec<Block> {
        self.ledgers.borrow().free_blocks().collect()
    }

    /// Snapshot of the live allocations in address order.
    pub fn live_allocations(&self) -> Vec<Block> {
        self.ledgers.borrow().live_blocks().collect()
    }

    /// Current usage figures.
    pub fn stats(&self) -> ArenaStats {
        let ledgers = self.ledgers.borrow();
        ArenaStats {
            capacity: ledgers.capacity(),
            used_bytes: ledgers.used_bytes(),
            free_bytes: ledgers.free_bytes(),
            largest_free: ledgers.largest_free(),
            free_blocks: ledgers.free_count(),
            live_allocations: ledgers.live_count(),
        }
    }

    /// Check that the ledgers still partition the arena.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Corrupted`] naming the first violation found.
    pub fn check_ledgers(&self) -> Result<(), ArenaError> {
        self.ledgers.borrow().verify().map_err(ArenaError::from)
    }

    /// Run `f` over the bytes of the live allocation at `offset`.
    ///
    /// Returns `None` if `offset` is not the start of a live allocation.
    /// `f` may allocate and release through the same allocator. A region
    /// released while its bytes are lent out is not scrubbed, even with
    /// [`ArenaConfig::scrub_on_release`] set.
    ///
    /// # Panics
    ///
    /// Panics if called from inside [`with_block_mut`](Self::with_block_mut)
    /// on the same allocator.
    pub fn with_block<R>(&self, offset: Offset, f: impl FnOnce(&[u8]) -> R) -> Option<R> {
        let size = self.allocation_size(offset)?;
        Some(self.arena.with_range(offset.get()..offset.get() + size, f))
    }

    /// Run `f` over the bytes of the live allocation at `offset`, mutably.
    ///
    /// Returns `None` if `offset` is not the start of a live allocation.
    /// Releases made from inside `f` skip scrubbing, as with
    /// [`with_block`](Self::with_block).
    ///
    /// # Panics
    ///
    /// Panics if called from inside another block borrow on the same
    /// allocator.
    pub fn with_block_mut<R>(&self, offset: Offset, f: impl FnOnce(&mut [u8]) -> R) -> Option<R> {
        let size = self.allocation_size(offset)?;
        Some(self.arena.with_range_mut(offset.get()..offset.get() + size, f))
    }

    fn verify(&self, ledgers: &Ledgers, op: &str) {
        if !self.config.verify_ledgers {
            return;
        }
        if let Err(violation) = ledgers.verify() {
            tracing::error!(%violation, op, "arena ledger self-check failed");
            panic!("arena ledgers corrupted after {op}: {violation}");
        }
    }
}

impl MemoryResource for ArenaAllocator {
    fn allocate(&self, bytes: usize) -> Result<Offset, AllocError> {
        // The ledgers reserve one byte for zero-byte requests.
        let request = bytes.max(1);
        let mut ledgers = self.ledgers.borrow_mut();
        let Some(offset) = ledgers.take_first_fit(request) else {
            let err = AllocError::OutOfMemory {
                requested: bytes,
                largest_free: ledgers.largest_free(),
                free_bytes: ledgers.free_bytes(),
            };
            tracing::debug!(%err, "allocation failed");
            return Err(err);
        };
        tracing::trace!(
            %offset,
            bytes = request,
            free_bytes = ledgers.free_bytes(),
            "allocated"
        );
        self.verify(&ledgers, "allocate");
        Ok(offset)
    }

    fn deallocate(&self, offset: Offset, bytes: usize) {
        match self.release(offset) {
            Ok(size) if size != bytes.max(1) => {
                tracing::debug!(%offset, recorded = size, hint = bytes, "size hint ignored");
            }
            Ok(_) => {}
            Err(err) => tracing::debug!(%err, "ignoring deallocation"),
        }
    }
}

impl PartialEq for ArenaAllocator {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for ArenaAllocator {}

impl fmt::Debug for ArenaAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaAllocator")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

impl Drop for ArenaAllocator {
    fn drop(&mut self) {
        let ledgers = self.ledgers.get_mut();
        for block in ledgers.live_blocks() {
            tracing::debug!(
                offset = %block.offset,
                bytes = block.size,
                "releasing live allocation with arena"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(capacity: usize) -> ArenaAllocator {
        let config = ArenaConfig::new(capacity).verify_ledgers(true);
        ArenaAllocator::with_config(config).unwrap()
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(matches!(ArenaAllocator::new(0), Err(ArenaError::ZeroCapacity)));
    }

    #[test]
    fn allocate_returns_ascending_offsets() {
        let a = arena(1024);
        assert_eq!(a.allocate(100).unwrap(), Offset(0));
        assert_eq!(a.allocate(50).unwrap(), Offset(100));
        assert_eq!(a.stats().used_bytes, 150);
    }

    #[test]
    fn allocate_more_than_capacity_fails() {
        let a = arena(100);
        assert_eq!(
            a.allocate(200),
            Err(AllocError::OutOfMemory {
                requested: 200,
                largest_free: 100,
                free_bytes: 100,
            })
        );
        assert_eq!(a.stats().live_allocations, 0);
    }

    #[test]
    fn zero_byte_allocation_takes_one_byte() {
        let a = arena(16);
        let x = a.allocate(0).unwrap();
        let y = a.allocate(0).unwrap();
        assert_ne!(x, y);
        assert_eq!(a.allocation_size(x), Some(1));
        a.deallocate(x, 0);
        a.deallocate(y, 0);
        assert_eq!(a.free_blocks().len(), 1);
    }

    #[test]
    fn deallocate_unknown_offset_is_noop() {
        let a = arena(64);
        let x = a.allocate(16).unwrap();
        let before = a.stats();
        a.deallocate(Offset(3), 16);
        a.deallocate(Offset(1000), 16);
        assert_eq!(a.stats(), before);
        assert_eq!(a.allocation_size(x), Some(16));
    }

    #[test]
    fn release_reports_unknown_offset() {
        let a = arena(64);
        assert_eq!(
            a.release(Offset(8)),
            Err(AllocError::InvalidDeallocation { offset: Offset(8) })
        );
        let x = a.allocate(8).unwrap();
        assert_eq!(a.release(x), Ok(8));
        assert!(a.release(x).is_err());
    }

    #[test]
    fn deallocate_trusts_ledger_not_hint() {
        let a = arena(64);
        let x = a.allocate(32).unwrap();
        a.deallocate(x, 4);
        assert_eq!(a.stats().free_bytes, 64);
        assert_eq!(a.free_blocks().len(), 1);
    }

    #[test]
    fn identity_equality() {
        let a = arena(1024);
        let b = arena(1024);
        assert_eq!(a, a);
        assert_ne!(a, b);
        assert!(a.is_equal(&a));
        assert!(!a.is_equal(&b));
    }

    #[test]
    fn block_bytes_round_trip() {
        let a = arena(64);
        let x = a.allocate(4).unwrap();
        a.with_block_mut(x, |b| b.copy_from_slice(b"abcd")).unwrap();
        assert_eq!(a.with_block(x, |b| b.to_vec()), Some(b"abcd".to_vec()));
        assert!(a.with_block(Offset(40), |_| ()).is_none());
    }

    #[test]
    fn scrub_on_release_zeroes_region() {
        let config = ArenaConfig::new(16).scrub_on_release(true);
        let a = ArenaAllocator::with_config(config).unwrap();
        let x = a.allocate(8).unwrap();
        a.with_block_mut(x, |b| b.fill(0xFF)).unwrap();
        a.deallocate(x, 8);
        let y = a.allocate(8).unwrap();
        assert_eq!(x, y);
        assert_eq!(a.with_block(y, |b| b.to_vec()), Some(vec![0; 8]));
    }

    #[test]
    fn release_inside_block_borrow_skips_scrub() {
        let config = ArenaConfig::new(16).scrub_on_release(true);
        let a = ArenaAllocator::with_config(config).unwrap();
        let x = a.allocate(4).unwrap();
        a.with_block_mut(x, |b| b.fill(9)).unwrap();

        a.with_block(x, |_| a.deallocate(x, 4)).unwrap();
        assert_eq!(a.allocation_size(x), None);
        assert_eq!(a.free_blocks().len(), 1);

        // The region was released but kept its old contents.
        let y = a.allocate(4).unwrap();
        assert_eq!(y, x);
        assert_eq!(a.with_block(y, |b| b.to_vec()), Some(vec![9; 4]));
    }

    #[test]
    fn released_bytes_survive_without_scrub() {
        let a = arena(16);
        let x = a.allocate(8).unwrap();
        a.with_block_mut(x, |b| b.fill(7)).unwrap();
        a.deallocate(x, 8);
        let y = a.allocate(8).unwrap();
        assert_eq!(a.with_block(y, |b| b[0]), Some(7));
    }

    #[test]
    fn check_ledgers_passes_on_healthy_arena() {
        let a = arena(256);
        let x = a.allocate(10).unwrap();
        let _y = a.allocate(20).unwrap();
        a.deallocate(x, 10);
        assert_eq!(a.check_ledgers(), Ok(()));
    }

    #[test]
    fn debug_output_includes_stats() {
        let a = arena(32);
        let s = format!("{a:?}");
        assert!(s.contains("ArenaAllocator"));
        assert!(s.contains("capacity: 32"));
    }
}
