//! Unbounded fallback resource.
//!
//! [`HeapResource`] plays the role of a process default: containers that are
//! not given an arena allocate from it. It hands out fresh offsets from a
//! monotonic cursor and never reuses them, so it has no free ledger and
//! `deallocate` has nothing to do.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::AllocError;
use crate::id::Offset;
use crate::resource::MemoryResource;

static GLOBAL: HeapResource = HeapResource::new();

/// A [`MemoryResource`] that never runs out short of offset-space overflow.
///
/// Offsets are unique for the lifetime of the resource. The cursor is
/// atomic, which makes the shared [`HeapResource::global`] instance usable
/// from a `static`.
#[derive(Debug)]
pub struct HeapResource {
    cursor: AtomicUsize,
}

impl HeapResource {
    /// Create a resource whose first offset is zero.
    pub const fn new() -> Self {
        Self {
            cursor: AtomicUsize::new(0),
        }
    }

    /// The process-wide instance.
    pub fn global() -> &'static HeapResource {
        &GLOBAL
    }

    /// Total bytes handed out so far.
    pub fn handed_out(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

impl Default for HeapResource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryResource for HeapResource {
    fn allocate(&self, bytes: usize) -> Result<Offset, AllocError> {
        // Zero-byte requests still get a unique offset.
        let request = bytes.max(1);
        self.cursor
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |c| {
                c.checked_add(request)
            })
            .map(Offset)
            .map_err(|c| AllocError::OutOfMemory {
                requested: bytes,
                largest_free: usize::MAX - c,
                free_bytes: usize::MAX - c,
            })
    }

    fn deallocate(&self, _offset: Offset, _bytes: usize) {}
}
