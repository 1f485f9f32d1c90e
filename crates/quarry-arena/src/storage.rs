//! The arena's backing byte block.
//!
//! [`Arena`] owns one contiguous, zero-initialised `Box<[u8]>` for the
//! allocator's whole lifetime. It knows nothing about which bytes are
//! free: that is the ledgers' job. It only hands out byte ranges.

use std::cell::RefCell;
use std::ops::Range;

/// A fixed-capacity contiguous byte block.
///
/// Storage sits behind a `RefCell` so that the allocator can lend byte
/// ranges out through `&self`. Borrows are short-lived closures; nesting a
/// mutable borrow inside another borrow of the same arena panics.
pub struct Arena {
    bytes: RefCell<Box<[u8]>>,
    capacity: usize,
}

impl Arena {
    /// Reserve `capacity` zeroed bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: RefCell::new(vec![0u8; capacity].into_boxed_slice()),
            capacity,
        }
    }

    /// Total size in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Run `f` over the bytes in `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` extends past the end of the arena.
    pub fn with_range<R>(&self, range: Range<usize>, f: impl FnOnce(&[u8]) -> R) -> R {
        let bytes = self.bytes.borrow();
        f(&bytes[range])
    }

    /// Run `f` over the bytes in `range`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `range` extends past the end of the arena.
    pub fn with_range_mut<R>(&self, range: Range<usize>, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let mut bytes = self.bytes.borrow_mut();
        f(&mut bytes[range])
    }

    /// Zero the bytes in `range`.
    ///
    /// Returns `false`, leaving the bytes untouched, if they are currently
    /// lent out through [`with_range`](Self::with_range) or
    /// [`with_range_mut`](Self::with_range_mut).
    ///
    /// # Panics
    ///
    /// Panics if `range` extends past the end of the arena.
    pub fn scrub(&self, range: Range<usize>) -> bool {
        match self.bytes.try_borrow_mut() {
            Ok(mut bytes) => {
                bytes[range].fill(0);
                true
            }
            Err(_) => false,
        }
    }
}
