//! Free and allocation ledgers.
//!
//! [`Ledgers`] is the allocator's entire bookkeeping. Nothing is stored in
//! the arena itself: two ordered maps from arena offset to region size
//! record which ranges are free and which are live. Between calls the two
//! maps together cover `[0, capacity)` exactly, with no gaps and no
//! overlaps, and no two free regions touch.
//!
//! ```text
//! offset  0        100       200       300
//!         ├────────┼─────────┼─────────┤
//! live    [  A   ]           [  C   ]
//! free             [   B    ]
//! ```

use std::collections::BTreeMap;
use std::fmt;

use quarry_core::Offset;

/// One region of the arena, free or live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Block {
    /// First byte of the region.
    pub offset: Offset,
    /// Length of the region in bytes.
    pub size: usize,
}

impl Block {
    /// One past the last byte of the region.
    pub fn end(&self) -> usize {
        self.offset.get() + self.size
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {:#x})", self.offset, self.end())
    }
}

/// A broken ledger invariant.
///
/// Reported by [`Ledgers::verify`]. Any of these means the allocator's
/// bookkeeping is wrong; callers cannot cause them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartitionViolation {
    /// Bytes in `[start, end)` belong to neither ledger.
    Gap {
        /// First uncovered byte.
        start: usize,
        /// One past the last uncovered byte.
        end: usize,
    },
    /// A region starting at `offset` overlaps the region before it.
    Overlap {
        /// Start of the overlapping region.
        offset: usize,
    },
    /// A ledger entry has size zero.
    EmptyBlock {
        /// Start of the empty entry.
        offset: usize,
    },
    /// Two free regions are adjacent and should have been merged.
    UncoalescedFree {
        /// Start of the lower region.
        first: usize,
        /// Start of the upper region.
        second: usize,
    },
    /// A region extends past the end of the arena.
    OutOfBounds {
        /// One past the last byte covered.
        end: usize,
        /// Arena capacity.
        capacity: usize,
    },
}

impl fmt::Display for PartitionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gap { start, end } => {
                write!(f, "bytes [{start:#x}, {end:#x}) are in neither ledger")
            }
            Self::Overlap { offset } => {
                write!(f, "region at {offset:#x} overlaps its predecessor")
            }
            Self::EmptyBlock { offset } => write!(f, "zero-sized region at {offset:#x}"),
            Self::UncoalescedFree { first, second } => {
                write!(f, "free regions at {first:#x} and {second:#x} are adjacent")
            }
            Self::OutOfBounds { end, capacity } => {
                write!(f, "regions end at {end:#x}, past capacity {capacity:#x}")
            }
        }
    }
}

/// The pair of ledgers describing one arena.
#[derive(Clone, Debug)]
pub struct Ledgers {
    capacity: usize,
    /// Unallocated regions, offset → size.
    free: BTreeMap<usize, usize>,
    /// Live allocations, offset → size. Sole source of truth for sizes.
    live: BTreeMap<usize, usize>,
}

impl Ledgers {
    /// Ledgers for an empty arena of `capacity` bytes: one free region
    /// spanning everything.
    pub fn new(capacity: usize) -> Self {
        let mut free = BTreeMap::new();
        if capacity > 0 {
            free.insert(0, capacity);
        }
        Self {
            capacity,
            free,
            live: BTreeMap::new(),
        }
    }

    /// The arena size these ledgers partition.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The lowest-addressed free region of at least `bytes` bytes.
    pub fn first_fit(&self, bytes: usize) -> Option<Block> {
        self.free
            .iter()
            .find(|&(_, &size)| size >= bytes)
            .map(|(&offset, &size)| Block {
                offset: Offset(offset),
                size,
            })
    }

    /// Move `bytes` bytes from the first fitting free region to the
    /// allocation ledger.
    ///
    /// An exact fit moves the whole region. A larger region is split: its
    /// head becomes the allocation and its tail stays free at the advanced
    /// offset. Returns `None` when no single free region is large enough,
    /// however much free space there is in total.
    ///
    /// A zero-byte request takes one byte, so every live entry is non-empty
    /// and has its own offset.
    pub fn take_first_fit(&mut self, bytes: usize) -> Option<Offset> {
        let bytes = bytes.max(1);
        let Block { offset, size } = self.first_fit(bytes)?;
        let remainder = offset.checked_add(bytes)?;
        self.free.remove(&offset.get());
        if size > bytes {
            self.free.insert(remainder.get(), size - bytes);
        }
        self.live.insert(offset.get(), bytes);
        Some(offset)
    }

    /// Return the live region at `offset` to the free ledger and coalesce.
    ///
    /// Returns the region's recorded size, or `None` if `offset` is not the
    /// start of a live allocation (the ledgers are left untouched).
    pub fn release(&mut self, offset: Offset) -> Option<usize> {
        let size = self.live.remove(&offset.get())?;
        self.free.insert(offset.get(), size);
        self.coalesce();
        Some(size)
    }

    /// Merge every run of adjacent free regions into one.
    ///
    /// Walks the whole free ledger in address order, so after it returns no
    /// two free regions are adjacent regardless of how many merges a single
    /// release enabled. Returns the number of merges performed.
    pub fn coalesce(&mut self) -> usize {
        let blocks = std::mem::take(&mut self.free);
        let mut iter = blocks.into_iter();
        let Some((mut start, mut size)) = iter.next() else {
            return 0;
        };

        let mut merged = 0;
        for (next_start, next_size) in iter {
            if start + size == next_start {
                size += next_size;
                merged += 1;
            } else {
                self.free.insert(start, size);
                start = next_start;
                size = next_size;
            }
        }
        self.free.insert(start, size);
        merged
    }

    /// Recorded size of the live allocation at `offset`.
    pub fn live_size(&self, offset: Offset) -> Option<usize> {
        self.live.get(&offset.get()).copied()
    }

    /// Free regions in address order.
    pub fn free_blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.free.iter().map(|(&offset, &size)| Block {
            offset: Offset(offset),
            size,
        })
    }

    /// Live allocations in address order.
    pub fn live_blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.live.iter().map(|(&offset, &size)| Block {
            offset: Offset(offset),
            size,
        })
    }

    /// Number of free regions.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Number of live allocations.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total free bytes across all regions.
    pub fn free_bytes(&self) -> usize {
        self.free.values().sum()
    }

    /// Total bytes held by live allocations.
    pub fn used_bytes(&self) -> usize {
        self.live.values().sum()
    }

    /// Size of the largest free region, or 0 if the arena is full.
    pub fn largest_free(&self) -> usize {
        self.free.values().copied().max().unwrap_or(0)
    }

    /// Check that the ledgers partition `[0, capacity)`.
    ///
    /// # Errors
    ///
    /// Returns the first [`PartitionViolation`] found, scanning in address
    /// order.
    pub fn verify(&self) -> Result<(), PartitionViolation> {
        let mut regions: Vec<(usize, usize, bool)> = self
            .free
            .iter()
            .map(|(&o, &s)| (o, s, true))
            .chain(self.live.iter().map(|(&o, &s)| (o, s, false)))
            .collect();
        regions.sort_unstable();

        let mut cursor = 0usize;
        let mut prev_free: Option<usize> = None;
        for (offset, size, is_free) in regions {
            if size == 0 {
                return Err(PartitionViolation::EmptyBlock { offset });
            }
            if offset < cursor {
                return Err(PartitionViolation::Overlap { offset });
            }
            if offset > cursor {
                return Err(PartitionViolation::Gap {
                    start: cursor,
                    end: offset,
                });
            }
            if is_free {
                if let Some(first) = prev_free {
                    return Err(PartitionViolation::UncoalescedFree {
                        first,
                        second: offset,
                    });
                }
                prev_free = Some(offset);
            } else {
                prev_free = None;
            }
            cursor = offset
                .checked_add(size)
                .ok_or(PartitionViolation::OutOfBounds {
                    end: usize::MAX,
                    capacity: self.capacity,
                })?;
        }

        if cursor < self.capacity {
            return Err(PartitionViolation::Gap {
                start: cursor,
                end: self.capacity,
            });
        }
        if cursor > self.capacity {
            return Err(PartitionViolation::OutOfBounds {
                end: cursor,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}
