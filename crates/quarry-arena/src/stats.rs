//! Point-in-time arena usage figures.

use std::fmt;

/// A snapshot of an arena's usage.
///
/// Produced by [`ArenaAllocator::stats`](crate::ArenaAllocator::stats).
/// Values are copied out of the ledgers and do not track later calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaStats {
    /// Arena size in bytes.
    pub capacity: usize,
    /// Bytes held by live allocations.
    pub used_bytes: usize,
    /// Bytes in free regions.
    pub free_bytes: usize,
    /// Size of the largest free region.
    pub largest_free: usize,
    /// Number of free regions.
    pub free_blocks: usize,
    /// Number of live allocations.
    pub live_allocations: usize,
}

impl ArenaStats {
    /// Share of free bytes that the largest free region cannot serve.
    ///
    /// 0.0 when all free space is one region (or there is none), tending
    /// to 1.0 as free space splinters into many small regions.
    pub fn fragmentation(&self) -> f64 {
        if self.free_bytes == 0 {
            return 0.0;
        }
        1.0 - self.largest_free as f64 / self.free_bytes as f64
    }
}

impl fmt::Display for ArenaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} bytes used, {} live, {} free blocks (largest {} bytes)",
            self.used_bytes,
            self.capacity,
            self.live_allocations,
            self.free_blocks,
            self.largest_free
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(free_bytes: usize, largest_free: usize) -> ArenaStats {
        ArenaStats {
            capacity: 300,
            used_bytes: 300 - free_bytes,
            free_bytes,
            largest_free,
            free_blocks: 2,
            live_allocations: 1,
        }
    }

    #[test]
    fn fragmentation_of_split_free_space() {
        assert!((stats(200, 100).fragmentation() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn no_fragmentation_when_full_or_contiguous() {
        assert_eq!(stats(0, 0).fragmentation(), 0.0);
        assert_eq!(stats(200, 200).fragmentation(), 0.0);
    }

    #[test]
    fn display_summarises_usage() {
        assert_eq!(
            stats(200, 100).to_string(),
            "100/300 bytes used, 1 live, 2 free blocks (largest 100 bytes)"
        );
    }
}
