//! Error types for the allocation interface.

use std::error::Error;
use std::fmt;

use crate::id::Offset;

/// Errors produced by a [`MemoryResource`](crate::MemoryResource).
///
/// Every failure is synchronous and local to the call that raised it;
/// nothing is retried and no resource grows to satisfy a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// No single free region can hold the request.
    ///
    /// Raised even when the sum of all free bytes would be enough: free
    /// space split across disjoint regions never satisfies a request that
    /// no one region can.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
        /// Size of the largest free region at the time of the request.
        largest_free: usize,
        /// Total free bytes across all regions.
        free_bytes: usize,
    },
    /// The offset does not name a live allocation.
    ///
    /// `deallocate` suppresses this; only strict release paths report it.
    InvalidDeallocation {
        /// The offending offset.
        offset: Offset,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory {
                requested,
                largest_free,
                free_bytes,
            } => {
                write!(
                    f,
                    "out of memory: requested {requested} bytes, largest free block {largest_free} bytes ({free_bytes} bytes free in total)"
                )
            }
            Self::InvalidDeallocation { offset } => {
                write!(f, "no live allocation at offset {offset}")
            }
        }
    }
}

impl Error for AllocError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_memory_message_names_sizes() {
        let err = AllocError::OutOfMemory {
            requested: 150,
            largest_free: 100,
            free_bytes: 200,
        };
        let msg = err.to_string();
        assert!(msg.contains("150"));
        assert!(msg.contains("100"));
        assert!(msg.contains("200"));
    }

    #[test]
    fn invalid_deallocation_message_names_offset() {
        let err = AllocError::InvalidDeallocation { offset: Offset(16) };
        assert_eq!(err.to_string(), "no live allocation at offset 0x10");
    }
}
