//! Strongly-typed addresses.

use std::fmt;

/// An address within a memory resource, measured in bytes from its base.
///
/// Offsets are what [`MemoryResource::allocate`](crate::MemoryResource::allocate)
/// hands out and what `deallocate` takes back. They are plain integers:
/// an offset is only meaningful to the resource that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Offset(pub usize);

impl Offset {
    /// The raw byte offset.
    pub fn get(self) -> usize {
        self.0
    }

    /// The offset `bytes` further along, or `None` on overflow.
    pub fn checked_add(self, bytes: usize) -> Option<Offset> {
        self.0.checked_add(bytes).map(Offset)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<usize> for Offset {
    fn from(v: usize) -> Self {
        Self(v)
    }
}
