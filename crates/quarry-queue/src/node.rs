//! Queue nodes.

use quarry_core::Offset;

/// One link in the chain: a value and the offset of its successor.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Option<Offset>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T) -> Self {
        Self { value, next: None }
    }

    /// Bytes reserved from the resource per node.
    pub(crate) fn footprint() -> usize {
        std::mem::size_of::<Self>().max(1)
    }
}
