//! Forward iteration over a [`Queue`](crate::Queue).

use std::fmt;
use std::iter::FusedIterator;

use indexmap::IndexMap;
use quarry_core::Offset;

use crate::node::Node;

/// Front-to-back iterator over a queue's elements.
///
/// Also serves as a cursor: [`get`](Iter::get) reads the element at the
/// current position without advancing, and two iterators compare equal when
/// they walk the same queue and sit at the same position. The past-the-end
/// position is the same for every iterator over a given queue, so
/// `queue.begin() == queue.end()` exactly when the queue is empty.
pub struct Iter<'q, T> {
    nodes: &'q IndexMap<Offset, Node<T>>,
    current: Option<Offset>,
    remaining: usize,
}

impl<'q, T> Iter<'q, T> {
    pub(crate) fn new(
        nodes: &'q IndexMap<Offset, Node<T>>,
        current: Option<Offset>,
        remaining: usize,
    ) -> Self {
        Self {
            nodes,
            current,
            remaining,
        }
    }

    /// The element at the current position, or `None` past the end.
    pub fn get(&self) -> Option<&'q T> {
        let offset = self.current?;
        self.nodes.get(&offset).map(|node| &node.value)
    }

    /// Whether the cursor is past the last element.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }
}

impl<'q, T> Iterator for Iter<'q, T> {
    type Item = &'q T;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.current?;
        let node = self.nodes.get(&offset)?;
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

// Manual impls: deriving would require `T: Clone` / `T: PartialEq`.
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            current: self.current,
            remaining: self.remaining,
        }
    }
}

impl<T> PartialEq for Iter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.nodes, other.nodes) && self.current == other.current
    }
}

impl<T> Eq for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("current", &self.current)
            .field("remaining", &self.remaining)
            .finish()
    }
}
