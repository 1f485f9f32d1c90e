//! The FIFO queue.

use std::fmt;

use indexmap::IndexMap;
use quarry_core::{AllocError, HeapResource, MemoryResource, Offset};

use crate::iter::Iter;
use crate::node::Node;

/// A singly linked FIFO queue whose nodes are allocated from a
/// [`MemoryResource`].
///
/// `push` appends at the tail and `pop` removes from the head, both O(1),
/// each making exactly one call to the resource. Nodes are keyed by the
/// offset the resource returned for them; `head`, `tail` and every `next`
/// link are offsets into that map. Values live in that map on the heap;
/// the resource only accounts for each node's bytes.
///
/// The queue borrows its resource for `'a`. Dropping the queue pops every
/// remaining node, returning all of its regions to the resource.
///
/// # Iteration
///
/// [`iter`](Queue::iter) walks the queue front to back. An iterator holds a
/// shared borrow of the queue, so pushing or popping while one is alive is
/// rejected at compile time.
pub struct Queue<'a, T> {
    resource: &'a dyn MemoryResource,
    nodes: IndexMap<Offset, Node<T>>,
    head: Option<Offset>,
    tail: Option<Offset>,
}

impl<T> Queue<'static, T> {
    /// An empty queue allocating from the process-wide [`HeapResource`].
    pub fn new() -> Self {
        Self::with_resource(HeapResource::global())
    }
}

impl<T> Default for Queue<'static, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> Queue<'a, T> {
    /// An empty queue allocating from `resource`.
    pub fn with_resource(resource: &'a dyn MemoryResource) -> Self {
        Self {
            resource,
            nodes: IndexMap::new(),
            head: None,
            tail: None,
        }
    }

    /// Bytes requested from the resource for each element.
    pub fn node_size() -> usize {
        Node::<T>::footprint()
    }

    /// The resource this queue allocates from.
    pub fn resource(&self) -> &'a dyn MemoryResource {
        self.resource
    }

    /// Append `value` at the back.
    ///
    /// # Errors
    ///
    /// Returns the resource's [`AllocError`] if a node cannot be allocated.
    /// The queue is unchanged and `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<(), AllocError> {
        let offset = self.resource.allocate(Node::<T>::footprint())?;
        debug_assert!(
            !self.nodes.contains_key(&offset),
            "resource returned live offset {offset}"
        );
        self.nodes.insert(offset, Node::new(value));
        match self.tail.and_then(|tail| self.nodes.get_mut(&tail)) {
            Some(prev) => prev.next = Some(offset),
            None => self.head = Some(offset),
        }
        self.tail = Some(offset);
        Ok(())
    }

    /// Remove and return the front value, or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<T> {
        let head = self.head?;
        let node = self.nodes.swap_remove(&head)?;
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.resource.deallocate(head, Node::<T>::footprint());
        Some(node.value)
    }

    /// The front value.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty. Use [`try_front`](Self::try_front) when
    /// emptiness is not already ruled out.
    pub fn front(&self) -> &T {
        self.try_front()
            .expect("Queue::front called on an empty queue")
    }

    /// The front value, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn front_mut(&mut self) -> &mut T {
        self.try_front_mut()
            .expect("Queue::front_mut called on an empty queue")
    }

    /// The front value, or `None` if the queue is empty.
    pub fn try_front(&self) -> Option<&T> {
        let head = self.head?;
        self.nodes.get(&head).map(|node| &node.value)
    }

    /// The front value mutably, or `None` if the queue is empty.
    pub fn try_front_mut(&mut self) -> Option<&mut T> {
        let head = self.head?;
        self.nodes.get_mut(&head).map(|node| &mut node.value)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Pop every element, returning all nodes to the resource.
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    /// Push every value from `values` in order.
    ///
    /// # Errors
    ///
    /// Stops at the first allocation failure and returns it. Values pushed
    /// before the failure stay in the queue.
    pub fn try_extend<I>(&mut self, values: I) -> Result<(), AllocError>
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.push(value)?;
        }
        Ok(())
    }

    /// Iterate front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.head, self.nodes.len())
    }

    /// Cursor positioned at the front element.
    ///
    /// Equal to [`end`](Self::end) when the queue is empty.
    pub fn begin(&self) -> Iter<'_, T> {
        self.iter()
    }

    /// Cursor positioned past the last element.
    pub fn end(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, None, 0)
    }
}

impl<T> Drop for Queue<'_, T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'q, T> IntoIterator for &'q Queue<'_, T> {
    type Item = &'q T;
    type IntoIter = Iter<'q, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
