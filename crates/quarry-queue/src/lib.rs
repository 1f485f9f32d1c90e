//! FIFO queue backed by a Quarry memory resource.
//!
//! [`Queue`] is a singly linked first-in-first-out container written
//! purely against [`quarry_core::MemoryResource`]: each push reserves one
//! node-sized region from the resource and each pop returns it. The queue
//! never learns which allocator it is talking to.
//!
//! Nodes are addressed by the [`Offset`](quarry_core::Offset) the resource
//! returned for them, and links between nodes are offsets too. The queue
//! borrows its resource, so it cannot outlive the allocator behind it.
//!
//! # Where values live
//!
//! Node values are not written into the resource's bytes. Each node,
//! value included, is held in the queue's own heap-allocated node table,
//! keyed by its offset. The resource accounts for one node-sized region
//! per element, so capacity limits, fragmentation and reuse in the arena
//! behave exactly as if the nodes were stored there.
//!
//! ```rust
//! use quarry_core::HeapResource;
//! use quarry_queue::Queue;
//!
//! let heap = HeapResource::new();
//! let mut queue = Queue::with_resource(&heap);
//! queue.push(1).unwrap();
//! queue.push(2).unwrap();
//! assert_eq!(queue.front(), &1);
//! assert_eq!(queue.pop(), Some(1));
//! assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![2]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod iter;
mod node;
pub mod queue;

pub use iter::Iter;
pub use queue::Queue;
