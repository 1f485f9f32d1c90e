//! Core types and traits for the Quarry arena.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the allocation interface that every container in the workspace is
//! written against, independent of the concrete allocator:
//!
//! - [`Offset`]: an address within an allocator's storage.
//! - [`MemoryResource`]: `allocate` / `deallocate` / identity equality.
//! - [`AllocError`]: the failure taxonomy of the interface.
//! - [`HeapResource`]: an unbounded resource used when no arena is supplied.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod heap;
pub mod id;
pub mod resource;

pub use error::AllocError;
pub use heap::HeapResource;
pub use id::Offset;
pub use resource::MemoryResource;
