//! Reusable resource wrappers and payload types.
//!
//! - [`CountingResource`]: forwards to another resource and counts calls.
//! - [`FailingResource`]: forwards until a budget of allocations runs out,
//!   then fails every request with `OutOfMemory`.
//! - [`Record`], [`Person`]: plain and heap-owning payloads.

use std::cell::Cell;

use quarry_core::{AllocError, MemoryResource, Offset};

/// Forwards every call to `inner` and counts them.
///
/// Useful for checking that a container calls its resource exactly once
/// per node and always hands back what it took.
pub struct CountingResource<'a> {
    inner: &'a dyn MemoryResource,
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    failures: Cell<usize>,
    bytes_requested: Cell<usize>,
}

impl<'a> CountingResource<'a> {
    pub fn new(inner: &'a dyn MemoryResource) -> Self {
        Self {
            inner,
            allocations: Cell::new(0),
            deallocations: Cell::new(0),
            failures: Cell::new(0),
            bytes_requested: Cell::new(0),
        }
    }

    /// Successful `allocate` calls.
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    /// `deallocate` calls, valid or not.
    pub fn deallocations(&self) -> usize {
        self.deallocations.get()
    }

    /// Failed `allocate` calls.
    pub fn failures(&self) -> usize {
        self.failures.get()
    }

    /// Bytes asked for across all `allocate` calls.
    pub fn bytes_requested(&self) -> usize {
        self.bytes_requested.get()
    }

    /// Successful allocations not yet matched by a deallocation.
    pub fn outstanding(&self) -> usize {
        self.allocations.get().saturating_sub(self.deallocations.get())
    }
}

impl MemoryResource for CountingResource<'_> {
    fn allocate(&self, bytes: usize) -> Result<Offset, AllocError> {
        self.bytes_requested.set(self.bytes_requested.get() + bytes);
        let result = self.inner.allocate(bytes);
        match result {
            Ok(_) => self.allocations.set(self.allocations.get() + 1),
            Err(_) => self.failures.set(self.failures.get() + 1),
        }
        result
    }

    fn deallocate(&self, offset: Offset, bytes: usize) {
        self.deallocations.set(self.deallocations.get() + 1);
        self.inner.deallocate(offset, bytes);
    }
}

/// Forwards to `inner` for the first `budget` allocations, then fails.
pub struct FailingResource<'a> {
    inner: &'a dyn MemoryResource,
    remaining: Cell<usize>,
}

impl<'a> FailingResource<'a> {
    pub fn new(inner: &'a dyn MemoryResource, budget: usize) -> Self {
        Self {
            inner,
            remaining: Cell::new(budget),
        }
    }

    /// Allocations left before requests start failing.
    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }
}

impl MemoryResource for FailingResource<'_> {
    fn allocate(&self, bytes: usize) -> Result<Offset, AllocError> {
        let left = self.remaining.get();
        if left == 0 {
            return Err(AllocError::OutOfMemory {
                requested: bytes,
                largest_free: 0,
                free_bytes: 0,
            });
        }
        let offset = self.inner.allocate(bytes)?;
        self.remaining.set(left - 1);
        Ok(offset)
    }

    fn deallocate(&self, offset: Offset, bytes: usize) {
        self.inner.deallocate(offset, bytes);
    }
}

/// A plain-data payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record {
    pub id: i32,
    pub weight: f64,
}

impl Record {
    pub fn new(id: i32, weight: f64) -> Self {
        Self { id, weight }
    }
}

/// A payload that owns heap data, for checking values are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.age)
    }
}
