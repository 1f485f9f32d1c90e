//! The generic allocation interface.

use crate::error::AllocError;
use crate::id::Offset;

/// A source of byte regions that containers allocate their nodes from.
///
/// This is the only contract between an allocator and the containers it
/// backs. Containers never see the allocator's bookkeeping: they ask for a
/// region of `bytes`, receive an [`Offset`], and hand the offset back when
/// they are done with it.
///
/// Methods take `&self` so that several containers can share one resource
/// through plain shared references. Implementations keep their state behind
/// interior mutability and are not required to be thread-safe; callers
/// serialize access to a resource and every container backed by it.
pub trait MemoryResource {
    /// Reserve a region of at least `bytes` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::OutOfMemory`] if the request cannot be served.
    fn allocate(&self, bytes: usize) -> Result<Offset, AllocError>;

    /// Return the region starting at `offset`.
    ///
    /// `bytes` is the size the caller believes it allocated. It is a hint
    /// only: implementations track region sizes themselves and must not
    /// trust it. Offsets that do not name a live region are ignored.
    fn deallocate(&self, offset: Offset, bytes: usize);

    /// Whether `other` can release regions allocated from `self`.
    ///
    /// The default is identity: a resource is equal only to itself, never
    /// to another instance with the same capacity or state.
    fn is_equal(&self, other: &dyn MemoryResource) -> bool {
        std::ptr::addr_eq(self as *const Self, other as *const dyn MemoryResource)
    }
}

impl<'a> PartialEq for dyn MemoryResource + 'a {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl<'a> Eq for dyn MemoryResource + 'a {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Minimal bump resource used to exercise the trait defaults.
    struct Bump {
        cursor: Cell<usize>,
        capacity: usize,
    }

    impl Bump {
        fn new(capacity: usize) -> Self {
            Self {
                cursor: Cell::new(0),
                capacity,
            }
        }
    }

    impl MemoryResource for Bump {
        fn allocate(&self, bytes: usize) -> Result<Offset, AllocError> {
            let start = self.cursor.get();
            let free = self.capacity - start;
            if bytes > free {
                return Err(AllocError::OutOfMemory {
                    requested: bytes,
                    largest_free: free,
                    free_bytes: free,
                });
            }
            self.cursor.set(start + bytes);
            Ok(Offset(start))
        }

        fn deallocate(&self, _offset: Offset, _bytes: usize) {}
    }

    #[test]
    fn resource_equals_itself() {
        let a = Bump::new(64);
        let r: &dyn MemoryResource = &a;
        assert!(a.is_equal(&a));
        assert!(r == r);
    }

    #[test]
    fn distinct_resources_are_never_equal() {
        let a = Bump::new(64);
        let b = Bump::new(64);
        let ra: &dyn MemoryResource = &a;
        let rb: &dyn MemoryResource = &b;
        assert!(!a.is_equal(&b));
        assert!(ra != rb);
    }

    #[test]
    fn allocation_goes_through_trait_object() {
        let a = Bump::new(16);
        let r: &dyn MemoryResource = &a;
        assert_eq!(r.allocate(10).unwrap(), Offset(0));
        assert!(matches!(
            r.allocate(10),
            Err(AllocError::OutOfMemory { requested: 10, .. })
        ));
    }
}
