//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for the arena allocator.
///
/// Controls the arena's fixed capacity and optional self-checking.
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the arena in bytes.
    ///
    /// Default: 1024. Must be non-zero. The arena never grows; requests
    /// that no single free region can hold fail with `OutOfMemory`.
    pub capacity: usize,

    /// Re-check the ledger partition after every allocate and deallocate.
    ///
    /// Default: on in debug builds, off in release builds. A failed check
    /// is an allocator bug and panics.
    pub verify_ledgers: bool,

    /// Zero a region's bytes when it is returned to the free ledger.
    ///
    /// Default: off.
    pub scrub_on_release: bool,
}

impl ArenaConfig {
    /// Default arena capacity in bytes.
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Create a config for an arena of `capacity` bytes.
    ///
    /// Uses default values for all other parameters.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            verify_ledgers: cfg!(debug_assertions),
            scrub_on_release: false,
        }
    }

    /// Enable or disable the per-call partition check.
    pub fn verify_ledgers(mut self, enabled: bool) -> Self {
        self.verify_ledgers = enabled;
        self
    }

    /// Enable or disable zeroing released regions.
    pub fn scrub_on_release(mut self, enabled: bool) -> Self {
        self.scrub_on_release = enabled;
        self
    }

    /// Check that the configuration describes a usable arena.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::ZeroCapacity`] if `capacity` is zero.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.capacity == 0 {
            return Err(ArenaError::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_1k() {
        let config = ArenaConfig::default();
        assert_eq!(config.capacity, 1024);
        assert!(!config.scrub_on_release);
        assert_eq!(config.verify_ledgers, cfg!(debug_assertions));
    }

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(
            ArenaConfig::new(0).validate(),
            Err(ArenaError::ZeroCapacity)
        );
        assert!(ArenaConfig::new(1).validate().is_ok());
    }

    #[test]
    fn builder_methods_override_defaults() {
        let config = ArenaConfig::new(64)
            .verify_ledgers(true)
            .scrub_on_release(true);
        assert!(config.verify_ledgers);
        assert!(config.scrub_on_release);
        assert_eq!(config.capacity, 64);
    }
}
