//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use crate::ledger::PartitionViolation;

/// Errors raised while building or checking an arena.
///
/// Allocation failures are not here: `allocate` reports them as
/// [`quarry_core::AllocError`] so that containers only depend on the
/// generic interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The configuration asked for an arena of zero bytes.
    ZeroCapacity,
    /// The free and allocation ledgers no longer partition the arena.
    Corrupted {
        /// The first inconsistency found.
        violation: PartitionViolation,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "arena capacity must be non-zero"),
            Self::Corrupted { violation } => write!(f, "arena ledgers corrupted: {violation}"),
        }
    }
}

impl Error for ArenaError {}

impl From<PartitionViolation> for ArenaError {
    fn from(violation: PartitionViolation) -> Self {
        Self::Corrupted { violation }
    }
}
