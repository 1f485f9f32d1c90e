//! Benchmark workloads for the Quarry arena.
//!
//! Provides deterministic allocation scripts for benchmarks and stress
//! tests:
//!
//! - [`churn_script`]: a seeded mix of allocations and frees
//! - [`checkerboard`]: fill an arena, then free every other region
//! - [`run_script`]: replay a script against any [`MemoryResource`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use quarry_core::{MemoryResource, Offset};

/// One step of an allocation script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Allocate this many bytes.
    Alloc(usize),
    /// Free the live allocation at this index (modulo the live count).
    Free(usize),
}

/// Outcome of replaying a script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptOutcome {
    /// Allocations that succeeded.
    pub allocated: usize,
    /// Allocations that failed with `OutOfMemory`.
    pub failed: usize,
    /// Frees issued.
    pub freed: usize,
    /// Allocations still live at the end of the script.
    pub live: usize,
}

/// Generate a deterministic script of `len` operations.
///
/// Roughly two allocations for every free, with sizes in `1..=max_bytes`.
pub fn churn_script(seed: u64, len: usize, max_bytes: usize) -> Vec<Op> {
    let mut state = seed;
    let mut ops = Vec::with_capacity(len);
    for _ in 0..len {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let roll = (state >> 33) as usize;
        if roll % 3 == 0 {
            ops.push(Op::Free(roll / 3));
        } else {
            ops.push(Op::Alloc(1 + roll % max_bytes.max(1)));
        }
    }
    ops
}

/// Replay `script` against `resource`.
///
/// Allocations still live when the script ends are freed before returning,
/// so the resource is left as it was found.
pub fn run_script(resource: &dyn MemoryResource, script: &[Op]) -> ScriptOutcome {
    let mut live: Vec<(Offset, usize)> = Vec::new();
    let mut outcome = ScriptOutcome::default();
    for op in script {
        match *op {
            Op::Alloc(bytes) => match resource.allocate(bytes) {
                Ok(offset) => {
                    live.push((offset, bytes));
                    outcome.allocated += 1;
                }
                Err(_) => outcome.failed += 1,
            },
            Op::Free(index) => {
                if live.is_empty() {
                    continue;
                }
                let (offset, bytes) = live.swap_remove(index % live.len());
                resource.deallocate(offset, bytes);
                outcome.freed += 1;
            }
        }
    }
    outcome.live = live.len();
    for (offset, bytes) in live {
        resource.deallocate(offset, bytes);
    }
    outcome
}

/// Fill `resource` with `count` regions of `block` bytes, then free every
/// other one.
///
/// Returns the offsets still held. With an arena of exactly
/// `count * block` bytes this leaves the worst case for first-fit: many
/// equal free holes, none larger than `block`.
pub fn checkerboard(resource: &dyn MemoryResource, count: usize, block: usize) -> Vec<Offset> {
    let offsets: Vec<Offset> = (0..count)
        .map_while(|_| resource.allocate(block).ok())
        .collect();
    let mut kept = Vec::with_capacity(offsets.len() / 2 + 1);
    for (i, offset) in offsets.into_iter().enumerate() {
        if i % 2 == 0 {
            resource.deallocate(offset, block);
        } else {
            kept.push(offset);
        }
    }
    kept
}
