//! Benchmark workloads for the loam fixed-capacity arena.
//!
//! Provides deterministic allocation workloads so benchmark runs are
//! reproducible across machines and commits:
//!
//! - [`mixed_workload`]: seeded sequence of allocation size classes
//! - [`apply`]: drive a [`FixedArena`] with a workload slice

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use loam_arena::FixedArena;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// One allocation in a benchmark workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    /// 1 byte, align 1.
    Byte,
    /// 2 bytes, align 2.
    Half,
    /// 4 bytes, align 4.
    Word,
    /// 8 bytes, align 8.
    Quad,
}

impl SizeClass {
    /// All classes, in ascending size order.
    pub const ALL: [SizeClass; 4] = [
        SizeClass::Byte,
        SizeClass::Half,
        SizeClass::Word,
        SizeClass::Quad,
    ];
}

/// Generate a deterministic mixed-size workload of `len` allocations.
///
/// The same seed always yields the same sequence (ChaCha8 keeps the
/// stream identical across platforms).
pub fn mixed_workload(len: usize, seed: u64) -> Vec<SizeClass> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| SizeClass::ALL[rng.random_range(0..SizeClass::ALL.len())])
        .collect()
}

/// Run every allocation in `workload` against `arena`, returning how many
/// succeeded. Failures (out of bytes or ledger slots) are counted out and
/// skipped, matching how a caller would degrade.
pub fn apply(arena: &FixedArena, workload: &[SizeClass]) -> usize {
    let mut placed = 0;
    for class in workload {
        let ok = match class {
            SizeClass::Byte => arena.make(0u8).is_ok(),
            SizeClass::Half => arena.make(0u16).is_ok(),
            SizeClass::Word => arena.make(0u32).is_ok(),
            SizeClass::Quad => arena.make(0u64).is_ok(),
        };
        if ok {
            placed += 1;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workload_is_deterministic() {
        let a = mixed_workload(256, 42);
        let b = mixed_workload(256, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 256);
    }

    #[test]
    fn different_seeds_differ() {
        let a = mixed_workload(256, 1);
        let b = mixed_workload(256, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn apply_counts_successes() {
        let workload = mixed_workload(64, 7);
        let arena = FixedArena::new(4096);
        let placed = apply(&arena, &workload);
        assert_eq!(placed, 64);
        assert!(arena.used() > 0);
    }

    #[test]
    fn apply_degrades_when_capacity_runs_out() {
        let workload = mixed_workload(1024, 7);
        // Too small for the whole workload; some allocations must fail.
        let arena = FixedArena::new(64);
        let placed = apply(&arena, &workload);
        assert!(placed < workload.len());
        assert!(arena.used() <= arena.capacity());
    }
}
