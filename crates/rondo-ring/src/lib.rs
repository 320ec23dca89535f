//! Rondo Ring Topology
//!
//! Circular arrangement of `n` seats where seat `i` is connected to exactly
//! two neighbors: `(i - 1) mod n` and `(i + 1) mod n`.
//!
//! # Why a dedicated crate
//!
//! The selection protocol's one hard invariant - no two committed seats may
//! be adjacent - is a purely topological statement. Keeping the topology
//! math here, free of locks and tasks, lets the validator and the property
//! tests reason about it without touching the concurrent machinery.
//!
//! # Independent sets on a cycle
//!
//! A cycle of `n >= 2` seats admits an independent set of at most
//! `floor(n / 2)` members. [`Ring::max_independent_set`] exposes that bound
//! so callers can reject infeasible selection quotas up front.

mod independent;
mod ring;

pub use independent::is_independent_set;
pub use ring::Ring;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_matches_alternating_pattern() {
        // On an even ring the alternating pattern {0, 2, 4, ..} is a maximum
        // independent set and has exactly n/2 members.
        for n in [2usize, 4, 6, 8, 12] {
            let ring = Ring::new(n);
            let alternating: Vec<usize> = (0..n).step_by(2).collect();
            assert_eq!(alternating.len(), ring.max_independent_set());
            assert!(is_independent_set(ring, &alternating));
        }
    }
}
