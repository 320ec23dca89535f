//! Post-run invariant checking.
//!
//! Pure functions over the frozen final selection - no lock is needed
//! because the state is read-only once the run has finished.

use rondo_ring::{is_independent_set, Ring};

/// Check a completed selection.
///
/// Valid means: exactly `required` distinct ids, every id a seat on the
/// ring, and no two ids ring-adjacent.
#[must_use]
pub fn is_valid_selection(ring: Ring, ids: &[usize], required: usize) -> bool {
    ids.len() == required && has_distinct_ids(ids) && is_independent_set(ring, ids)
}

fn has_distinct_ids(ids: &[usize]) -> bool {
    ids.iter()
        .enumerate()
        .all(|(i, a)| !ids[i + 1..].contains(a))
}
