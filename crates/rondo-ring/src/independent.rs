//! Independent-set predicate over ring seats.

use crate::Ring;

/// Check that no two seats in `ids` are adjacent on `ring`.
///
/// Duplicate ids are tolerated (a seat is never adjacent to itself);
/// callers that care about multiplicity must count separately.
#[must_use]
pub fn is_independent_set(ring: Ring, ids: &[usize]) -> bool {
    for (i, &a) in ids.iter().enumerate() {
        if !ring.contains(a) {
            return false;
        }
        for &b in &ids[i + 1..] {
            if ring.are_adjacent(a, b) {
                return false;
            }
        }
    }
    true
}
