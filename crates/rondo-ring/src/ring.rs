//! The ring itself: a fixed number of seats in circular order.

/// A ring of `len` seats, indexed `0..len`.
///
/// Pure value type - every method is side-effect free and callable
/// concurrently without synchronization. An out-of-range seat id is a
/// precondition violation (checked with a debug assertion), not a
/// recoverable error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ring {
    len: usize,
}

impl Ring {
    /// Create a ring of `len` seats.
    ///
    /// # Panics
    ///
    /// Panics if `len == 0` - a ring with no seats has no meaningful
    /// topology.
    #[must_use]
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "ring must have at least one seat");
        Self { len }
    }

    /// Number of seats in the ring.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// A ring is never empty; kept for clippy's `len` convention.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether `id` names a seat in this ring.
    #[must_use]
    pub const fn contains(&self, id: usize) -> bool {
        id < self.len
    }

    /// The two neighbors of seat `id`, as `(left, right)`.
    ///
    /// `left = (id + len - 1) mod len`, `right = (id + 1) mod len`.
    /// On a 1-seat ring a seat is its own neighbor on both sides; on a
    /// 2-seat ring both neighbors are the same seat.
    #[must_use]
    pub fn neighbors(&self, id: usize) -> (usize, usize) {
        debug_assert!(self.contains(id), "seat {id} out of range");
        let left = (id + self.len - 1) % self.len;
        let right = (id + 1) % self.len;
        (left, right)
    }

    /// Ring distance between two seats: the shorter way around.
    #[must_use]
    pub fn distance(&self, a: usize, b: usize) -> usize {
        debug_assert!(self.contains(a), "seat {a} out of range");
        debug_assert!(self.contains(b), "seat {b} out of range");
        let d = a.abs_diff(b);
        d.min(self.len - d)
    }

    /// Whether two distinct seats sit next to each other.
    #[must_use]
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        a != b && self.distance(a, b) == 1
    }

    /// Size of the largest independent set this ring admits.
    ///
    /// `floor(len / 2)` for `len >= 2` (cycle-graph bound); a 1-seat ring
    /// trivially admits its single seat.
    #[must_use]
    pub const fn max_independent_set(&self) -> usize {
        if self.len == 1 {
            1
        } else {
            self.len / 2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn neighbors_wrap_around() {
        let ring = Ring::new(12);
        assert_eq!(ring.neighbors(0), (11, 1));
        assert_eq!(ring.neighbors(5), (4, 6));
        assert_eq!(ring.neighbors(11), (10, 0));
    }

    #[test]
    fn degenerate_rings() {
        assert_eq!(Ring::new(1).neighbors(0), (0, 0));
        assert_eq!(Ring::new(2).neighbors(0), (1, 1));
        assert_eq!(Ring::new(2).neighbors(1), (0, 0));
    }

    #[test]
    #[should_panic(expected = "at least one seat")]
    fn zero_seats_rejected() {
        let _ = Ring::new(0);
    }

    #[test]
    fn distance_shorter_way_around() {
        let ring = Ring::new(10);
        assert_eq!(ring.distance(0, 1), 1);
        assert_eq!(ring.distance(0, 9), 1);
        assert_eq!(ring.distance(0, 5), 5);
        assert_eq!(ring.distance(2, 8), 4);
        assert_eq!(ring.distance(7, 7), 0);
    }

    #[test]
    fn adjacency_across_the_seam() {
        let ring = Ring::new(6);
        assert!(ring.are_adjacent(0, 5));
        assert!(ring.are_adjacent(5, 0));
        assert!(ring.are_adjacent(2, 3));
        assert!(!ring.are_adjacent(0, 2));
        assert!(!ring.are_adjacent(4, 4));
    }

    #[test]
    fn independent_set_bound() {
        assert_eq!(Ring::new(1).max_independent_set(), 1);
        assert_eq!(Ring::new(2).max_independent_set(), 1);
        assert_eq!(Ring::new(4).max_independent_set(), 2);
        assert_eq!(Ring::new(5).max_independent_set(), 2);
        assert_eq!(Ring::new(6).max_independent_set(), 3);
        assert_eq!(Ring::new(12).max_independent_set(), 6);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(len in 1usize..100, a in 0usize..100, b in 0usize..100) {
            let ring = Ring::new(len);
            let (a, b) = (a % len, b % len);
            prop_assert_eq!(ring.distance(a, b), ring.distance(b, a));
        }

        #[test]
        fn distance_never_exceeds_half(len in 1usize..100, a in 0usize..100, b in 0usize..100) {
            let ring = Ring::new(len);
            prop_assert!(ring.distance(a % len, b % len) <= len / 2);
        }

        #[test]
        fn neighbor_relation_is_mutual(len in 3usize..100, id in 0usize..100) {
            let ring = Ring::new(len);
            let id = id % len;
            let (left, right) = ring.neighbors(id);
            prop_assert_eq!(ring.neighbors(left).1, id);
            prop_assert_eq!(ring.neighbors(right).0, id);
            prop_assert!(ring.are_adjacent(id, left));
            prop_assert!(ring.are_adjacent(id, right));
        }
    }
}
