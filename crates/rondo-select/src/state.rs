//! Shared selection state and its mutual-exclusion discipline.
//!
//! All per-actor flags live behind a single mutex, and every decision that
//! depends on them happens inside one critical section together with its
//! dependent write. This closes the classic race where two neighbors both
//! observe "nobody next to me is signaling" and both raise a hand.
//!
//! The lock is only ever held for one check-and-set or snapshot - never
//! across a sleep or an `.await`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rondo_ring::Ring;
use tracing::trace;

/// The flag arrays and counter guarded by the mutex.
#[derive(Debug)]
struct Flags {
    selected: Vec<bool>,
    signaling: Vec<bool>,
    selected_count: usize,
}

/// Shared state of one selection run.
///
/// Invariants, upheld by keeping every mutation inside one critical section:
/// - `selected_count` equals the number of set `selected` flags.
/// - A selected actor is never signaling.
/// - No two selected actors are ring-adjacent (checked again at commit).
/// - `selected_count` never exceeds the quota.
#[derive(Debug)]
pub(crate) struct SharedState {
    ring: Ring,
    required: usize,
    flags: Mutex<Flags>,
    finished: AtomicBool,
}

impl SharedState {
    pub(crate) fn new(ring: Ring, required: usize) -> Self {
        let n = ring.len();
        Self {
            ring,
            required,
            flags: Mutex::new(Flags {
                selected: vec![false; n],
                signaling: vec![false; n],
                selected_count: 0,
            }),
            finished: AtomicBool::new(false),
        }
    }

    pub(crate) fn ring(&self) -> Ring {
        self.ring
    }

    pub(crate) fn required(&self) -> usize {
        self.required
    }

    /// No task ever panics while holding the lock, so a poisoned mutex
    /// still contains consistent state and is safe to recover.
    fn flags(&self) -> MutexGuard<'_, Flags> {
        self.flags.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Atomically check eligibility and raise the hand of actor `id`.
    ///
    /// Fails if the actor is already selected or signaling, or if either
    /// neighbor is selected or signaling.
    pub(crate) fn try_mark_signaling(&self, id: usize) -> bool {
        let mut flags = self.flags();
        if flags.selected[id] || flags.signaling[id] {
            return false;
        }
        let (left, right) = self.ring.neighbors(id);
        if flags.signaling[left]
            || flags.selected[left]
            || flags.signaling[right]
            || flags.selected[right]
        {
            return false;
        }
        flags.signaling[id] = true;
        trace!(actor = id, "hand raised");
        true
    }

    /// Lower the hand of actor `id` (worker back-off).
    pub(crate) fn clear_signaling(&self, id: usize) {
        self.flags().signaling[id] = false;
    }

    /// Commit actor `id` if it is still a valid candidate.
    ///
    /// Re-validates under the same critical section that the actor is
    /// signaling, not yet selected, and that neither neighbor is selected;
    /// then marks it selected, retracts its own and both neighbors'
    /// signals, and bumps the count. Returns false for candidates that went
    /// stale between snapshot and commit - an expected outcome the caller
    /// retries, not an error.
    pub(crate) fn commit_if_eligible(&self, id: usize) -> bool {
        let mut flags = self.flags();
        if !flags.signaling[id] || flags.selected[id] {
            return false;
        }
        let (left, right) = self.ring.neighbors(id);
        if flags.selected[left] || flags.selected[right] {
            return false;
        }
        flags.selected[id] = true;
        flags.signaling[id] = false;
        flags.signaling[left] = false;
        flags.signaling[right] = false;
        flags.selected_count += 1;
        true
    }

    /// Lower every raised hand.
    ///
    /// Anti-stall measure for the case where every remaining signaler is
    /// mutually blocked by its neighbors.
    pub(crate) fn reset_all_signaling(&self) {
        let mut flags = self.flags();
        for signal in &mut flags.signaling {
            *signal = false;
        }
    }

    /// Ids that are signaling, unselected, and have no selected neighbor.
    pub(crate) fn snapshot_eligible(&self) -> Vec<usize> {
        let flags = self.flags();
        (0..self.ring.len())
            .filter(|&id| {
                if !flags.signaling[id] || flags.selected[id] {
                    return false;
                }
                let (left, right) = self.ring.neighbors(id);
                !flags.selected[left] && !flags.selected[right]
            })
            .collect()
    }

    pub(crate) fn is_selected(&self, id: usize) -> bool {
        self.flags().selected[id]
    }

    pub(crate) fn selected_count(&self) -> usize {
        self.flags().selected_count
    }

    /// Committed actor ids in ascending order.
    pub(crate) fn selected_ids(&self) -> Vec<usize> {
        let flags = self.flags();
        (0..self.ring.len())
            .filter(|&id| flags.selected[id])
            .collect()
    }

    pub(crate) fn quota_met(&self) -> bool {
        self.selected_count() >= self.required
    }

    /// Cooperative shutdown flag, polled once per worker loop iteration.
    pub(crate) fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    pub(crate) fn finish(&self) {
        self.finished.store(true, Ordering::Release);
    }
}
