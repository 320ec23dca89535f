//! Configuration for a selection run.

use std::time::Duration;

/// Tuning parameters for a selection run.
///
/// All intervals are advisory tuning knobs, not correctness requirements -
/// the adjacency invariant is enforced by the locked state operations
/// regardless of how the sleeps are chosen. The defaults match interactive
/// use (tens of milliseconds); tests should use [`fast()`](Self::fast).
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Lower bound of the randomized worker backoff.
    pub backoff_min: Duration,

    /// Upper bound of the randomized worker backoff.
    pub backoff_max: Duration,

    /// How long a worker keeps its hand raised before re-checking whether
    /// it was committed.
    pub deliberation: Duration,

    /// Sleep between coordinator iterations, yielding the lock to workers.
    pub coordinator_interval: Duration,

    /// Maximum coordinator iterations before the run terminates degraded.
    ///
    /// This budget is the only hard termination guarantee: the
    /// reset-on-stall heuristic can in pathological timing keep colliding
    /// with freshly raised hands.
    pub max_attempts: u32,

    /// Reject quotas above the ring's independent-set bound at
    /// construction instead of letting them run to degraded termination.
    pub check_feasibility: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            backoff_min: Duration::from_millis(10),
            backoff_max: Duration::from_millis(50),
            deliberation: Duration::from_millis(25),
            coordinator_interval: Duration::from_millis(5),
            max_attempts: 1000,
            check_feasibility: false,
        }
    }
}

impl SelectionConfig {
    /// Create a config optimized for fast runs (tests, benchmarks).
    #[must_use]
    pub fn fast() -> Self {
        Self {
            backoff_min: Duration::from_millis(1),
            backoff_max: Duration::from_millis(3),
            deliberation: Duration::from_millis(2),
            coordinator_interval: Duration::from_millis(1),
            ..Default::default()
        }
    }

    /// Set the randomized worker backoff bounds.
    #[must_use]
    pub fn with_backoff(mut self, min: Duration, max: Duration) -> Self {
        self.backoff_min = min;
        self.backoff_max = max.max(min);
        self
    }

    /// Set the worker deliberation interval.
    #[must_use]
    pub fn with_deliberation(mut self, interval: Duration) -> Self {
        self.deliberation = interval;
        self
    }

    /// Set the coordinator's inter-iteration sleep.
    #[must_use]
    pub fn with_coordinator_interval(mut self, interval: Duration) -> Self {
        self.coordinator_interval = interval;
        self
    }

    /// Set the coordinator attempt budget.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Enable the construction-time feasibility check.
    #[must_use]
    pub fn with_feasibility_check(mut self) -> Self {
        self.check_feasibility = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_interactive_tuning() {
        let config = SelectionConfig::default();
        assert_eq!(config.backoff_min, Duration::from_millis(10));
        assert_eq!(config.backoff_max, Duration::from_millis(50));
        assert_eq!(config.max_attempts, 1000);
        assert!(!config.check_feasibility);
    }

    #[test]
    fn fast_preset_is_faster() {
        let fast = SelectionConfig::fast();
        let default = SelectionConfig::default();
        assert!(fast.backoff_max < default.backoff_min);
        assert!(fast.coordinator_interval < default.coordinator_interval);
    }

    #[test]
    fn backoff_bounds_stay_ordered() {
        let config = SelectionConfig::default()
            .with_backoff(Duration::from_millis(20), Duration::from_millis(5));
        assert!(config.backoff_min <= config.backoff_max);
    }
}
