//! The selection run: construction guards, the coordinator loop, and the
//! public API a driver consumes.

use std::sync::Arc;

use rand::Rng;
use rondo_ring::Ring;
use tokio::time::sleep;
use tracing::{debug, info, trace, warn};

use crate::config::SelectionConfig;
use crate::error::{Error, Result};
use crate::state::SharedState;
use crate::validator::is_valid_selection;
use crate::worker::{Worker, WorkerState};

/// How a selection run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The full quota was committed.
    Complete,
    /// The attempt budget ran out first; `selected` actors were committed.
    ///
    /// Not an error: the run still shut down cleanly and the state is
    /// consistent. Callers are expected to treat a short selection as a
    /// reportable outcome, not a crash.
    Degraded { selected: usize },
}

impl Outcome {
    /// Whether the full quota was committed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "Complete"),
            Self::Degraded { selected } => write!(f, "Degraded({selected} selected)"),
        }
    }
}

/// One independent-set selection over a ring of concurrent actors.
///
/// `total` actors sit in a ring; `required` of them must be committed such
/// that no two committed actors are adjacent. Each actor runs as its own
/// task, racing to raise a hand; the coordinator loop commits raised hands
/// one at a time, re-validating eligibility under the same critical section
/// as the commit.
///
/// # Termination
///
/// The run ends when the quota is met or when the coordinator's attempt
/// budget is exhausted, whichever comes first. Either way every worker task
/// is awaited before [`run`](Self::run) returns, and the final state is
/// frozen - the accessors are stable from then on.
#[derive(Debug)]
pub struct SelectionRun {
    state: Arc<SharedState>,
    config: SelectionConfig,
    outcome: Option<Outcome>,
}

impl SelectionRun {
    /// Create a run with the default configuration.
    ///
    /// Fails with [`Error::InvalidConfiguration`] unless
    /// `0 < required <= total`.
    pub fn new(total: usize, required: usize) -> Result<Self> {
        Self::with_config(total, required, SelectionConfig::default())
    }

    /// Create a run with an explicit configuration.
    ///
    /// With [`SelectionConfig::with_feasibility_check`] enabled, quotas
    /// above the ring's independent-set bound are additionally rejected
    /// with [`Error::InfeasibleQuota`] instead of running to degraded
    /// termination.
    pub fn with_config(total: usize, required: usize, config: SelectionConfig) -> Result<Self> {
        if total == 0 || required == 0 || required > total {
            return Err(Error::InvalidConfiguration { total, required });
        }
        let ring = Ring::new(total);
        if config.check_feasibility && required > ring.max_independent_set() {
            return Err(Error::InfeasibleQuota {
                total,
                required,
                bound: ring.max_independent_set(),
            });
        }
        Ok(Self {
            state: Arc::new(SharedState::new(ring, required)),
            config,
            outcome: None,
        })
    }

    /// Drive the selection to completion.
    ///
    /// Spawns one worker task per actor, runs the coordinator loop, then
    /// shuts everything down and returns the outcome. Calling `run` again
    /// on a finished run returns the recorded outcome without re-running.
    pub async fn run(&mut self) -> Outcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }

        let total = self.state.ring().len();
        let required = self.state.required();
        info!(total, required, "starting selection");

        let handles: Vec<_> = (0..total)
            .map(|id| {
                let worker = Worker::new(id, Arc::clone(&self.state), self.config.clone());
                tokio::spawn(worker.run())
            })
            .collect();

        let mut attempts = 0u32;
        while !self.state.quota_met() && attempts < self.config.max_attempts {
            attempts += 1;

            let eligible = self.state.snapshot_eligible();
            if eligible.is_empty() {
                // Every remaining signaler may be mutually blocked; lower
                // all hands so the backoff lottery starts over. Heuristic,
                // not proven progress - the attempt budget is the hard stop.
                trace!(attempt = attempts, "no eligible actors, resetting signals");
                self.state.reset_all_signaling();
            } else {
                let candidate = eligible[rand::thread_rng().gen_range(0..eligible.len())];
                if self.state.commit_if_eligible(candidate) {
                    info!(
                        actor = candidate,
                        selected = self.state.selected_count(),
                        required,
                        "actor committed"
                    );
                } else {
                    // Went stale between snapshot and commit; retry.
                    trace!(actor = candidate, "commit lost the race");
                }
            }

            sleep(self.config.coordinator_interval).await;
        }

        self.state.finish();

        let mut committed_workers = 0usize;
        for handle in handles {
            match handle.await {
                Ok(WorkerState::Committed) => committed_workers += 1,
                Ok(_) => {}
                Err(err) => warn!(%err, "worker task did not join cleanly"),
            }
        }
        debug!(attempts, committed_workers, "all workers stopped");

        let selected = self.state.selected_count();
        let outcome = if selected >= required {
            info!(selected, "selection complete");
            Outcome::Complete
        } else {
            warn!(
                selected,
                required, "attempt budget exhausted, selection degraded"
            );
            Outcome::Degraded { selected }
        };
        self.outcome = Some(outcome);
        outcome
    }

    /// The committed actor ids, ascending.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<usize> {
        self.state.selected_ids()
    }

    /// Number of committed actors.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.state.selected_count()
    }

    /// The outcome of a finished run, if [`run`](Self::run) has completed.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Validate the final selection: exact quota and no adjacent pair.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_selection(
            self.state.ring(),
            &self.selected_ids(),
            self.state.required(),
        )
    }
}
