//! Actor workers - one concurrent task per ring seat.
//!
//! A worker never errors out: contention is resolved by retry and
//! randomized backoff. Every worker task is awaited by the coordinator at
//! shutdown; none outlives the run.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, trace};

use crate::config::SelectionConfig;
use crate::state::SharedState;

/// Lifecycle of one worker.
///
/// `Idle -> Signaling -> {Committed | Idle}`, with `Stopped` as the
/// terminal state for workers that were never committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WorkerState {
    /// Not signaling; will periodically attempt to raise a hand.
    Idle,
    /// Hand raised, waiting to be committed or to back off.
    Signaling,
    /// Committed by the coordinator; the task has finished.
    Committed,
    /// Run ended without this worker being committed.
    Stopped,
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Signaling => write!(f, "Signaling"),
            Self::Committed => write!(f, "Committed"),
            Self::Stopped => write!(f, "Stopped"),
        }
    }
}

/// One actor's worker loop.
#[derive(Debug)]
pub(crate) struct Worker {
    id: usize,
    state: Arc<SharedState>,
    config: SelectionConfig,
}

impl Worker {
    pub(crate) fn new(id: usize, state: Arc<SharedState>, config: SelectionConfig) -> Self {
        Self { id, state, config }
    }

    /// Draw a backoff duration from the configured bounds.
    ///
    /// The RNG is taken fresh per draw and dropped before any await, so the
    /// future stays `Send`.
    fn backoff(&self) -> Duration {
        let min = self.config.backoff_min;
        let max = self.config.backoff_max;
        if max <= min {
            return min;
        }
        let micros = rand::thread_rng().gen_range(min.as_micros() as u64..=max.as_micros() as u64);
        Duration::from_micros(micros)
    }

    /// Run until committed or until the coordinator finishes the run.
    pub(crate) async fn run(self) -> WorkerState {
        let mut lifecycle = WorkerState::Idle;

        while !self.state.is_finished() && !self.state.quota_met() {
            match lifecycle {
                WorkerState::Idle => {
                    if self.state.try_mark_signaling(self.id) {
                        lifecycle = WorkerState::Signaling;
                    } else {
                        // Desynchronize from competing neighbors.
                        sleep(self.backoff()).await;
                    }
                }
                WorkerState::Signaling => {
                    sleep(self.config.deliberation).await;
                    if self.state.is_selected(self.id) {
                        lifecycle = WorkerState::Committed;
                        break;
                    }
                    // Not picked this round: lower the hand and back off so
                    // a permanently raised hand cannot starve the neighbors.
                    self.state.clear_signaling(self.id);
                    lifecycle = WorkerState::Idle;
                    sleep(self.backoff()).await;
                }
                WorkerState::Committed | WorkerState::Stopped => break,
            }
        }

        // The coordinator may have committed this actor between the last
        // flag poll and loop exit.
        if lifecycle != WorkerState::Committed && self.state.is_selected(self.id) {
            lifecycle = WorkerState::Committed;
        }
        if lifecycle != WorkerState::Committed {
            lifecycle = WorkerState::Stopped;
        }

        match lifecycle {
            WorkerState::Committed => debug!(actor = self.id, "worker committed"),
            _ => trace!(actor = self.id, state = %lifecycle, "worker stopped"),
        }
        lifecycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rondo_ring::Ring;
    use std::time::Instant;

    fn shared(n: usize, k: usize) -> Arc<SharedState> {
        Arc::new(SharedState::new(Ring::new(n), k))
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn worker_observes_its_own_commit() {
        let state = shared(3, 1);
        let worker = Worker::new(0, Arc::clone(&state), SelectionConfig::fast());
        let handle = tokio::spawn(worker.run());

        // Wait for the hand to go up, then commit it.
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if state.snapshot_eligible().contains(&0) && state.commit_if_eligible(0) {
                break;
            }
            assert!(Instant::now() < deadline, "worker never raised a hand");
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        assert_eq!(handle.await.unwrap(), WorkerState::Committed);
        assert!(state.is_selected(0));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn worker_stops_on_finish() {
        let state = shared(3, 2);
        // Block seat 1 by raising seat 0's hand first.
        assert!(state.try_mark_signaling(0));

        let worker = Worker::new(1, Arc::clone(&state), SelectionConfig::fast());
        let handle = tokio::spawn(worker.run());

        tokio::time::sleep(Duration::from_millis(10)).await;
        state.finish();

        assert_eq!(handle.await.unwrap(), WorkerState::Stopped);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn workers_are_always_joinable() {
        let state = shared(6, 3);
        let handles: Vec<_> = (0..6)
            .map(|id| {
                let worker = Worker::new(id, Arc::clone(&state), SelectionConfig::fast());
                tokio::spawn(worker.run())
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(20)).await;
        state.finish();

        for handle in handles {
            // Every worker exits promptly after the finish flag is set.
            let joined = tokio::time::timeout(Duration::from_secs(5), handle).await;
            assert!(joined.is_ok(), "worker did not stop after finish");
        }
    }
}
