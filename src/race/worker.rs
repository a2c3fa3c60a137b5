//! Worker loop - drives finder attempts until somebody wins.
//!
//! Each worker repeatedly asks the runner for one attempt and feeds the
//! outcome to the coordinator. Failed attempts are logged and retried;
//! the first success is claimed; a claim lost to a sibling is dropped
//! without noise.

use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio_util::sync::CancellationToken;

use crate::domain::AttemptCounter;
use crate::race::RaceCoordinator;
use crate::runner::Runner;

/// One worker racing its siblings toward the first successful attempt.
pub struct WorkerLoop {
    worker_id: usize,
    target: i64,
    coordinator: Arc<RaceCoordinator>,
    counter: Arc<AttemptCounter>,
    runner: Arc<dyn Runner>,
    cancel: CancellationToken,
    max_attempts: Option<u64>,
}

impl WorkerLoop {
    /// Create a worker for one race.
    pub fn new(
        worker_id: usize,
        target: i64,
        coordinator: Arc<RaceCoordinator>,
        counter: Arc<AttemptCounter>,
        runner: Arc<dyn Runner>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            worker_id,
            target,
            coordinator,
            counter,
            runner,
            cancel,
            max_attempts: None,
        }
    }

    /// Bound the number of attempts this worker makes (unbounded by default).
    pub fn with_max_attempts(mut self, max_attempts: Option<u64>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Keep attempting until a win is visible, cancellation, a launch
    /// failure, or the optional attempt budget runs out.
    ///
    /// A single failed attempt is never fatal; the worker just starts a
    /// fresh one with the same target.
    pub async fn run(self) {
        let mut attempts_made: u64 = 0;

        while !self.cancel.is_cancelled() && !self.coordinator.has_won() {
            if let Some(max) = self.max_attempts {
                if attempts_made >= max {
                    debug!(
                        "worker {}: attempt budget ({}) spent, exiting",
                        self.worker_id, max
                    );
                    return;
                }
            }

            let attempt_id = self.counter.next();
            attempts_made += 1;

            let outcome = tokio::select! {
                _ = self.cancel.cancelled() => return,
                result = self.runner.execute(self.target) => match result {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        // Launch-level failures are not worth busy-looping on;
                        // this worker stops and its siblings keep racing.
                        error!("worker {}: attempt #{} could not start: {}", self.worker_id, attempt_id, e);
                        return;
                    }
                },
            };

            if outcome.succeeded {
                if self.coordinator.claim(outcome) {
                    info!(
                        "worker {}: attempt #{} won the race (target {})",
                        self.worker_id, attempt_id, self.target
                    );
                }
                // A lost claim means a sibling already won; the outcome drops here.
                return;
            }

            warn!(
                "attempt #{} failed: target={} rc={} stderr={}",
                attempt_id,
                self.target,
                outcome.exit_status,
                outcome.stderr.trim()
            );
        }
    }
}
