//! Supervisor - spawns the worker pool, waits for the first win, and
//! winds the race down.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::domain::{AttemptCounter, Outcome};
use crate::error::{RacrError, Result};
use crate::race::{RaceCoordinator, WorkerLoop};
use crate::runner::Runner;

/// Number of workers to use when none is configured.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Configuration for a supervised race.
#[derive(Debug, Clone)]
pub struct RaceConfig {
    /// Number of concurrent workers.
    pub workers: usize,
    /// How long to wait for workers to drain once the race has ended.
    pub grace: Duration,
    /// Optional per-worker attempt budget (unbounded when None).
    pub max_attempts: Option<u64>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            grace: Duration::from_secs(5),
            max_attempts: None,
        }
    }
}

impl RaceConfig {
    /// Set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the shutdown drain bound.
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Set the optional per-worker attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: Option<u64>) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Runs worker loops against one shared coordinator until the first
/// success or external cancellation.
pub struct Supervisor {
    config: RaceConfig,
}

impl Supervisor {
    /// Create a supervisor with the given configuration.
    pub fn new(config: RaceConfig) -> Self {
        Self { config }
    }

    /// Race the configured number of workers toward the first successful
    /// attempt at `target`.
    ///
    /// Blocks until a worker wins, `shutdown` fires, or every worker has
    /// exited on its own (launch failures, spent attempt budgets).
    /// Returns the winning outcome, or [`RacrError::NoSuccess`] when the
    /// race ended without one.
    pub async fn race(
        &self,
        target: i64,
        runner: Arc<dyn Runner>,
        shutdown: CancellationToken,
    ) -> Result<Outcome> {
        let coordinator = Arc::new(RaceCoordinator::new());
        let counter = Arc::new(AttemptCounter::new());
        let workers_token = shutdown.child_token();
        let workers = self.config.workers.max(1);

        info!("starting race: {} workers, target {}", workers, target);

        let mut set = JoinSet::new();
        for worker_id in 0..workers {
            let worker = WorkerLoop::new(
                worker_id,
                target,
                coordinator.clone(),
                counter.clone(),
                runner.clone(),
                workers_token.clone(),
            )
            .with_max_attempts(self.config.max_attempts);
            set.spawn(worker.run());
        }

        tokio::select! {
            _ = coordinator.wait_won() => {}
            _ = shutdown.cancelled() => {
                debug!("race cancelled before a win");
            }
            _ = async { while set.join_next().await.is_some() {} } => {
                debug!("all workers exited on their own");
            }
        }

        workers_token.cancel();
        self.drain_workers(&mut set).await;

        // A claim may still have landed between cancellation and the
        // drain; whatever the coordinator recorded is the answer.
        coordinator.result().ok_or(RacrError::NoSuccess)
    }

    /// Give workers the grace period to notice cancellation, then abort
    /// any stragglers.
    async fn drain_workers(&self, set: &mut JoinSet<()>) {
        let drained = tokio::time::timeout(self.config.grace, async {
            while set.join_next().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            debug!("grace period elapsed, aborting {} workers", set.len());
            set.abort_all();
            while set.join_next().await.is_some() {}
        }
    }
}
