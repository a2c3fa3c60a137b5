//! Shared race state and the atomic claim operation.
//!
//! Several workers may finish a successful attempt in the same instant.
//! The coordinator serializes their claims so exactly one caller ever
//! observes "I won" and the recorded winner is never overwritten.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

use crate::domain::Outcome;

/// Shared won/result state for one race.
///
/// Once won, a race stays won; the winner slot is written exactly once,
/// through [`RaceCoordinator::claim`].
#[derive(Debug, Default)]
pub struct RaceCoordinator {
    won: AtomicBool,
    winner: Mutex<Option<Outcome>>,
    notify: Notify,
}

impl RaceCoordinator {
    /// Create coordinator state for a fresh race.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any worker has already won this race.
    pub fn has_won(&self) -> bool {
        self.won.load(Ordering::SeqCst)
    }

    /// Try to record `outcome` as the race winner.
    ///
    /// Returns true for exactly one caller per race. Every later claim,
    /// including ones racing this one, returns false and the losing
    /// outcome is dropped.
    pub fn claim(&self, outcome: Outcome) -> bool {
        let mut winner = self.winner.lock().unwrap();
        if winner.is_some() {
            return false;
        }
        *winner = Some(outcome);
        self.won.store(true, Ordering::SeqCst);
        drop(winner);

        self.notify.notify_waiters();
        true
    }

    /// The winning outcome, once the race is won.
    pub fn result(&self) -> Option<Outcome> {
        self.winner.lock().unwrap().clone()
    }

    /// Wait until some worker wins.
    ///
    /// The waiter is registered before the flag is re-checked, so a
    /// claim landing between the two cannot be missed.
    pub async fn wait_won(&self) {
        loop {
            let notified = self.notify.notified();
            if self.has_won() {
                return;
            }
            notified.await;
        }
    }
}
