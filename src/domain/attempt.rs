//! Attempt id generation.
//!
//! Every finder invocation gets a unique id for its log lines, shared
//! across all workers of one race.

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe generator of unique, increasing attempt ids.
#[derive(Debug, Default)]
pub struct AttemptCounter {
    next: AtomicU64,
}

impl AttemptCounter {
    /// Create a counter whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next attempt id.
    ///
    /// Ids are unique and increasing; ordering across workers need not
    /// match real invocation order. Relaxed is enough, ids only feed
    /// log lines.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// How many ids have been handed out so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}
