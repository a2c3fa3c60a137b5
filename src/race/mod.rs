//! Race-to-first-success core.
//!
//! A race is a pool of worker loops driving independent finder attempts
//! against one shared coordinator; the first successful attempt wins and
//! everything else is wound down.

pub mod coordinator;
pub mod supervisor;
pub mod worker;

pub use coordinator::RaceCoordinator;
pub use supervisor::{RaceConfig, Supervisor, default_workers};
pub use worker::WorkerLoop;
