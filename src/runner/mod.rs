//! Runner seam - executes one attempt of the external finder command.
//!
//! The race core only needs "invoke with a target, observe the outcome";
//! everything about how a run is launched lives behind [`Runner`].

pub mod command;

use async_trait::async_trait;

use crate::domain::Outcome;
use crate::error::Result;

pub use command::{CommandConfig, CommandRunner};

/// Executes one attempt against the external program.
///
/// Exit status 0 is success; any other status is a routine failure and
/// comes back as an ordinary [`Outcome`]. `Err` is reserved for attempts
/// that could not be launched at all.
#[async_trait]
pub trait Runner: Send + Sync {
    /// Run one attempt with the given target value.
    async fn execute(&self, target: i64) -> Result<Outcome>;
}
