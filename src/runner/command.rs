//! Subprocess-backed runner for the external finder command.
//!
//! Runs the configured command line through `sh -c` with the target
//! appended, capturing stdout, stderr, and the exit status.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::Outcome;
use crate::error::{RacrError, Result};
use crate::runner::Runner;

/// Configuration for a command runner
#[derive(Debug, Clone)]
pub struct CommandConfig {
    /// The command to execute; the target is appended as its last argument
    pub command: String,
    /// Environment variables to set
    pub env: Vec<(String, String)>,
    /// Optional per-attempt timeout in milliseconds
    pub timeout_ms: Option<u64>,
}

impl CommandConfig {
    /// Create a new command config with the given command
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            env: Vec::new(),
            timeout_ms: None,
        }
    }

    /// Add an environment variable
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Set the per-attempt timeout in milliseconds
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }
}

/// Runner that executes the configured command via `sh -c`
pub struct CommandRunner {
    config: CommandConfig,
}

impl CommandRunner {
    /// Create a new command runner
    pub fn new(config: CommandConfig) -> Self {
        Self { config }
    }

    /// The configured command template
    pub fn command(&self) -> &str {
        &self.config.command
    }

    async fn run_once(&self, command_line: &str) -> Result<Outcome> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command_line);

        for (key, value) in &self.config.env {
            cmd.env(key, value);
        }

        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        // A worker dropped mid-attempt must not leave its finder running.
        cmd.kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| RacrError::Launch {
            command: self.config.command.clone(),
            source,
        })?;

        let output = match self.config.timeout_ms {
            Some(ms) => {
                let limit = tokio::time::Duration::from_millis(ms);
                match tokio::time::timeout(limit, child.wait_with_output()).await {
                    Ok(result) => result?,
                    Err(_) => {
                        // Timed-out attempts are routine failures, not errors.
                        return Ok(Outcome::failure(
                            -1,
                            format!("attempt timed out after {}ms", ms),
                        ));
                    }
                }
            }
            None => child.wait_with_output().await?,
        };

        Ok(Outcome::from_output(output))
    }
}

#[async_trait]
impl Runner for CommandRunner {
    async fn execute(&self, target: i64) -> Result<Outcome> {
        let command_line = format!("{} {}", self.config.command, target);
        self.run_once(&command_line).await
    }
}
