//! Attempt outcome record.
//!
//! One [`Outcome`] is produced per finder invocation and owned by the
//! worker that ran it until it is handed to the race coordinator.

use std::process::Output;

/// Result of one finder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the invocation exited with status 0
    pub succeeded: bool,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Numeric exit status (-1 when the process died without a code)
    pub exit_status: i32,
}

impl Outcome {
    /// Build an outcome from a finished process output.
    pub fn from_output(output: Output) -> Self {
        Self {
            succeeded: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_status: output.status.code().unwrap_or(-1),
        }
    }

    /// Successful outcome carrying the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            stdout: stdout.into(),
            stderr: String::new(),
            exit_status: 0,
        }
    }

    /// Failed outcome with the given exit status and stderr text.
    pub fn failure(exit_status: i32, stderr: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: stderr.into(),
            exit_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_outcome() {
        let outcome = Outcome::success("FOUND:42");
        assert!(outcome.succeeded);
        assert_eq!(outcome.stdout, "FOUND:42");
        assert!(outcome.stderr.is_empty());
        assert_eq!(outcome.exit_status, 0);
    }

    #[test]
    fn test_failure_outcome() {
        let outcome = Outcome::failure(3, "nothing found");
        assert!(!outcome.succeeded);
        assert!(outcome.stdout.is_empty());
        assert_eq!(outcome.stderr, "nothing found");
        assert_eq!(outcome.exit_status, 3);
    }

    #[test]
    fn test_outcome_clone_eq() {
        let outcome = Outcome::success("result");
        let cloned = outcome.clone();
        assert_eq!(outcome, cloned);
    }

    #[test]
    fn test_outcome_debug() {
        let outcome = Outcome::failure(1, "err");
        let debug_str = format!("{:?}", outcome);
        assert!(debug_str.contains("succeeded: false"));
        assert!(debug_str.contains("exit_status: 1"));
    }
}
