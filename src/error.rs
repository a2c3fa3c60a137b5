//! Error types for racr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in racr
///
/// Routine attempt failures (the finder exiting non-zero) are not errors;
/// they come back as ordinary [`crate::domain::Outcome`] values and the
/// race keeps going.
#[derive(Debug, Error)]
pub enum RacrError {
    /// Race ended without any winning attempt
    #[error("no successful runs found")]
    NoSuccess,

    /// The finder command could not be started at all
    #[error("failed to launch '{command}': {source}")]
    Launch {
        /// The command template that failed to start
        command: String,
        /// The underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for racr operations
pub type Result<T> = std::result::Result<T, RacrError>;
