//! Error types for process execution

use std::time::Duration;
use thiserror::Error;

/// Failures raised while executing a child process.
///
/// A non-zero exit status is not an error; it is reported through
/// [`ProcessOutput::exit_code`](crate::ProcessOutput::exit_code).
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("Failed to launch process '{program}': {reason}")]
    LaunchFailed { program: String, reason: String },

    #[error("Failed to wait for process: {reason}")]
    WaitFailed { reason: String },

    /// The child outlived its deadline and was terminated.
    ///
    /// `partial_log` holds whatever stdout and stderr the child wrote before
    /// it was killed, concatenated in that order.
    #[error("Execution timed out after {timeout:?}")]
    Timeout {
        timeout: Duration,
        partial_log: String,
    },
}

impl RunnerError {
    /// True for [`RunnerError::Timeout`].
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
