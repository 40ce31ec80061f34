use crate::error::RunnerError;
use std::time::Duration;

use super::CommandSpec;

// ============================================================================
// ProcessRunner Trait
// ============================================================================

/// Captured result of a process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Standard output from the process
    pub stdout: Vec<u8>,
    /// Standard error from the process
    pub stderr: Vec<u8>,
    /// Exit code from the process (None if terminated by signal)
    pub exit_code: Option<i32>,
    /// Whether the execution timed out
    pub timed_out: bool,
}

impl ProcessOutput {
    #[must_use]
    pub fn new(stdout: Vec<u8>, stderr: Vec<u8>, exit_code: Option<i32>, timed_out: bool) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
            timed_out,
        }
    }

    /// Get stdout as a UTF-8 string, lossy conversion.
    #[must_use]
    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Get stderr as a UTF-8 string, lossy conversion.
    #[must_use]
    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Stdout followed by stderr, as reported back to users.
    ///
    /// A newline separates the two streams when stdout does not already end
    /// with one and both are non-empty.
    #[must_use]
    pub fn combined_log(&self) -> String {
        let mut log = self.stdout_string();
        let stderr = self.stderr_string();
        if !log.is_empty() && !stderr.is_empty() && !log.ends_with('\n') {
            log.push('\n');
        }
        log.push_str(&stderr);
        log
    }

    /// Check if the process exited successfully (exit code 0).
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0) && !self.timed_out
    }
}

/// Synchronous process execution.
///
/// # Contract
///
/// * `Ok(ProcessOutput)` whenever the child exits on its own, whatever its
///   exit status.
/// * `Err(RunnerError::Timeout)` when `timeout` elapses first; the child
///   has been terminated by the time this returns.
/// * `Err(RunnerError::LaunchFailed)` when the program cannot be started.
///
/// `timeout: None` waits indefinitely.
pub trait ProcessRunner {
    fn run(&self, cmd: &CommandSpec, timeout: Option<Duration>)
    -> Result<ProcessOutput, RunnerError>;
}
