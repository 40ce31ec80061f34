//! Errors surfaced by the job facade

use foam_agent_runner::RunnerError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoamAgentError {
    #[error("Prompt file not found: {}", path.display())]
    PromptNotFound { path: PathBuf },

    #[error("Custom mesh not found: {}", path.display())]
    MeshNotFound { path: PathBuf },

    #[error("Failed to prepare output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The job exceeded its timeout. `log` is the trimmed partial output.
    #[error("Foam-Agent timed out after {timeout:?}")]
    Timeout { timeout: Duration, log: String },

    #[error(transparent)]
    Runner(RunnerError),
}

impl From<RunnerError> for FoamAgentError {
    fn from(err: RunnerError) -> Self {
        match err {
            RunnerError::Timeout {
                timeout,
                partial_log,
            } => Self::Timeout {
                timeout,
                log: foam_agent_runner::trim_log(&partial_log, foam_agent_runner::MAX_LOG_CHARS)
                    .to_string(),
            },
            other => Self::Runner(other),
        }
    }
}

impl FoamAgentError {
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
