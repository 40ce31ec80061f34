//! Launch Foam-Agent simulation jobs from Rust.
//!
//! The pipeline is one-way:
//!
//! 1. [`load_config`] reads the environment into a [`FoamAgentConfig`].
//! 2. [`resolve_path_relative_to_root`] anchors user-supplied paths at the
//!    Foam-Agent checkout.
//! 3. [`build_shell_command`] assembles a quoted `bash -lc` invocation of the
//!    entrypoint.
//! 4. [`run_foam_agent_process`] executes it with a replacement environment
//!    and an optional timeout.
//! 5. [`trim_log`] keeps the tail of the captured output.
//!
//! [`run_job`] composes all five for callers that just want a report.

pub mod cli;
pub mod command;
pub mod error;
pub mod job;
pub mod logging;
pub mod paths;
pub mod runtime;

pub use command::{ShellCommand, build_shell_command};
pub use error::FoamAgentError;
pub use job::{JobReport, JobRequest, run_job};
pub use paths::{ResolveResult, resolve_path_relative_to_root};
pub use runtime::{live_env, run_foam_agent_process, run_foam_agent_process_with};

pub use foam_agent_config::{
    ConfigSource, DEFAULT_ENTRYPOINT, DEFAULT_OPENFOAM_PATH, DEFAULT_PYTHON, ENV_ACTIVATE,
    ENV_ENTRYPOINT, ENV_OPENFOAM_FALLBACK, ENV_OPENFOAM_PATH, ENV_PYTHON, ENV_ROOT, EffectiveValue,
    FoamAgentConfig, load_config,
};
pub use foam_agent_runner::{
    CommandSpec, MAX_LOG_CHARS, NativeRunner, ProcessOutput, ProcessRunner, RunnerError, trim_log,
};
