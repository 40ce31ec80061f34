//! Synchronous execution of an assembled Foam-Agent command

use foam_agent_runner::{CommandSpec, NativeRunner, ProcessOutput, ProcessRunner, RunnerError};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Run `args` in `cwd` with exactly `env` as the child's environment.
///
/// The environment replaces the parent's rather than extending it, so `env`
/// must carry `PATH` and anything else the shell needs (see [`live_env`]).
/// A non-zero exit status comes back as `Ok`; a timeout comes back as
/// [`RunnerError::Timeout`] after the child has been terminated.
pub fn run_foam_agent_process(
    args: &[String],
    cwd: &Path,
    env: &HashMap<String, String>,
    timeout: Option<Duration>,
) -> Result<ProcessOutput, RunnerError> {
    run_foam_agent_process_with(&NativeRunner::new(), args, cwd, env, timeout)
}

/// [`run_foam_agent_process`] with a caller-supplied runner.
pub fn run_foam_agent_process_with<R: ProcessRunner + ?Sized>(
    runner: &R,
    args: &[String],
    cwd: &Path,
    env: &HashMap<String, String>,
    timeout: Option<Duration>,
) -> Result<ProcessOutput, RunnerError> {
    let spec = CommandSpec::from_argv(args)
        .ok_or_else(|| RunnerError::InvalidCommand {
            reason: "argument vector is empty".to_string(),
        })?
        .cwd(cwd)
        .env_clear()
        .envs(env);

    runner.run(&spec, timeout)
}

/// Snapshot of the current process environment.
///
/// Variables whose name or value is not valid Unicode are skipped.
#[must_use]
pub fn live_env() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
