//! One-call job execution: resolve, build, run, trim.

use foam_agent_config::FoamAgentConfig;
use foam_agent_runner::{MAX_LOG_CHARS, ProcessRunner, trim_log};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::command::build_shell_command;
use crate::error::FoamAgentError;
use crate::paths::resolve_path_relative_to_root;
use crate::runtime::run_foam_agent_process_with;

/// Inputs for a single Foam-Agent run.
///
/// Paths may be relative; they are resolved against the configured root.
#[derive(Debug, Clone, Default)]
pub struct JobRequest {
    pub output_dir: String,
    pub prompt_path: String,
    pub custom_mesh_path: Option<String>,
    pub extra_args: Vec<String>,
    pub timeout: Option<Duration>,
}

/// What a caller reports back to the user after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReport {
    /// `None` when the child was killed by a signal
    pub exit_code: Option<i32>,
    pub success: bool,
    pub shell_command: String,
    pub output_dir: PathBuf,
    pub duration_ms: u64,
    /// Tail of stdout followed by stderr
    pub log: String,
}

/// Run one job end to end.
///
/// The prompt (and the mesh, when given) must exist; the output directory is
/// created if missing. The child runs in `config.root` with `env` as its
/// entire environment. A non-zero exit is reported in the [`JobReport`]; a
/// timeout becomes [`FoamAgentError::Timeout`].
pub fn run_job<R: ProcessRunner + ?Sized>(
    config: &FoamAgentConfig,
    request: &JobRequest,
    env: &HashMap<String, String>,
    runner: &R,
) -> Result<JobReport, FoamAgentError> {
    let output_dir = resolve_path_relative_to_root(config, Some(request.output_dir.as_str()))
        .resolved
        .unwrap_or_else(|| config.root.clone());

    let prompt_path = resolve_path_relative_to_root(config, Some(request.prompt_path.as_str()))
        .resolved
        .filter(|p| p.is_file())
        .ok_or_else(|| FoamAgentError::PromptNotFound {
            path: PathBuf::from(&request.prompt_path),
        })?;

    let mesh = resolve_path_relative_to_root(config, request.custom_mesh_path.as_deref());
    if let Some(resolved) = &mesh.resolved
        && !resolved.exists()
    {
        return Err(FoamAgentError::MeshNotFound {
            path: resolved.clone(),
        });
    }

    std::fs::create_dir_all(&output_dir).map_err(|source| FoamAgentError::OutputDir {
        path: output_dir.clone(),
        source,
    })?;

    let command = build_shell_command(
        config,
        &output_dir,
        &prompt_path,
        mesh.value.as_deref(),
        &request.extra_args,
    );

    tracing::info!(
        output_dir = %output_dir.display(),
        prompt = %prompt_path.display(),
        mesh = ?mesh.value,
        timeout_secs = request.timeout.map(|t| t.as_secs_f64()),
        "Starting Foam-Agent job"
    );

    let started = Instant::now();
    let output =
        run_foam_agent_process_with(runner, &command.argv, &config.root, env, request.timeout)
            .inspect_err(|e| tracing::error!(error = %e, "Foam-Agent job failed"))?;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let log = output.combined_log();
    let report = JobReport {
        exit_code: output.exit_code,
        success: output.success(),
        shell_command: command.shell_command,
        output_dir,
        duration_ms,
        log: trim_log(&log, MAX_LOG_CHARS).to_string(),
    };

    if report.success {
        tracing::info!(duration_ms, "Foam-Agent job completed");
    } else {
        tracing::warn!(exit_code = ?report.exit_code, duration_ms, "Foam-Agent job exited with failure");
    }

    Ok(report)
}
