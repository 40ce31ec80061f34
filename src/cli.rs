//! Command-line interface for foam-agent-mcp
//!
//! Configuration comes from the environment (see `config`); the flags here
//! only describe the job.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{
    FoamAgentConfig, FoamAgentError, JobRequest, NativeRunner, build_shell_command, live_env,
    load_config, logging, resolve_path_relative_to_root, run_job,
};

/// Exit status used when the job exceeded `--timeout` (matches coreutils `timeout`).
pub const EXIT_TIMEOUT: i32 = 124;
/// Exit status for errors raised before or around the child process.
pub const EXIT_ERROR: i32 = 2;

/// foam-agent-mcp - run Foam-Agent simulation jobs
#[derive(Parser, Debug)]
#[command(name = "foam-agent-mcp")]
#[command(about = "Run Foam-Agent OpenFOAM jobs with environment-driven configuration")]
#[command(long_about = r#"
Builds a quoted `bash -lc` invocation of the Foam-Agent entrypoint and runs it,
printing the tail of its output.

ENVIRONMENT:
  FOAM_AGENT_ROOT            Foam-Agent checkout (default: --default-root)
  FOAM_AGENT_ENTRYPOINT      Entrypoint file under the root (default: foambench_main.py)
  FOAM_AGENT_PYTHON          Interpreter command (default: python)
  FOAM_AGENT_ACTIVATE        Shell snippet run before the entrypoint, e.g. conda activation
  FOAM_AGENT_OPENFOAM_PATH   OpenFOAM installation (falls back to WM_PROJECT_DIR, then /opt/openfoam13)

EXAMPLES:
  foam-agent-mcp run --prompt prompts/cavity.txt --output runs/cavity --timeout 3600
  foam-agent-mcp command --prompt p.txt --output out -- --max_loop 5
  foam-agent-mcp config --json
"#)]
#[command(version)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Root used when FOAM_AGENT_ROOT is not set
    #[arg(long, global = true, default_value = ".")]
    pub default_root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a job and print its (trimmed) output
    Run {
        #[command(flatten)]
        job: JobArgs,

        /// Kill the job after this many seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Print the job report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the shell command a job would run, without running it
    Command {
        #[command(flatten)]
        job: JobArgs,
    },

    /// Show the effective configuration and where each value came from
    Config {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    /// Prompt file describing the simulation (relative to the root)
    #[arg(long)]
    pub prompt: String,

    /// Output directory for the case (relative to the root)
    #[arg(long)]
    pub output: String,

    /// Custom mesh file (relative to the root)
    #[arg(long)]
    pub mesh: Option<String>,

    /// Extra arguments appended verbatim to the entrypoint command
    #[arg(last = true)]
    pub extra: Vec<String>,
}

/// Parse arguments, execute, and return the process exit status.
#[must_use]
pub fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("Warning: failed to initialise logging: {e}");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match execute(&cli, &mut out) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            EXIT_ERROR
        }
    }
}

/// Execute a parsed command, writing user-facing output to `out`.
pub fn execute(cli: &Cli, out: &mut impl Write) -> Result<i32> {
    let config = load_config(&cli.default_root, None);

    match &cli.command {
        Commands::Run { job, timeout, json } => {
            run_command(&config, job, timeout.map(Duration::from_secs), *json, out)
        }
        Commands::Command { job } => {
            let output = resolve_or_raw(&config, &job.output);
            let prompt = resolve_or_raw(&config, &job.prompt);
            let mesh = resolve_path_relative_to_root(&config, job.mesh.as_deref());
            let command =
                build_shell_command(&config, &output, &prompt, mesh.value.as_deref(), &job.extra);
            writeln!(out, "{}", command.shell_command)?;
            Ok(0)
        }
        Commands::Config { json } => {
            let effective = config.effective_config();
            if *json {
                serde_json::to_writer_pretty(&mut *out, &effective)
                    .context("Failed to serialize configuration")?;
                writeln!(out)?;
            } else {
                for row in &effective {
                    writeln!(
                        out,
                        "{:<14} {:<40} ({})",
                        row.key,
                        row.value.as_deref().unwrap_or("<unset>"),
                        row.source
                    )?;
                }
            }
            Ok(0)
        }
    }
}

fn resolve_or_raw(config: &FoamAgentConfig, candidate: &str) -> PathBuf {
    resolve_path_relative_to_root(config, Some(candidate))
        .resolved
        .unwrap_or_else(|| Path::new(candidate).to_path_buf())
}

fn run_command(
    config: &FoamAgentConfig,
    job: &JobArgs,
    timeout: Option<Duration>,
    json: bool,
    out: &mut impl Write,
) -> Result<i32> {
    let request = JobRequest {
        output_dir: job.output.clone(),
        prompt_path: job.prompt.clone(),
        custom_mesh_path: job.mesh.clone(),
        extra_args: job.extra.clone(),
        timeout,
    };

    match run_job(config, &request, &live_env(), &NativeRunner::new()) {
        Ok(report) => {
            if json {
                serde_json::to_writer_pretty(&mut *out, &report)
                    .context("Failed to serialize job report")?;
                writeln!(out)?;
            } else {
                write!(out, "{}", report.log)?;
            }
            Ok(report.exit_code.unwrap_or(1))
        }
        Err(FoamAgentError::Timeout { timeout, log }) => {
            if json {
                let body = serde_json::json!({
                    "timed_out": true,
                    "timeout_secs": timeout.as_secs_f64(),
                    "log": log,
                });
                serde_json::to_writer_pretty(&mut *out, &body)
                    .context("Failed to serialize timeout report")?;
                writeln!(out)?;
            } else {
                write!(out, "{log}")?;
                eprintln!("Foam-Agent timed out after {timeout:?}");
            }
            Ok(EXIT_TIMEOUT)
        }
        Err(e) => Err(e).context("Foam-Agent job failed"),
    }
}
