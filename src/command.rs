//! Shell command assembly for the Foam-Agent entrypoint
//!
//! The entrypoint is started through `bash -lc` so a login shell can source
//! OpenFOAM and an optional activation snippet. Every interpolated value is
//! quoted with [`shell_words::quote`]; only caller-provided `extra_args` are
//! passed through verbatim.

use foam_agent_config::FoamAgentConfig;
use foam_agent_runner::CommandSpec;
use serde::Serialize;
use std::path::Path;

pub const SHELL: &str = "bash";
pub const SHELL_LOGIN_FLAG: &str = "-lc";

/// A ready-to-run shell invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellCommand {
    /// `["bash", "-lc", shell_command]`
    pub argv: Vec<String>,
    /// The command line handed to the shell, kept for logs and diagnostics
    pub shell_command: String,
}

impl ShellCommand {
    /// The argv as a [`CommandSpec`], without cwd or environment.
    #[must_use]
    pub fn to_command_spec(&self) -> CommandSpec {
        CommandSpec::new(SHELL).args([SHELL_LOGIN_FLAG, self.shell_command.as_str()])
    }
}

fn quote_path(path: &Path) -> String {
    shell_words::quote(&path.to_string_lossy()).into_owned()
}

/// Build the shell command that runs one Foam-Agent job.
///
/// Shape:
///
/// ```text
/// [<activate> &&] <python> <entrypoint> --openfoam_path <p> --output <dir> --prompt_path <p> [--custom_mesh_path <p>] [extra...]
/// ```
///
/// `custom_mesh_path` is included only when non-empty. `extra_args` are
/// appended unquoted, in order, so callers must quote them if needed.
#[must_use]
pub fn build_shell_command<I, S>(
    config: &FoamAgentConfig,
    output_dir: &Path,
    prompt_path: &Path,
    custom_mesh_path: Option<&str>,
    extra_args: I,
) -> ShellCommand
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens = vec![
        format!(
            "{} {}",
            shell_words::quote(&config.python),
            quote_path(&config.entrypoint)
        ),
        format!(
            "--openfoam_path {}",
            shell_words::quote(&config.openfoam_path)
        ),
        format!("--output {}", quote_path(output_dir)),
        format!("--prompt_path {}", quote_path(prompt_path)),
    ];

    if let Some(mesh) = custom_mesh_path.filter(|m| !m.is_empty()) {
        tokens.push(format!("--custom_mesh_path {}", shell_words::quote(mesh)));
    }
    tokens.extend(extra_args.into_iter().map(|arg| arg.as_ref().to_string()));

    let mut shell_command = tokens.join(" ");
    if let Some(activate) = config.activate.as_deref() {
        shell_command = format!("{activate} && {shell_command}");
    }

    tracing::debug!(command = %shell_command, "Built Foam-Agent shell command");

    ShellCommand {
        argv: vec![
            SHELL.to_string(),
            SHELL_LOGIN_FLAG.to_string(),
            shell_command.clone(),
        ],
        shell_command,
    }
}
