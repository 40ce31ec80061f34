//! Environment variable names and built-in defaults

pub const ENV_ROOT: &str = "FOAM_AGENT_ROOT";
pub const ENV_ENTRYPOINT: &str = "FOAM_AGENT_ENTRYPOINT";
pub const ENV_PYTHON: &str = "FOAM_AGENT_PYTHON";
pub const ENV_ACTIVATE: &str = "FOAM_AGENT_ACTIVATE";
pub const ENV_OPENFOAM_PATH: &str = "FOAM_AGENT_OPENFOAM_PATH";
/// Set by OpenFOAM's own `etc/bashrc`; consulted when no explicit override exists.
pub const ENV_OPENFOAM_FALLBACK: &str = "WM_PROJECT_DIR";

pub const DEFAULT_ENTRYPOINT: &str = "foambench_main.py";
pub const DEFAULT_PYTHON: &str = "python";
pub const DEFAULT_OPENFOAM_PATH: &str = "/opt/openfoam13";
