//! Environment-driven configuration for Foam-Agent jobs
//!
//! [`load_config`] turns an environment snapshot into an immutable
//! [`FoamAgentConfig`]. Every value has a default, so loading never fails.
//! The environment is an explicit parameter so tests can pass a private map
//! instead of mutating the process environment.

mod env_keys;
mod expand;
mod sources;

use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use env_keys::{
    DEFAULT_ENTRYPOINT, DEFAULT_OPENFOAM_PATH, DEFAULT_PYTHON, ENV_ACTIVATE, ENV_ENTRYPOINT,
    ENV_OPENFOAM_FALLBACK, ENV_OPENFOAM_PATH, ENV_PYTHON, ENV_ROOT,
};
pub use expand::expand_home;
pub use sources::{ConfigSource, EffectiveValue};

/// Resolved Foam-Agent settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoamAgentConfig {
    /// Foam-Agent checkout
    pub root: PathBuf,
    /// Main script, always `root` joined with the entrypoint file name
    pub entrypoint: PathBuf,
    /// Interpreter command
    pub python: String,
    /// Shell snippet run (and required to succeed) before the entrypoint
    pub activate: Option<String>,
    /// OpenFOAM installation passed as `--openfoam_path`
    pub openfoam_path: String,
    #[serde(skip)]
    sources: Sources,
}

/// Where each field came from, for [`FoamAgentConfig::effective_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct Sources {
    root: ConfigSource,
    entrypoint: ConfigSource,
    python: ConfigSource,
    activate: ConfigSource,
    openfoam_path: ConfigSource,
}

/// Read the configuration from `env`, or from the live process environment
/// when `env` is `None`.
///
/// `default_root` is used when `FOAM_AGENT_ROOT` is unset. Unset and empty
/// variables are treated alike.
#[must_use]
pub fn load_config(default_root: &Path, env: Option<&HashMap<String, String>>) -> FoamAgentConfig {
    match env {
        Some(map) => FoamAgentConfig::from_lookup(default_root, |key| map.get(key).cloned()),
        None => FoamAgentConfig::from_lookup(default_root, |key| std::env::var(key).ok()),
    }
}

impl FoamAgentConfig {
    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(default_root: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let (root, root_source) = match get(ENV_ROOT) {
            Some(value) => (PathBuf::from(value), ConfigSource::Env(ENV_ROOT)),
            None => (default_root.to_path_buf(), ConfigSource::Default),
        };
        let root = expand_home(&root);

        let (entrypoint_name, entrypoint_source) = match get(ENV_ENTRYPOINT) {
            Some(value) => (value, ConfigSource::Env(ENV_ENTRYPOINT)),
            None => (DEFAULT_ENTRYPOINT.to_string(), ConfigSource::Default),
        };
        let entrypoint = expand_home(&root.join(entrypoint_name));

        let (python, python_source) = match get(ENV_PYTHON) {
            Some(value) => (value, ConfigSource::Env(ENV_PYTHON)),
            None => (DEFAULT_PYTHON.to_string(), ConfigSource::Default),
        };

        let activate = get(ENV_ACTIVATE)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let activate_source = if activate.is_some() {
            ConfigSource::Env(ENV_ACTIVATE)
        } else {
            ConfigSource::Default
        };

        // Order is fixed: explicit override, then the OpenFOAM environment, then the default.
        let (openfoam_path, openfoam_source) = if let Some(value) = get(ENV_OPENFOAM_PATH) {
            (value, ConfigSource::Env(ENV_OPENFOAM_PATH))
        } else if let Some(value) = get(ENV_OPENFOAM_FALLBACK) {
            (value, ConfigSource::Env(ENV_OPENFOAM_FALLBACK))
        } else {
            (DEFAULT_OPENFOAM_PATH.to_string(), ConfigSource::Default)
        };
        let openfoam_path = expand_home(Path::new(&openfoam_path))
            .to_string_lossy()
            .into_owned();

        let config = Self {
            root,
            entrypoint,
            python,
            activate,
            openfoam_path,
            sources: Sources {
                root: root_source,
                entrypoint: entrypoint_source,
                python: python_source,
                activate: activate_source,
                openfoam_path: openfoam_source,
            },
        };

        tracing::debug!(
            root = %config.root.display(),
            entrypoint = %config.entrypoint.display(),
            python = %config.python,
            activate = config.activate.is_some(),
            openfoam_path = %config.openfoam_path,
            "Loaded Foam-Agent configuration"
        );

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_with_empty_env() {
        let config = load_config(Path::new("/srv/foam-agent"), Some(&HashMap::new()));

        assert_eq!(config.root, PathBuf::from("/srv/foam-agent"));
        assert_eq!(
            config.entrypoint,
            PathBuf::from("/srv/foam-agent/foambench_main.py")
        );
        assert_eq!(config.python, "python");
        assert_eq!(config.activate, None);
        assert_eq!(config.openfoam_path, "/opt/openfoam13");
    }

    #[test]
    fn test_default_root_is_home_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let config = load_config(Path::new("~/Foam-Agent"), Some(&HashMap::new()));
        assert_eq!(config.root, home.join("Foam-Agent"));
        assert_eq!(config.entrypoint, home.join("Foam-Agent/foambench_main.py"));
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            (ENV_ROOT, "/data/agent"),
            (ENV_ENTRYPOINT, "bench/run.py"),
            (ENV_PYTHON, "python3.11"),
            (ENV_ACTIVATE, "  source /opt/venv/bin/activate \n"),
        ]);
        let config = load_config(Path::new("/ignored"), Some(&vars));

        assert_eq!(config.root, PathBuf::from("/data/agent"));
        assert_eq!(config.entrypoint, PathBuf::from("/data/agent/bench/run.py"));
        assert_eq!(config.python, "python3.11");
        assert_eq!(
            config.activate.as_deref(),
            Some("source /opt/venv/bin/activate")
        );
    }

    #[test]
    fn test_blank_activate_is_absent() {
        let vars = env(&[(ENV_ACTIVATE, "   ")]);
        let config = load_config(Path::new("/srv"), Some(&vars));
        assert_eq!(config.activate, None);
    }

    #[test]
    fn test_empty_root_falls_back_to_default() {
        let vars = env(&[(ENV_ROOT, "")]);
        let config = load_config(Path::new("/srv/foam-agent"), Some(&vars));
        assert_eq!(config.root, PathBuf::from("/srv/foam-agent"));
    }

    #[test]
    fn test_openfoam_override_wins() {
        let vars = env(&[
            (ENV_OPENFOAM_PATH, "/opt/of-explicit"),
            (ENV_OPENFOAM_FALLBACK, "/opt/of-wm"),
        ]);
        let config = load_config(Path::new("/srv"), Some(&vars));
        assert_eq!(config.openfoam_path, "/opt/of-explicit");
    }

    #[test]
    fn test_openfoam_fallback_beats_default() {
        let vars = env(&[(ENV_OPENFOAM_FALLBACK, "/opt/of-wm")]);
        let config = load_config(Path::new("/srv"), Some(&vars));
        assert_eq!(config.openfoam_path, "/opt/of-wm");
    }

    #[test]
    fn test_empty_openfoam_override_is_skipped() {
        let vars = env(&[(ENV_OPENFOAM_PATH, ""), (ENV_OPENFOAM_FALLBACK, "/opt/of-wm")]);
        let config = load_config(Path::new("/srv"), Some(&vars));
        assert_eq!(config.openfoam_path, "/opt/of-wm");
    }

    #[test]
    fn test_openfoam_override_is_home_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let vars = env(&[(ENV_OPENFOAM_PATH, "~/OpenFOAM-13")]);
        let config = load_config(Path::new("/srv"), Some(&vars));
        assert_eq!(
            config.openfoam_path,
            home.join("OpenFOAM-13").to_string_lossy()
        );
    }

    #[test]
    fn test_live_environment_is_read_when_no_map_given() {
        // PATH is present in any realistic test environment; the loader must
        // not panic and must still produce a complete config.
        let config = load_config(Path::new("/srv/foam-agent"), None);
        assert!(config.entrypoint.starts_with(&config.root));
        assert!(!config.python.is_empty());
        assert!(!config.openfoam_path.is_empty());
    }
}
