use serde::Serialize;
use std::fmt;

use super::FoamAgentConfig;

/// Layer that supplied a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "var", rename_all = "lowercase")]
pub enum ConfigSource {
    /// Read from the named environment variable
    Env(&'static str),
    /// Built-in default (or the caller's default root)
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(var) => write!(f, "env:{var}"),
            Self::Default => f.write_str("default"),
        }
    }
}

/// One row of [`FoamAgentConfig::effective_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveValue {
    pub key: &'static str,
    pub value: Option<String>,
    pub source: ConfigSource,
}

impl FoamAgentConfig {
    /// Every setting with the layer it came from, in a stable order.
    #[must_use]
    pub fn effective_config(&self) -> Vec<EffectiveValue> {
        vec![
            EffectiveValue {
                key: "root",
                value: Some(self.root.display().to_string()),
                source: self.sources.root,
            },
            EffectiveValue {
                key: "entrypoint",
                value: Some(self.entrypoint.display().to_string()),
                source: self.sources.entrypoint,
            },
            EffectiveValue {
                key: "python",
                value: Some(self.python.clone()),
                source: self.sources.python,
            },
            EffectiveValue {
                key: "activate",
                value: self.activate.clone(),
                source: self.sources.activate,
            },
            EffectiveValue {
                key: "openfoam_path",
                value: Some(self.openfoam_path.clone()),
                source: self.sources.openfoam_path,
            },
        ]
    }
}
