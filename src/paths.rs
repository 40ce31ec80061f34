//! Resolution of user-supplied paths against the Foam-Agent root

use foam_agent_config::{FoamAgentConfig, expand_home};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Outcome of [`resolve_path_relative_to_root`].
///
/// Both fields are `None` when no candidate was supplied, and both are `Some`
/// otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolveResult {
    pub value: Option<String>,
    pub resolved: Option<PathBuf>,
}

impl ResolveResult {
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            value: None,
            resolved: None,
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.resolved.is_none()
    }
}

/// Resolve `candidate` against `config.root`.
///
/// `~` is expanded first. Absolute candidates are returned as given; relative
/// ones are joined to the root and canonicalized. The filesystem is consulted
/// only to follow symlinks; a missing target is not an error and its
/// nonexistent tail is normalized lexically.
#[must_use]
pub fn resolve_path_relative_to_root(
    config: &FoamAgentConfig,
    candidate: Option<&str>,
) -> ResolveResult {
    let Some(candidate) = candidate.filter(|c| !c.is_empty()) else {
        return ResolveResult::absent();
    };

    let mut path = expand_home(Path::new(candidate));
    if !path.is_absolute() {
        path = resolve_lenient(&config.root.join(&path));
    }

    ResolveResult {
        value: Some(path.to_string_lossy().into_owned()),
        resolved: Some(path),
    }
}

/// Canonicalize component by component. Every prefix that exists on disk has
/// its symlinks followed; missing components are kept as written and a `..`
/// after one of them pops lexically.
fn resolve_lenient(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(part) => {
                resolved.push(part);
                if let Ok(real) = dunce::canonicalize(&resolved) {
                    resolved = real;
                }
            }
        }
    }

    resolved
}
