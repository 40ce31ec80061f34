use std::path::{Component, Path, PathBuf};

/// Replace a leading `~` component with the user's home directory.
///
/// `~user` forms and paths without a leading `~` are returned unchanged, as
/// is everything when the home directory cannot be determined.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilde_alone() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~")), home);
        }
    }

    #[test]
    fn test_tilde_prefix() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home(Path::new("~/cases/cavity")),
                home.join("cases/cavity")
            );
        }
    }

    #[test]
    fn test_other_paths_untouched() {
        assert_eq!(expand_home(Path::new("/opt/openfoam13")), PathBuf::from("/opt/openfoam13"));
        assert_eq!(expand_home(Path::new("meshes/a.stl")), PathBuf::from("meshes/a.stl"));
        assert_eq!(expand_home(Path::new("~alice/x")), PathBuf::from("~alice/x"));
        assert_eq!(expand_home(Path::new("a/~/b")), PathBuf::from("a/~/b"));
    }
}
